//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads `.env`, then sets up logging
//! - loads the model (fatal on failure, before any UI is drawn)
//! - runs the form, a one-shot prediction, or the model summary

use clap::Parser;

use crate::cli::{Command, ModelArgs, PredictArgs};
use crate::config::ModelConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `credit-default` binary.
pub fn run() -> Result<(), AppError> {
    // We want `credit-default` and `credit-default -m rf.json` to behave like
    // `credit-default tui ...`. Clap requires a subcommand name, so we rewrite
    // argv before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // Logging reads RUST_LOG and CREDIT_LOG_DIR, so the dotfile goes first.
    crate::config::load_dotenv();

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Predict(args) => handle_predict(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

fn handle_tui(args: ModelArgs) -> Result<(), AppError> {
    let _log_guard = crate::logging::init_tui();
    let session = pipeline::start(ModelConfig::from_env(args.model.as_deref()))?;
    crate::tui::run(session)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    crate::logging::init_cli();
    let session = pipeline::start(ModelConfig::from_env(args.model.model.as_deref()))?;

    let features = args.features();
    let verdict = pipeline::predict_checked(&session.predictor, &features)?;

    if args.json {
        println!("{}", crate::report::format_verdict_json(&features, &verdict)?);
    } else {
        println!("{}", crate::report::format_prediction(&features, &verdict));
    }
    Ok(())
}

fn handle_inspect(args: ModelArgs) -> Result<(), AppError> {
    crate::logging::init_cli();
    let session = pipeline::start(ModelConfig::from_env(args.model.as_deref()))?;
    println!("{}", crate::report::format_model_summary(&session.summary));
    Ok(())
}

/// Rewrite argv so `credit-default` defaults to `credit-default tui`.
///
/// Rules:
/// - `credit-default`                     -> `credit-default tui`
/// - `credit-default -m rf.json ...`      -> `credit-default tui -m rf.json ...`
/// - `credit-default --help/--version/-h` -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "predict" | "inspect");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
