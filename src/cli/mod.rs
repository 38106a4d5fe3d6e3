//! Command-line parsing for the credit default predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! model and presentation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{FeatureVector, JobCategory};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "credit-default",
    version,
    about = "Credit default prediction from five customer attributes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form (default when no subcommand is given).
    Tui(ModelArgs),
    /// Predict once from command-line values and print the verdict.
    ///
    /// Unlike the form, values are range-checked here and rejected with a
    /// descriptive error instead of being clamped.
    Predict(PredictArgs),
    /// Print a summary of the model artifact.
    Inspect(ModelArgs),
}

/// Where to load the model from.
#[derive(Debug, Args, Clone, Default)]
pub struct ModelArgs {
    /// Model artifact (JSON). Falls back to $CREDIT_MODEL_PATH, then
    /// `random_forest_model.json`.
    #[arg(short = 'm', long, value_name = "PATH")]
    pub model: Option<PathBuf>,
}

/// Inputs for a one-shot prediction. Defaults match the form's initial state.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Credit score (300-850).
    #[arg(long, default_value_t = 600)]
    pub credit_score: u32,

    /// Account balance (0-100000).
    #[arg(long, default_value_t = 50_000)]
    pub account_balance: u32,

    /// Number of transactions (0-100).
    #[arg(long, default_value_t = 10)]
    pub transaction_count: u32,

    /// Job category.
    #[arg(long, value_enum, default_value_t = JobCategory::Other)]
    pub job: JobCategory,

    /// Income (0-200000).
    #[arg(long, default_value_t = 50_000)]
    pub income: u32,

    /// Print the verdict as JSON.
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            credit_score: self.credit_score,
            account_balance: self.account_balance,
            transaction_count: self.transaction_count,
            job: self.job,
            income: self.income,
        }
    }
}
