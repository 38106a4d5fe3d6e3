//! Tracing setup.
//!
//! CLI subcommands log to stderr (default level `warn`, override with
//! `RUST_LOG`). The TUI draws on the terminal, so it only logs when asked to,
//! and then to `credit-default.log` in `CREDIT_LOG_DIR` (or the working
//! directory).

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LOG_DIR_ENV;

const LOG_FILE_NAME: &str = "credit-default.log";

pub fn init_cli() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Directory for the TUI log file, or `None` when TUI logging is off.
///
/// `CREDIT_LOG_DIR` picks the directory; `RUST_LOG` alone logs to the working
/// directory.
pub fn tui_log_dir() -> Option<PathBuf> {
    match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Some(PathBuf::from(dir.trim())),
        _ if std::env::var_os("RUST_LOG").is_some() => Some(PathBuf::from(".")),
        _ => None,
    }
}

/// Start file logging for the TUI if `RUST_LOG` or `CREDIT_LOG_DIR` is set.
///
/// The returned guard flushes the log on drop; keep it alive for the whole
/// session.
pub fn init_tui() -> Option<WorkerGuard> {
    let log_dir = tui_log_dir()?;

    // `rolling::never` panics if it can't open the file, so check first.
    if std::fs::create_dir_all(&log_dir).is_err()
        || std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join(LOG_FILE_NAME))
            .is_err()
    {
        eprintln!(
            "Warning: cannot write {} in {}, logging disabled",
            LOG_FILE_NAME,
            log_dir.display()
        );
        return None;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Some(guard)
}
