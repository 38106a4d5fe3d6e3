//! Runtime configuration.
//!
//! The only setting is where the model artifact lives. It is resolved once at
//! startup, in this order:
//!
//! 1. `--model <PATH>` on the command line
//! 2. `CREDIT_MODEL_PATH` in the environment (a `.env` file is honoured)
//! 3. `random_forest_model.json` in the working directory

use std::path::{Path, PathBuf};

/// Environment variable naming the model artifact.
pub const MODEL_PATH_ENV: &str = "CREDIT_MODEL_PATH";

/// Environment variable naming the directory for TUI log files.
pub const LOG_DIR_ENV: &str = "CREDIT_LOG_DIR";

/// Default artifact path, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "random_forest_model.json";

/// Merge `.env` from the working directory into the process environment.
///
/// Variables already set win over the file. Runs once at startup, before
/// logging or the model path look at the environment.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Where the model path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    Flag,
    Env,
    Default,
}

impl ModelSource {
    pub fn display_name(self) -> &'static str {
        match self {
            ModelSource::Flag => "--model",
            ModelSource::Env => MODEL_PATH_ENV,
            ModelSource::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub source: ModelSource,
}

impl ModelConfig {
    /// Resolve the model path from the CLI flag and the process environment.
    ///
    /// Expects `load_dotenv` to have run already.
    pub fn from_env(flag: Option<&Path>) -> Self {
        let env_value = std::env::var(MODEL_PATH_ENV).ok();
        Self::resolve(flag, env_value.as_deref())
    }

    /// Pure resolution step; empty environment values are ignored.
    pub fn resolve(flag: Option<&Path>, env_value: Option<&str>) -> Self {
        if let Some(path) = flag {
            return Self {
                path: path.to_path_buf(),
                source: ModelSource::Flag,
            };
        }

        match env_value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => Self {
                path: PathBuf::from(value),
                source: ModelSource::Env,
            },
            None => Self {
                path: PathBuf::from(DEFAULT_MODEL_PATH),
                source: ModelSource::Default,
            },
        }
    }
}
