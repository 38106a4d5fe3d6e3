//! Shared "predict" pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve model path -> load artifact -> predict -> verdict
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::config::ModelConfig;
use crate::domain::FeatureVector;
use crate::error::AppError;
use crate::io::{ModelSummary, load_classifier};
use crate::models::Predictor;
use crate::report::{Verdict, verdict_for};

/// Everything a front-end needs once the model is loaded.
#[derive(Debug, Clone)]
pub struct Session {
    pub predictor: Predictor,
    pub summary: ModelSummary,
    pub config: ModelConfig,
}

/// Load the model. Any failure here is fatal for the caller.
pub fn start(config: ModelConfig) -> Result<Session, AppError> {
    tracing::info!(
        path = %config.path.display(),
        source = config.source.display_name(),
        "loading model"
    );
    let (classifier, summary) = load_classifier(&config.path)?;
    Ok(Session {
        predictor: Predictor::new(classifier),
        summary,
        config,
    })
}

/// Predict from form values (already clamped by the widgets).
pub fn predict(predictor: &Predictor, features: &FeatureVector) -> Verdict {
    verdict_for(predictor.predict(features))
}

/// Predict from untrusted values, rejecting anything out of range.
pub fn predict_checked(predictor: &Predictor, features: &FeatureVector) -> Result<Verdict, AppError> {
    let label = predictor.predict_checked(features)?;
    Ok(verdict_for(label))
}
