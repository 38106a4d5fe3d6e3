//! The prediction entry point shared by the form and the CLI.

use std::sync::Arc;

use crate::domain::{FeatureVector, InputError, Label};
use crate::models::Classifier;

/// Wraps an injected, read-only classifier handle.
///
/// Cloning is cheap; every clone shares the same loaded model.
#[derive(Clone)]
pub struct Predictor {
    model: Arc<dyn Classifier>,
}

impl Predictor {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model }
    }

    /// Predict without range checks.
    ///
    /// Callers that build vectors from clamped widgets use this path; values
    /// outside the documented ranges go straight to the model.
    pub fn predict(&self, features: &FeatureVector) -> Label {
        let label = self.model.predict(features);
        tracing::debug!(?features, label = label.code(), "prediction");
        label
    }

    /// Predict after checking every field against its documented range.
    pub fn predict_checked(&self, features: &FeatureVector) -> Result<Label, InputError> {
        features.validate()?;
        Ok(self.predict(features))
    }

    /// Predict from an untyped row in model column order.
    pub fn predict_row(&self, row: &[f64]) -> Result<Label, InputError> {
        let features = FeatureVector::try_from(row)?;
        self.predict_checked(&features)
    }

    pub fn describe(&self) -> String {
        self.model.describe()
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("model", &self.model.describe())
            .finish()
    }
}
