//! Formatted terminal output and the static page text.
//!
//! We keep formatting code in one place so the TUI and the CLI say the same
//! things, and output changes stay localized.

use serde::Serialize;

use crate::domain::{FeatureVector, Field};
use crate::error::{AppError, EXIT_INTERNAL};
use crate::io::ModelSummary;
use crate::report::Verdict;

pub const APP_TITLE: &str = "Credit Default Prediction App";

pub const APP_SUBTITLE: &str =
    "Predict the likelihood of a customer defaulting on credit based on their financial details.";

/// "About the Model" sidebar text.
pub const ABOUT_MODEL: [&str; 3] = [
    "Random Forest is an ensemble learning method, which combines the predictions of \
     multiple decision trees to improve the model's accuracy and robustness.",
    "It works by creating several decision trees, each trained on a random subset of the \
     data. The final prediction is made by averaging the results of all trees (for \
     regression) or taking a vote (for classification).",
    "It is highly effective at handling both classification and regression tasks and works \
     well with complex datasets containing non-linear relationships.",
];

pub const INSTRUCTIONS: [&str; 3] = [
    "Enter the customer's details in the sidebar.",
    "Click on \"Predict\" to check the likelihood of default.",
    "Use sliders and dropdowns for easier input.",
];

/// Two-line verdict for `predict`.
pub fn format_verdict(verdict: &Verdict) -> String {
    format!("{}\n{}", verdict.headline, verdict.explanation)
}

#[derive(Serialize)]
struct VerdictJson<'a> {
    features: &'a FeatureVector,
    label: u8,
    verdict: &'a str,
}

/// Machine-readable verdict for `predict --json`.
pub fn format_verdict_json(features: &FeatureVector, verdict: &Verdict) -> Result<String, AppError> {
    let payload = VerdictJson {
        features,
        label: verdict.label.code(),
        verdict: verdict.headline,
    };
    serde_json::to_string_pretty(&payload)
        .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to encode verdict JSON: {e}")))
}

/// Text output of `predict`: the inputs, a blank line, then the verdict.
pub fn format_prediction(features: &FeatureVector, verdict: &Verdict) -> String {
    format!("{}\n{}", format_features(features), format_verdict(verdict))
}

/// One line per input field, job shown with its encoded value.
pub fn format_features(features: &FeatureVector) -> String {
    let mut out = String::new();
    for field in Field::ALL {
        let value = match field {
            Field::Job => format!("{} (code {})", features.job, features.job.code()),
            _ => features.get(field).to_string(),
        };
        out.push_str(&format!("{:<18} {value}\n", format!("{}:", field.display_name())));
    }
    out
}

/// Artifact summary for `inspect`.
pub fn format_model_summary(summary: &ModelSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {APP_TITLE} - model ===\n"));
    out.push_str(&format!("Path: {}\n", summary.path.display()));
    out.push_str(&format!("Trees: {}\n", summary.n_trees));
    out.push_str(&format!("Nodes: {}\n", summary.n_nodes));
    out.push_str(&format!("Max depth: {}\n", summary.max_depth));
    out.push_str(&format!("Features: {}\n", summary.n_features));
    out.push_str(&format!("Classes: {:?}\n", summary.classes));

    out.push_str("\nFeature order:\n");
    for field in Field::ALL {
        out.push_str(&format!("  {}. {}\n", field.index() + 1, field.display_name()));
    }
    out
}
