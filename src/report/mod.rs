//! Reporting utilities: verdict text and CLI output.

use crate::domain::Label;

pub mod format;

pub use format::*;

/// How a verdict should be styled by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
}

/// The two canned result messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub label: Label,
    pub headline: &'static str,
    pub explanation: &'static str,
    pub tone: Tone,
}

/// Map a label to its verdict. Both labels are covered.
pub fn verdict_for(label: Label) -> Verdict {
    match label {
        Label::NoDefault => Verdict {
            label,
            headline: "The customer is Not Likely to Default.",
            explanation: "This prediction means that based on the financial profile, \
                          the customer is considered less risky and unlikely to default.",
            tone: Tone::Success,
        },
        Label::Default => Verdict {
            label,
            headline: "The customer is Likely to Default.",
            explanation: "This prediction means that based on the financial profile, \
                          the customer is considered more risky and likely to default.",
            tone: Tone::Warning,
        },
    }
}
