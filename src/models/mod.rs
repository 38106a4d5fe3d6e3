//! Classifier implementations and the predictor that wraps them.
//!
//! The forest is a plain data structure with pure evaluation functions so the
//! predictor can hold it (or a test stub) behind a shared handle.

pub mod forest;
pub mod predictor;

pub use forest::{Classifier, DecisionTree, RandomForest, TREE_LEAF};
pub use predictor::Predictor;
