//! Domain types used throughout the app.
//!
//! This module defines:
//!
//! - the job category encoder table (`JobCategory`)
//! - the fixed-order model input (`FeatureVector`) and its field ranges
//! - the binary model output (`Label`)

pub mod types;

pub use types::*;
