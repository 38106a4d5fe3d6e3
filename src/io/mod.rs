//! Input/output helpers.
//!
//! - classifier artifact loading and structural checks (`artifact`)

pub mod artifact;

pub use artifact::*;
