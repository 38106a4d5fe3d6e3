//! `credit-default` library crate.
//!
//! The binary (`credit-default`) is a thin wrapper around this library so
//! that:
//!
//! - the predictor and the encoder table are testable without a terminal
//! - front-ends (TUI, CLI) share one pipeline
//! - the model is an injected handle, easy to swap for a stub

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
