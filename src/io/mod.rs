//! Command-line surface and ambient concerns
//!
//! This module contains:
//! - Argument parsing and the multi-size search runner
//! - Limits, defaults and the known solution sequence
//! - The error type shared by library and binary
//! - Tracing setup and progress display

/// Argument parsing and search orchestration
pub mod cli;
/// Limits, defaults and reference solution counts
pub mod configuration;
/// Error type and result alias
pub mod error;
/// Tracing subscriber initialisation
pub mod logging;
/// Spinner and batch progress bars
pub mod progress;
