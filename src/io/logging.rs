//! Tracing subscriber setup for the command-line tool

use crate::io::error::{Result, invalid_parameter};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Build the event filter, preferring `RUST_LOG` over `level`
///
/// # Errors
///
/// Returns `InvalidParameter` if `RUST_LOG` is unset and `level` is not a
/// valid filter directive
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(level).map_err(|error| invalid_parameter("log-level", &level, &error))
    })
}

/// Install the global subscriber, writing events to stderr
///
/// Stdout stays reserved for search results.
///
/// # Errors
///
/// Returns `InvalidParameter` if the filter is invalid or a global
/// subscriber is already installed
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = build_filter(level)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .map_err(|error| invalid_parameter("log-level", &level, &error))
}
