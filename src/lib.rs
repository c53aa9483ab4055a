//! Exhaustive N-queens solution counting with bit-vector constraint sets
//!
//! Column and diagonal occupancy live in three fixed-capacity bitsets, so
//! each placement test is a constant number of bit probes. The search is an
//! explicit backtracking automaton that counts solutions and the elementary
//! accesses it makes to its constraint store.

#![forbid(unsafe_code)]

/// Constraint store, instrumentation and backtracking search
pub mod algorithm;
/// Command-line interface, configuration, errors and logging
pub mod io;

pub use algorithm::search::{SearchConfig, SearchReport, solve, solve_with};
pub use io::error::{QueensError, Result};
