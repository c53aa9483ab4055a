//! Error types for search and command-line operations

use crate::io::configuration::MAX_BOARD_SIZE;
use std::fmt;

/// Main error type for all search operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueensError {
    /// Board width outside `1..=MAX_BOARD_SIZE`
    ///
    /// Raised before the search starts; no state is created.
    InvalidBoardSize {
        /// Requested board width
        size: usize,
        /// Largest supported board width
        max: usize,
    },

    /// Counted solutions disagree with the known sequence
    SolutionMismatch {
        /// Board width searched
        size: usize,
        /// Tabulated solution count
        expected: u64,
        /// Solution count produced by the search
        found: u64,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for QueensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBoardSize { size, max } => {
                write!(f, "Invalid board size {size}: must be between 1 and {max}")
            }
            Self::SolutionMismatch {
                size,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Solution count mismatch for N={size}: expected {expected}, found {found}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for QueensError {}

/// Convenience type alias for search results
pub type Result<T> = std::result::Result<T, QueensError>;

/// Create an invalid board size error
pub const fn invalid_board_size(size: usize) -> QueensError {
    QueensError::InvalidBoardSize {
        size,
        max: MAX_BOARD_SIZE,
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> QueensError {
    QueensError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
