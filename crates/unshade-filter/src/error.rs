//! Error types for unshade-filter
//!
//! Every stage validates its window sizes and numeric parameters once,
//! before any per-pixel work, and reports the first violation.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] unshade_core::Error),

    /// Window size that is even, zero, or larger than the grid
    #[error("invalid {name} window {size}: {reason}")]
    InvalidWindow {
        /// Which window parameter was rejected
        name: &'static str,
        /// The rejected size
        size: u32,
        /// Why the size was rejected
        reason: &'static str,
    },

    /// A divisor that would be zero (or not a usable positive number)
    #[error("division by zero: {0}")]
    DivisionByZero(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
