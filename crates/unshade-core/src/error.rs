//! Error types for unshade-core
//!
//! Provides a unified error type for grid construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal storage details.

use thiserror::Error;

/// unshade-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Sample buffer does not match the declared dimensions
    #[error("sample count mismatch: {width}x{height} needs {expected} samples, got {actual}")]
    SampleCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Grid dimension mismatch between two inputs
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Coordinate out of bounds
    #[error("index out of bounds: ({x}, {y}) outside {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
