//! Error type for the restoration pipeline

use thiserror::Error;

/// Errors raised while restoring or persisting an image
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage rejected its input or parameters
    #[error("filter error: {0}")]
    Filter(#[from] unshade_filter::FilterError),

    /// A sink failed to persist a result
    #[error("I/O error: {0}")]
    Io(#[from] unshade_io::IoError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
