//! Error types for the cleaning pipeline.

use thiserror::Error;

/// Errors raised while rebuilding a frame.
///
/// Data conditions never produce these; cleaning steps degrade to a no-op
/// for the affected column instead.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A step could not assemble its output frame.
    #[error("{step}: DataFrame operation failed: {message}")]
    Frame { step: &'static str, message: String },
}

impl CleanError {
    pub(crate) fn frame(step: &'static str, err: &polars::prelude::PolarsError) -> Self {
        Self::Frame {
            step,
            message: err.to_string(),
        }
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, CleanError>;
