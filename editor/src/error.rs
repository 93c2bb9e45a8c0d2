//! Editor error types.

use ocp_core::PatternError;
use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while editing a pattern set.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A row index or position does not exist in the current snapshot.
    #[error("row index {index} out of range (set has {len} rows)")]
    OutOfRange { index: usize, len: usize },

    /// A field edit produced a pattern that no longer compiles.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Writing the saved set failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
