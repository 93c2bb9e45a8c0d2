//! Decoder registration errors.

use thiserror::Error;

/// Result type for decoder operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while building or registering decoders.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Two decoders were registered under the same name.
    #[error("decoder name already exists: {0}")]
    DuplicateName(String),

    /// No decoder is registered under the name.
    #[error("unknown decoder: {0}")]
    UnknownName(String),

    /// `rename_field` addressed a field the decoder does not have.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// `rename_field` would collide with an existing field name.
    #[error("field name already in use: {0}")]
    DuplicateField(String),
}
