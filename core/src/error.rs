//! Pattern compilation errors.

use thiserror::Error;

/// Errors raised while compiling pattern text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A field label reappeared after its run was closed.
    #[error("field '{0}' already defined")]
    DuplicateField(char),

    /// The pattern has more bit positions than a 64-bit word can hold.
    #[error("pattern is {len} bits wide, the limit is 64")]
    TooWide { len: usize },
}

pub type PatternResult<T> = Result<T, PatternError>;
