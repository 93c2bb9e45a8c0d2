//! OCP Core
//!
//! Fixed-width bit-pattern compilation.
//!
//! Responsibilities:
//! - Define the closed symbol alphabet (literal bits, wildcard, fields)
//! - Compile annotated pattern text into value/mask/field form
//! - Track the cosmetic separator annotation alongside the bits
//! - Render patterns back to text (annotated, bare, nibble-grouped)

mod error;
mod pattern;
mod sep;
mod symbol;

pub use error::{PatternError, PatternResult};
pub use pattern::{BitPattern, FieldSpec};
pub use sep::{is_separator, nibble_grouped, strip, unzip, zip, SEPARATORS};
pub use symbol::Symbol;
