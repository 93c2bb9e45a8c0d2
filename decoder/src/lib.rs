//! OCP Decoder
//!
//! Runtime matching of numeric codes against compiled patterns.
//!
//! Responsibilities:
//! - Decode a code against one named opcode pattern into a field mapping
//! - Run caller validity predicates over decoded mappings
//! - Hold a registry of named decoders with priorities
//! - Resolve ambiguity by minimum priority, surfacing ties
//! - Report pairs of decoders whose fixed bits can coincide

mod error;
mod opcode;
mod registry;

pub use error::{DecodeError, DecodeResult};
pub use opcode::{Decoded, Opcode, Verdict};
pub use registry::Registry;
