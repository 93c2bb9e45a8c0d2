//! OCP Editor
//!
//! Versioned editing and analysis of whole pattern sets.
//!
//! Responsibilities:
//! - Hold the ordered pattern set and its linear snapshot history
//! - Apply structural edits (delete, insert, merge, move, field edits,
//!   bit removal) as new immutable snapshots with branch-pruning undo/redo
//! - Derive ambiguity and bit-sensitivity reports from the current snapshot
//! - Fold combinable rows to a fixed point
//! - Save the current snapshot as re-loadable constructor text

mod analysis;
mod editor;
mod error;
mod set;

pub use editor::SetEditor;
pub use error::{EditorError, EditorResult};
pub use set::PatternSet;
