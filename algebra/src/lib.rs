//! OCP Algebra
//!
//! Pure transformations on described pattern rows.
//!
//! Responsibilities:
//! - Bit projection (remove positions, regrouping separators)
//! - Pairwise overlap testing
//! - One-bit combine (a single Quine-McCluskey reduction step)
//! - Field expansion into literal enumerations
//! - Textual field replacement with recompilation
//!
//! Every operation takes `&self` and returns a new row; fixed-point
//! iteration of `combine` belongs to the caller.

mod row;

pub use row::{default_tag, Row};
