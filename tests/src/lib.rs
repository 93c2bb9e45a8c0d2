//! OCP Tests
//!
//! Workspace-level integration tests. The scenarios in `tests/` follow
//! the ARMv4T instruction-set figures (ARM DDI0100E) that this toolkit
//! was built to pick apart.

pub mod prelude {
    pub use ocp_algebra::{default_tag, Row};
    pub use ocp_core::{BitPattern, PatternError, Symbol};
    pub use ocp_decoder::{DecodeError, Decoded, Opcode, Registry, Verdict};
    pub use ocp_editor::{EditorError, PatternSet, SetEditor};
}

use prelude::*;

/// Bare renderings of an editor's current rows, in order.
pub fn renderings(editor: &SetEditor) -> Vec<String> {
    editor
        .rows()
        .iter()
        .map(|r| r.pattern().render())
        .collect()
}

/// Descriptions of an editor's current rows, in order.
pub fn descriptions(editor: &SetEditor) -> Vec<String> {
    editor.rows().iter().map(|r| r.desc().to_string()).collect()
}
