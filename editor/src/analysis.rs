//! Derived analyses over the current snapshot.
//!
//! Nothing here mutates the editor or records history; bit-sensitivity
//! probes run on a scratch copy of the current rows.

use ocp_algebra::Row;

use crate::editor::SetEditor;
use crate::error::EditorResult;

impl SetEditor {
    /// Pairs of rows whose fixed bits some code could satisfy
    /// simultaneously. Title rows are skipped; indices count within the
    /// non-empty subsequence, each paired with its description.
    pub fn ambiguities(&self) -> Vec<((usize, &str), (usize, &str))> {
        let rows: Vec<&Row> = self.rows().iter().filter(|r| !r.is_title()).collect();
        let mut out = Vec::new();
        for i in 0..rows.len() {
            for j in i + 1..rows.len() {
                if rows[i].overlaps(rows[j]) {
                    out.push(((i, rows[i].desc()), (j, rows[j].desc())));
                }
            }
        }
        out
    }

    /// How much each bit position is worth: the increase in the number of
    /// ambiguous pairs when that single bit is removed from every row.
    ///
    /// The vector covers positions up to the widest row. Probes use a
    /// scratch copy; the history is untouched.
    pub fn bit_sensitivity(&self) -> EditorResult<Vec<i64>> {
        let width = self
            .rows()
            .iter()
            .map(|r| r.pattern().len())
            .max()
            .unwrap_or(0);
        let baseline = self.ambiguities().len() as i64;
        let mut worth = Vec::with_capacity(width);
        for bit in 0..width {
            let mut scratch = self.fork(None)?;
            scratch.remove_bits(&[bit])?;
            worth.push(scratch.ambiguities().len() as i64 - baseline);
        }
        Ok(worth)
    }
}
