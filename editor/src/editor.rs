//! The pattern-set editor: snapshot history plus structural mutators.

use std::io::Write;

use itertools::Itertools;
use ocp_algebra::Row;

use crate::error::{EditorError, EditorResult};
use crate::set::PatternSet;

/// Editor over an ordered pattern set with a linear undo/redo history.
///
/// The history is an append-only sequence of immutable snapshots plus a
/// cursor. Every structural mutator computes a new snapshot from the
/// current one, discards everything after the cursor (branch pruning),
/// appends the result and advances the cursor. Instances never share
/// state; use [`fork`](SetEditor::fork) for an explicit deep copy.
#[derive(Debug, Clone)]
pub struct SetEditor {
    history: Vec<PatternSet>,
    cursor: usize,
}

impl Default for SetEditor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SetEditor {
    /// Editor whose single starting snapshot holds the given rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            history: vec![PatternSet::new(rows)],
            cursor: 0,
        }
    }

    /// Compile (pattern text, description) pairs into a fresh editor.
    /// This is also the entry point that [`save`](SetEditor::save) output
    /// reconstructs.
    pub fn load<'a, I>(items: I) -> EditorResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rows = items
            .into_iter()
            .map(|(p, d)| Row::new(p, d))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rows))
    }

    /// The current snapshot.
    pub fn current(&self) -> &PatternSet {
        &self.history[self.cursor]
    }

    /// The current snapshot's rows.
    pub fn rows(&self) -> &[Row] {
        self.current().rows()
    }

    /// Number of rows in the current snapshot.
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Whether the current snapshot has no rows.
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Cursor position and history length.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor, self.history.len())
    }

    /// Append a snapshot, discarding any redoable future first.
    fn commit(&mut self, rows: Vec<Row>) {
        self.history.truncate(self.cursor + 1);
        self.history.push(PatternSet::new(rows));
        self.cursor += 1;
    }

    fn check_index(&self, index: usize) -> EditorResult<()> {
        let len = self.len();
        if index < len {
            Ok(())
        } else {
            Err(EditorError::OutOfRange { index, len })
        }
    }

    /// Positions may address one past the end (append).
    fn check_position(&self, pos: usize) -> EditorResult<()> {
        let len = self.len();
        if pos <= len {
            Ok(())
        } else {
            Err(EditorError::OutOfRange { index: pos, len })
        }
    }

    /// Resolve an optional row selection, defaulting to every row.
    fn selection(&self, indices: Option<&[usize]>) -> EditorResult<Vec<usize>> {
        match indices {
            Some(list) => {
                for &i in list {
                    self.check_index(i)?;
                }
                Ok(list.to_vec())
            }
            None => Ok((0..self.len()).collect()),
        }
    }

    // ---- structural mutators ------------------------------------------

    /// Delete the rows at the given indices.
    pub fn delete(&mut self, indices: &[usize]) -> EditorResult<()> {
        for &i in indices {
            self.check_index(i)?;
        }
        let rows = self
            .rows()
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, r)| r.clone())
            .collect();
        self.commit(rows);
        Ok(())
    }

    /// Insert a row at a position (`len` appends).
    pub fn insert(&mut self, pos: usize, row: Row) -> EditorResult<()> {
        self.check_position(pos)?;
        let mut rows = self.rows().to_vec();
        rows.insert(pos, row);
        self.commit(rows);
        Ok(())
    }

    /// Compile and insert a new row; `None` appends.
    pub fn add(&mut self, pattern: &str, desc: &str, pos: Option<usize>) -> EditorResult<()> {
        let row = Row::new(pattern, desc)?;
        self.insert(pos.unwrap_or(self.len()), row)
    }

    /// Insert a title row: an empty pattern whose description serves as a
    /// section heading.
    pub fn title(&mut self, pos: usize, text: &str) -> EditorResult<()> {
        self.add("", text, Some(pos))
    }

    /// Splice another editor's current rows in at a position (`None`
    /// appends).
    pub fn merge(&mut self, other: &SetEditor, pos: Option<usize>) -> EditorResult<()> {
        let pos = pos.unwrap_or(self.len());
        self.check_position(pos)?;
        let mut rows = self.rows().to_vec();
        rows.splice(pos..pos, other.rows().iter().cloned());
        self.commit(rows);
        Ok(())
    }

    /// Move a row to a new index.
    pub fn move_row(&mut self, src: usize, to: usize) -> EditorResult<()> {
        self.check_index(src)?;
        self.check_index(to)?;
        let mut rows = self.rows().to_vec();
        let row = rows.remove(src);
        rows.insert(to, row);
        self.commit(rows);
        Ok(())
    }

    /// Replace one row's description.
    pub fn set_description(&mut self, index: usize, desc: &str) -> EditorResult<()> {
        self.check_index(index)?;
        let mut rows = self.rows().to_vec();
        rows[index] = rows[index].with_desc(desc);
        self.commit(rows);
        Ok(())
    }

    /// Apply [`Row::replace_field`] to the selected rows (`None` = all).
    pub fn replace_field(
        &mut self,
        field: char,
        literal: &str,
        indices: Option<&[usize]>,
    ) -> EditorResult<()> {
        let selected = self.selection(indices)?;
        let mut rows = self.rows().to_vec();
        for i in selected {
            rows[i] = rows[i].replace_field(field, literal)?;
        }
        self.commit(rows);
        Ok(())
    }

    /// Apply [`Row::expand_field`] to the selected rows (`None` = all),
    /// splicing each row's expansion in at its position. A structural
    /// label is a no-op and records nothing.
    pub fn expand_field<F>(
        &mut self,
        field: char,
        indices: Option<&[usize]>,
        exclusions: &[&str],
        tag: F,
    ) -> EditorResult<()>
    where
        F: Fn(&str, char, &str) -> String,
    {
        if matches!(field, '0' | '1' | '*') || ocp_core::is_separator(field) {
            return Ok(());
        }
        let selected = self.selection(indices)?;
        let mut rows = Vec::new();
        for (i, row) in self.rows().iter().enumerate() {
            if selected.contains(&i) {
                rows.extend(row.expand_field(field, exclusions, &tag)?);
            } else {
                rows.push(row.clone());
            }
        }
        self.commit(rows);
        Ok(())
    }

    /// Remove the given bit positions from every row. Positions beyond a
    /// row's own length leave that row untouched.
    pub fn remove_bits(&mut self, positions: &[usize]) -> EditorResult<()> {
        let rows = self
            .rows()
            .iter()
            .map(|r| r.project(positions))
            .collect::<Result<Vec<_>, _>>()?;
        self.commit(rows);
        Ok(())
    }

    /// Set separator text at the given bit positions of the selected rows.
    ///
    /// Cosmetic, but still recorded as a snapshot: past snapshots are
    /// never mutated. Positions beyond a row's length are ignored.
    pub fn set_separators(
        &mut self,
        positions: &[usize],
        text: &str,
        indices: Option<&[usize]>,
    ) -> EditorResult<()> {
        let selected = self.selection(indices)?;
        let mut rows = self.rows().to_vec();
        for i in selected {
            let pattern = rows[i].pattern().with_separators(positions, text);
            rows[i] = Row::from_pattern(pattern, rows[i].desc());
        }
        self.commit(rows);
        Ok(())
    }

    /// Clear separator text at the given bit positions of the selected
    /// rows.
    pub fn clear_separators(
        &mut self,
        positions: &[usize],
        indices: Option<&[usize]>,
    ) -> EditorResult<()> {
        self.set_separators(positions, "", indices)
    }

    /// Record a checkpoint snapshot identical to the current one.
    pub fn dup(&mut self) {
        let rows = self.rows().to_vec();
        self.commit(rows);
    }

    /// Fold combinable rows to a fixed point and record the result.
    ///
    /// Each pass scans all row pairs; a successful combine replaces the
    /// lower-indexed row, deletes the higher one, and excludes both from
    /// the rest of the pass. Passes repeat until none combines.
    pub fn combine_all(&mut self) {
        let mut rows = self.rows().to_vec();
        loop {
            let mut queue: Vec<(usize, usize)> = (0..rows.len()).tuple_combinations().collect();
            let mut deletes: Vec<usize> = Vec::new();
            let mut merged = 0usize;
            while let Some((i, j)) = queue.pop() {
                if let Some(folded) = rows[i].combine(&rows[j]) {
                    queue.retain(|&(a, b)| a != i && a != j && b != i && b != j);
                    rows[i] = folded;
                    deletes.push(j);
                    merged += 1;
                }
            }
            deletes.sort_unstable_by(|a, b| b.cmp(a));
            for j in deletes {
                rows.remove(j);
            }
            if merged == 0 {
                break;
            }
        }
        self.commit(rows);
    }

    // ---- history -------------------------------------------------------

    /// Step the cursor back one snapshot. Returns `false` at the oldest
    /// snapshot (nothing to undo).
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step the cursor forward one snapshot. Returns `false` at the
    /// newest snapshot (nothing to redo).
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 == self.history.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Discard snapshots newer than the cursor.
    pub fn prune_future(&mut self) {
        self.history.truncate(self.cursor + 1);
    }

    /// Discard snapshots older than the cursor and reset it to 0.
    pub fn prune_past(&mut self) {
        self.history.drain(..self.cursor);
        self.cursor = 0;
    }

    // ---- copies --------------------------------------------------------

    /// Deep copy of the current snapshot (optionally a row selection) as
    /// an independent editor with a single-snapshot history.
    pub fn fork(&self, selection: Option<&[usize]>) -> EditorResult<SetEditor> {
        let rows = match selection {
            Some(list) => {
                for &i in list {
                    self.check_index(i)?;
                }
                list.iter().map(|&i| self.rows()[i].clone()).collect()
            }
            None => self.rows().to_vec(),
        };
        Ok(SetEditor::new(rows))
    }

    /// New single-snapshot editor holding this editor's current rows
    /// followed by the other's.
    pub fn concat(&self, other: &SetEditor) -> SetEditor {
        let mut rows = self.rows().to_vec();
        rows.extend(other.rows().iter().cloned());
        SetEditor::new(rows)
    }

    // ---- serialization -------------------------------------------------

    /// Write the current snapshot as constructor text, re-loadable via
    /// [`load`](SetEditor::load). One fully buffered write; on failure the
    /// caller retries the whole save.
    pub fn save<W: Write>(&self, name: &str, writer: &mut W) -> EditorResult<()> {
        let mut buf = String::new();
        buf.push_str(&format!("let {name} = SetEditor::load([\n"));
        for row in self.rows() {
            buf.push_str(&format!(
                "    ({:?}, {:?}),\n",
                row.pattern().render_annotated(),
                row.desc()
            ));
        }
        buf.push_str("])?;\n");
        writer.write_all(buf.as_bytes())?;
        Ok(())
    }
}

impl std::fmt::Display for SetEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.current(), f)
    }
}
