//! One immutable snapshot of the pattern set.

use std::fmt;

use ocp_algebra::Row;

/// An ordered set of pattern rows, frozen at one point of the history.
///
/// Snapshots are immutable: the editor never changes a `PatternSet` in
/// place, it builds a new one and appends it to the history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    rows: Vec<Row>,
}

impl PatternSet {
    /// Wrap an ordered row list.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// The rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One row by index.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Iterate the rows.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl fmt::Display for PatternSet {
    /// `ls`-style listing: right-aligned index, right-aligned annotated
    /// pattern, description. Title rows show their leading separator and
    /// description in the pattern column.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "-- no patterns defined --");
        }
        let iw = self.rows.len().to_string().len();
        let pw = self
            .rows
            .iter()
            .map(|r| r.pattern().annotated_len())
            .max()
            .unwrap_or(0);
        for (n, row) in self.rows.iter().enumerate() {
            let line = if row.is_title() {
                let heading = format!("{}{}", row.pattern().separators()[0], row.desc());
                format!("{n:>iw$}  {heading:>pw$}")
            } else {
                format!(
                    "{n:>iw$}  {:>pw$}  {}",
                    row.pattern().render_annotated(),
                    row.desc()
                )
            };
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
