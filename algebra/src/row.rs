//! A described pattern row and its transformations.

use std::collections::BTreeSet;

use ocp_core::{is_separator, BitPattern, PatternResult, Symbol};

/// The default description tag for field expansion:
/// `"{desc}_{field}{bits}"`.
pub fn default_tag(desc: &str, field: char, bits: &str) -> String {
    format!("{desc}_{field}{bits}")
}

/// One row of a pattern set: a compiled pattern plus a free-form
/// description. Immutable; every transformation yields a new row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pattern: BitPattern,
    desc: String,
}

impl Row {
    /// Compile a row from annotated pattern text and a description.
    pub fn new(pattern: &str, desc: &str) -> PatternResult<Self> {
        Ok(Self {
            pattern: BitPattern::parse(pattern)?,
            desc: desc.trim().to_string(),
        })
    }

    /// Wrap an already compiled pattern.
    pub fn from_pattern(pattern: BitPattern, desc: impl Into<String>) -> Self {
        Self {
            pattern,
            desc: desc.into(),
        }
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &BitPattern {
        &self.pattern
    }

    /// The description.
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Same pattern, different description.
    pub fn with_desc(&self, desc: impl Into<String>) -> Row {
        Row {
            pattern: self.pattern.clone(),
            desc: desc.into(),
        }
    }

    /// Whether this is a title row (no bit positions).
    pub fn is_title(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Remove the given absolute bit positions.
    ///
    /// Separator text of removed positions folds into the next kept
    /// position's separator (or the leading separator), so the total
    /// annotation text is preserved. Positions beyond the pattern length
    /// are ignored.
    pub fn project(&self, positions: &[usize]) -> PatternResult<Row> {
        let remove: BTreeSet<usize> = positions.iter().copied().collect();
        let old_bits = self.pattern.symbols();
        let old_seps = self.pattern.separators();
        let mut bits = Vec::with_capacity(old_bits.len());
        let mut seps = Vec::with_capacity(old_seps.len());
        let mut carried = String::new();
        for (i, &b) in old_bits.iter().enumerate() {
            if remove.contains(&i) {
                carried.push_str(&old_seps[i]);
            } else {
                bits.push(b);
                let mut s = old_seps[i].clone();
                s.push_str(&carried);
                carried.clear();
                seps.push(s);
            }
        }
        let mut top = old_seps[old_bits.len()].clone();
        top.push_str(&carried);
        seps.push(top);
        Ok(Row {
            pattern: BitPattern::from_parts(bits, seps)?,
            desc: self.desc.clone(),
        })
    }

    /// Whether some code could satisfy both rows' fixed bits. Compares
    /// the common low bits only.
    pub fn overlaps(&self, other: &Row) -> bool {
        self.pattern.overlaps(other.pattern())
    }

    /// One reduction step: if the two rows' ternary views differ in
    /// exactly one position, fold them into a single row with that
    /// position wildcarded and the descriptions concatenated. The merged
    /// row carries no separator annotation.
    pub fn combine(&self, other: &Row) -> Option<Row> {
        if self.pattern.len() != other.pattern.len() {
            return None;
        }
        let mut differing = 0usize;
        let mut bits = Vec::with_capacity(self.pattern.len());
        for (&a, &b) in self.pattern.symbols().iter().zip(other.pattern.symbols()) {
            let (ta, tb) = (a.ternary(), b.ternary());
            if ta == tb {
                bits.push(ta);
            } else {
                differing += 1;
                bits.push(Symbol::Wildcard);
            }
        }
        if differing != 1 {
            return None;
        }
        let seps = vec![String::new(); bits.len() + 1];
        let pattern = BitPattern::from_parts(bits, seps).ok()?;
        Some(Row {
            pattern,
            desc: format!("{} {}", self.desc, other.desc),
        })
    }

    /// Expand a field into every literal bit combination.
    ///
    /// Combinations are produced in increasing numeric order; any whose
    /// MSB-first bit string equals an exclusion is skipped. Descriptions
    /// come from `tag(old_desc, field, bit_string)`. A label that is
    /// absent or structural (`0`, `1`, `*` or a separator) returns the
    /// original row as the sole result. Expanded rows keep this row's
    /// separators.
    pub fn expand_field<F>(
        &self,
        field: char,
        exclusions: &[&str],
        tag: F,
    ) -> PatternResult<Vec<Row>>
    where
        F: Fn(&str, char, &str) -> String,
    {
        if matches!(field, '0' | '1' | '*') || is_separator(field) {
            return Ok(vec![self.clone()]);
        }
        let positions: Vec<usize> = self
            .pattern
            .symbols()
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| (s == Symbol::Field(field)).then_some(i))
            .collect();
        if positions.is_empty() {
            return Ok(vec![self.clone()]);
        }
        let n = positions.len();
        let mut out = Vec::new();
        for v in 0..(1u128 << n) {
            let bit_string: String = (0..n)
                .rev()
                .map(|k| if (v >> k) & 1 == 1 { '1' } else { '0' })
                .collect();
            if exclusions.contains(&bit_string.as_str()) {
                continue;
            }
            let mut bits = self.pattern.symbols().to_vec();
            for (k, &pos) in positions.iter().enumerate() {
                bits[pos] = if (v >> k) & 1 == 1 {
                    Symbol::One
                } else {
                    Symbol::Zero
                };
            }
            let pattern = BitPattern::from_parts(bits, self.pattern.separators().to_vec())?;
            out.push(Row {
                pattern,
                desc: tag(&self.desc, field, &bit_string),
            });
        }
        Ok(out)
    }

    /// Replace every occurrence of a field label by an arbitrary literal
    /// string, then recompile.
    ///
    /// The substitution runs over the annotated text, so existing
    /// separators stay in place and separator characters in the literal
    /// become annotation. The literal may change the total pattern length
    /// or introduce new labels; no width validation is performed, and
    /// recompilation fails if the result reuses a label non-contiguously.
    pub fn replace_field(&self, field: char, literal: &str) -> PatternResult<Row> {
        let mut text = String::new();
        for c in self.pattern.render_annotated().chars() {
            if c == field {
                text.push_str(literal);
            } else {
                text.push(c);
            }
        }
        Ok(Row {
            pattern: BitPattern::parse(&text)?,
            desc: self.desc.clone(),
        })
    }
}
