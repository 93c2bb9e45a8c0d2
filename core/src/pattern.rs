//! The immutable compiled bit pattern.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{PatternError, PatternResult};
use crate::sep;
use crate::symbol::Symbol;

/// Mask and shift of one named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Bits of the pattern occupied by the field.
    pub mask: u64,
    /// Right shift that moves the field down to bit 0.
    pub shift: u32,
}

impl FieldSpec {
    /// Extract this field's value from a code.
    pub fn extract(&self, code: u64) -> u64 {
        (code & self.mask) >> self.shift
    }
}

/// A compiled fixed-width bit pattern.
///
/// Symbols are stored LSB-first: index 0 is bit 0, the rightmost
/// non-separator character of the source text. The value, mask and field
/// table are derived once at construction; instances are immutable and
/// every transformation produces a new pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPattern {
    bits: Vec<Symbol>,
    seps: Vec<String>,
    value: u64,
    mask: u64,
    fields: BTreeMap<char, FieldSpec>,
}

impl BitPattern {
    /// Compile annotated pattern text.
    pub fn parse(text: &str) -> PatternResult<Self> {
        let (chars, seps) = sep::unzip(text);
        let bits = chars.iter().filter_map(|&c| Symbol::from_char(c)).collect();
        Self::from_parts(bits, seps)
    }

    /// Build from LSB-first symbols and an aligned separator list
    /// (`seps.len() == bits.len() + 1`).
    pub fn from_parts(bits: Vec<Symbol>, seps: Vec<String>) -> PatternResult<Self> {
        debug_assert_eq!(seps.len(), bits.len() + 1);
        if bits.len() > 64 {
            return Err(PatternError::TooWide { len: bits.len() });
        }
        let mut value = 0u64;
        let mut mask = 0u64;
        let mut fields = BTreeMap::new();
        // Open run of field bits: (label, mask so far, shift).
        let mut open: Option<(char, u64, u32)> = None;
        for (n, &s) in bits.iter().enumerate() {
            let bit = 1u64 << n;
            match s {
                Symbol::One => {
                    value |= bit;
                    mask |= bit;
                }
                Symbol::Zero => mask |= bit,
                Symbol::Wildcard | Symbol::Field(_) => {}
            }
            match s {
                Symbol::Field(label) => match open {
                    Some((cur, fmask, shift)) if cur == label => {
                        open = Some((cur, fmask | bit, shift));
                    }
                    Some((cur, fmask, shift)) => {
                        Self::close_field(&mut fields, cur, fmask, shift)?;
                        open = Some((label, bit, n as u32));
                    }
                    None => open = Some((label, bit, n as u32)),
                },
                _ => {
                    if let Some((cur, fmask, shift)) = open.take() {
                        Self::close_field(&mut fields, cur, fmask, shift)?;
                    }
                }
            }
        }
        if let Some((cur, fmask, shift)) = open {
            Self::close_field(&mut fields, cur, fmask, shift)?;
        }
        Ok(Self {
            bits,
            seps,
            value,
            mask,
            fields,
        })
    }

    fn close_field(
        fields: &mut BTreeMap<char, FieldSpec>,
        label: char,
        mask: u64,
        shift: u32,
    ) -> PatternResult<()> {
        if fields.contains_key(&label) {
            return Err(PatternError::DuplicateField(label));
        }
        fields.insert(label, FieldSpec { mask, shift });
        Ok(())
    }

    /// Number of bit positions.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the pattern has no bit positions (a title row).
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The pattern value: 1 at every literal-one position.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// The pattern mask: 1 at every literal (fixed) position.
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// The field table, label to mask/shift.
    pub fn fields(&self) -> &BTreeMap<char, FieldSpec> {
        &self.fields
    }

    /// Look up one field.
    pub fn field(&self, label: char) -> Option<FieldSpec> {
        self.fields.get(&label).copied()
    }

    /// The LSB-first symbol sequence.
    pub fn symbols(&self) -> &[Symbol] {
        &self.bits
    }

    /// The LSB-aligned separator annotation (`len() + 1` entries).
    pub fn separators(&self) -> &[String] {
        &self.seps
    }

    /// Whether a code fits in this pattern's width and satisfies every
    /// fixed bit.
    pub fn matches(&self, code: u64) -> bool {
        if self.bits.len() < 64 && code >= 1u64 << self.bits.len() {
            return false;
        }
        (code ^ self.value) & self.mask == 0
    }

    /// Whether some code could satisfy the fixed bits of both patterns.
    ///
    /// Only the common low bits are compared; high bits of the longer
    /// pattern are ignored.
    pub fn overlaps(&self, other: &BitPattern) -> bool {
        (self.value ^ other.value) & self.mask & other.mask == 0
    }

    /// New pattern with the given separator positions set to `text`.
    /// Positions beyond `len()` are ignored.
    pub fn with_separators(&self, positions: &[usize], text: &str) -> BitPattern {
        let mut new = self.clone();
        for &p in positions {
            if p < new.seps.len() {
                new.seps[p] = text.to_string();
            }
        }
        new
    }

    /// New pattern with the given separator positions cleared.
    pub fn without_separators(&self, positions: &[usize]) -> BitPattern {
        self.with_separators(positions, "")
    }

    /// The bare pattern text, MSB-first, without separators.
    pub fn render(&self) -> String {
        self.bits.iter().rev().map(|s| s.as_char()).collect()
    }

    /// The annotated pattern text with separators.
    pub fn render_annotated(&self) -> String {
        let chars: Vec<char> = self.bits.iter().map(|s| s.as_char()).collect();
        sep::zip(&chars, &self.seps)
    }

    /// Character length of the annotated rendering.
    pub fn annotated_len(&self) -> usize {
        self.bits.len() + self.seps.iter().map(|s| s.chars().count()).sum::<usize>()
    }

    /// The pattern text regrouped into nibbles.
    pub fn nibble_grouped(&self) -> String {
        sep::nibble_grouped(&self.render())
    }
}

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_annotated())
    }
}
