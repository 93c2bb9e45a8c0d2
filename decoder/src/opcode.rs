//! One named decoder: pattern, field names, validity predicate.

use std::collections::BTreeMap;
use std::fmt;

use ocp_core::{BitPattern, FieldSpec, PatternResult};

use crate::error::{DecodeError, DecodeResult};

/// The mapping produced by a successful decode: the decoder name plus one
/// value per named field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    name: String,
    fields: BTreeMap<String, u64>,
}

impl Decoded {
    /// New mapping with no field entries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// The decoder (or predicate-rewritten) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the name entry.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Value of one field, if present.
    pub fn get(&self, field: &str) -> Option<u64> {
        self.fields.get(field).copied()
    }

    /// Insert or overwrite a field value.
    pub fn set(&mut self, field: impl Into<String>, value: u64) {
        self.fields.insert(field.into(), value);
    }

    /// Remove every field entry, keeping the name.
    pub fn clear_fields(&mut self) {
        self.fields.clear();
    }

    /// Iterate field name/value pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&str, u64)> {
        self.fields.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Outcome of a validity predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The mapping is valid; it may have been rewritten or replaced.
    Accept(Decoded),
    /// The code does not decode to this opcode after all.
    Reject,
}

/// A decoder for one opcode pattern.
///
/// Field labels from the pattern become string keys of the decode
/// mapping; `rename_field` remaps them to descriptive names. The validity
/// predicate sees every candidate mapping and may accept it (possibly
/// rewritten wholesale) or reject it.
pub struct Opcode {
    name: String,
    pattern: BitPattern,
    params: BTreeMap<String, FieldSpec>,
    predicate: Box<dyn Fn(Decoded) -> Verdict>,
}

impl Opcode {
    /// Compile a decoder from annotated pattern text, accepting every
    /// match.
    pub fn new(name: impl Into<String>, pattern: &str) -> PatternResult<Self> {
        let pattern = BitPattern::parse(pattern)?;
        let params = pattern
            .fields()
            .iter()
            .map(|(&label, &spec)| (label.to_string(), spec))
            .collect();
        Ok(Self {
            name: name.into(),
            pattern,
            params,
            predicate: Box::new(Verdict::Accept),
        })
    }

    /// Attach a validity predicate.
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Decoded) -> Verdict + 'static,
    {
        self.predicate = Box::new(predicate);
        self
    }

    /// The decoder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &BitPattern {
        &self.pattern
    }

    /// Field names in mapping order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(|k| k.as_str())
    }

    /// Rename one field of the decode mapping.
    pub fn rename_field(&mut self, old: &str, new: &str) -> DecodeResult<()> {
        if old == new {
            return Ok(());
        }
        if self.params.contains_key(new) {
            return Err(DecodeError::DuplicateField(new.to_string()));
        }
        let spec = self
            .params
            .remove(old)
            .ok_or_else(|| DecodeError::UnknownField(old.to_string()))?;
        self.params.insert(new.to_string(), spec);
        Ok(())
    }

    /// Rename several fields at once.
    pub fn rename_fields(&mut self, pairs: &[(&str, &str)]) -> DecodeResult<()> {
        for (old, new) in pairs {
            self.rename_field(old, new)?;
        }
        Ok(())
    }

    /// Decode a code against this opcode.
    ///
    /// `None` when the code needs more bits than the pattern has, when a
    /// fixed bit disagrees, or when the predicate rejects.
    pub fn decode(&self, code: u64) -> Option<Decoded> {
        if !self.pattern.matches(code) {
            return None;
        }
        let mut decoded = Decoded::new(self.name.clone());
        for (name, spec) in &self.params {
            decoded.set(name.clone(), spec.extract(code));
        }
        match (self.predicate)(decoded) {
            Verdict::Accept(d) => Some(d),
            Verdict::Reject => None,
        }
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opcode")
            .field("name", &self.name)
            .field("pattern", &self.pattern.render())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
