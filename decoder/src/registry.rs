//! Registry of named decoders with priority-based ambiguity resolution.

use std::fmt;

use crate::error::{DecodeError, DecodeResult};
use crate::opcode::{Decoded, Opcode};

/// A set of decoders evaluated together.
///
/// Every decoder carries a priority, default 0; lower numbers win. A code
/// decoded by several decoders yields every mapping at the minimum
/// priority among the matches, so genuine ties stay visible.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<(Opcode, i32)>,
}

impl Registry {
    /// New empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoder at priority 0.
    pub fn add(&mut self, opcode: Opcode) -> DecodeResult<()> {
        if self.entries.iter().any(|(o, _)| o.name() == opcode.name()) {
            return Err(DecodeError::DuplicateName(opcode.name().to_string()));
        }
        self.entries.push((opcode, 0));
        Ok(())
    }

    /// Number of registered decoders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set the priority of a named decoder.
    pub fn set_priority(&mut self, name: &str, priority: i32) -> DecodeResult<()> {
        match self.entries.iter_mut().find(|(o, _)| o.name() == name) {
            Some(entry) => {
                entry.1 = priority;
                Ok(())
            }
            None => Err(DecodeError::UnknownName(name.to_string())),
        }
    }

    /// Priority of a named decoder.
    pub fn priority(&self, name: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(o, _)| o.name() == name)
            .map(|&(_, p)| p)
    }

    /// Decode a code against every registered decoder.
    ///
    /// Returns the mappings from exactly the matching decoders at the
    /// minimum priority; several entries mean the code is ambiguous at
    /// that priority.
    pub fn decode(&self, code: u64) -> Vec<Decoded> {
        let mut best: Option<i32> = None;
        let mut out = Vec::new();
        for (opcode, priority) in &self.entries {
            if let Some(b) = best {
                if *priority > b {
                    continue;
                }
            }
            if let Some(decoded) = opcode.decode(code) {
                match best {
                    Some(b) if *priority < b => {
                        out.clear();
                        out.push(decoded);
                        best = Some(*priority);
                    }
                    Some(_) => out.push(decoded),
                    None => {
                        out.push(decoded);
                        best = Some(*priority);
                    }
                }
            }
        }
        out
    }

    /// Pairwise fixed-bit compatibility: `matrix[i][j]` is true when some
    /// code could satisfy both decoder `i` and decoder `j`.
    pub fn ambiguity_matrix(&self) -> Vec<Vec<bool>> {
        self.entries
            .iter()
            .map(|(a, _)| {
                self.entries
                    .iter()
                    .map(|(b, _)| a.pattern().overlaps(b.pattern()))
                    .collect()
            })
            .collect()
    }

    /// Name pairs of decoders whose fixed bits can coincide.
    pub fn ambiguity_list(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (i, (a, _)) in self.entries.iter().enumerate() {
            for (b, _) in &self.entries[i + 1..] {
                if a.pattern().overlaps(b.pattern()) {
                    out.push((a.name().to_string(), b.name().to_string()));
                }
            }
        }
        out
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (opcode, _) in &self.entries {
            writeln!(f, "{}  {}", opcode.pattern().nibble_grouped(), opcode.name())?;
        }
        Ok(())
    }
}
