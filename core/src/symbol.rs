//! The closed symbol alphabet of a bit position.

use std::fmt;

use crate::sep::is_separator;

/// One bit position of a pattern.
///
/// Anything that is not a literal, a wildcard or a separator is a field
/// label; consecutive equal labels form one multi-bit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Symbol {
    /// Literal `0`.
    Zero,
    /// Literal `1`.
    One,
    /// Free position, `*`.
    Wildcard,
    /// One bit of a named field.
    Field(char),
}

impl Symbol {
    /// Classify one pattern character. Separators yield `None`.
    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            '0' => Some(Symbol::Zero),
            '1' => Some(Symbol::One),
            '*' => Some(Symbol::Wildcard),
            c if is_separator(c) => None,
            c => Some(Symbol::Field(c)),
        }
    }

    /// The character this symbol renders as.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Wildcard => '*',
            Symbol::Field(c) => c,
        }
    }

    /// Whether the symbol pins its bit to a literal value.
    pub fn is_fixed(self) -> bool {
        matches!(self, Symbol::Zero | Symbol::One)
    }

    /// The symbol with field identity erased: fields count as free.
    pub fn ternary(self) -> Symbol {
        match self {
            Symbol::Field(_) => Symbol::Wildcard,
            s => s,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
