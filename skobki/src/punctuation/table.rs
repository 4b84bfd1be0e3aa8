//! Fixed-capacity punctuation table
//!
//! Owns the byte sets of the three punctuation classes. The total number of
//! bytes is validated against the compile-time capacity once, at construction;
//! a table is never silently truncated.

use super::classifier::{classify, ByteClass, PunctClass};
use crate::config::compile_time::lexical::PUNCTUATION_CAPACITY;
use crate::log_warning;
use serde::{Deserialize, Serialize};

/// Table construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("Too much punctuation: {count} bytes (max {PUNCTUATION_CAPACITY})")]
    TooMuchPunctuation { count: usize },
}

/// Direction of a bracket byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketDirection {
    Open,
    Close,
}

/// Punctuation bytes partitioned into delimiter, bracket and escape classes.
///
/// Bracket bytes are an ordered list read as open/close pairs: even positions
/// open, odd positions close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunctuationTable {
    delimiters: Vec<u8>,
    brackets: Vec<u8>,
    escape: Vec<u8>,
}

impl PunctuationTable {
    /// Build a validated table
    pub fn new(
        delimiters: impl Into<Vec<u8>>,
        brackets: impl Into<Vec<u8>>,
        escape: impl Into<Vec<u8>>,
    ) -> Result<Self, TableError> {
        let table = Self {
            delimiters: delimiters.into(),
            brackets: brackets.into(),
            escape: escape.into(),
        };

        let count = table.len();
        if count > PUNCTUATION_CAPACITY {
            return Err(TableError::TooMuchPunctuation { count });
        }

        table.warn_on_overlap();
        Ok(table)
    }

    /// Copy of this table with one class replaced
    pub fn with_class(&self, class: PunctClass, bytes: impl Into<Vec<u8>>) -> Result<Self, TableError> {
        let bytes = bytes.into();
        match class {
            PunctClass::Delimiter => Self::new(bytes, self.brackets.clone(), self.escape.clone()),
            PunctClass::Bracket => Self::new(self.delimiters.clone(), bytes, self.escape.clone()),
            PunctClass::Escape => Self::new(self.delimiters.clone(), self.brackets.clone(), bytes),
        }
    }

    fn warn_on_overlap(&self) {
        for class in PunctClass::ALL {
            for &byte in self.bytes(class) {
                let effective = classify(byte, self);
                if effective != ByteClass::from(class) {
                    log_warning!("Punctuation byte shadowed by a higher-priority class",
                        "byte" => format!("{:02x}", byte),
                        "configured_as" => class,
                        "classified_as" => format!("{:?}", effective)
                    );
                }
            }
        }
    }

    /// Bytes configured for one class
    pub fn bytes(&self, class: PunctClass) -> &[u8] {
        match class {
            PunctClass::Delimiter => &self.delimiters,
            PunctClass::Bracket => &self.brackets,
            PunctClass::Escape => &self.escape,
        }
    }

    pub fn delimiters(&self) -> &[u8] {
        &self.delimiters
    }

    pub fn brackets(&self) -> &[u8] {
        &self.brackets
    }

    pub fn escapes(&self) -> &[u8] {
        &self.escape
    }

    /// Total number of configured bytes
    pub fn len(&self) -> usize {
        self.delimiters.len() + self.brackets.len() + self.escape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        PUNCTUATION_CAPACITY
    }

    pub fn classify(&self, byte: u8) -> ByteClass {
        classify(byte, self)
    }

    pub fn is_punctuation(&self, byte: u8) -> bool {
        self.classify(byte).is_punctuation()
    }

    /// Direction of a byte that classifies as a bracket
    pub fn bracket_direction(&self, byte: u8) -> Option<BracketDirection> {
        if self.classify(byte) != ByteClass::Bracket {
            return None;
        }
        let index = self.brackets.iter().position(|b| *b == byte)?;
        Some(if index % 2 == 0 {
            BracketDirection::Open
        } else {
            BracketDirection::Close
        })
    }

    /// Partner of a bracket byte; `None` for a trailing unpaired opener
    pub fn matching_bracket(&self, byte: u8) -> Option<u8> {
        let index = self.brackets.iter().position(|b| *b == byte)?;
        match self.bracket_direction(byte)? {
            BracketDirection::Open => self.brackets.get(index + 1).copied(),
            BracketDirection::Close => self.brackets.get(index - 1).copied(),
        }
    }

    pub fn is_open_bracket(&self, byte: u8) -> bool {
        self.bracket_direction(byte) == Some(BracketDirection::Open)
    }

    /// Short hex rendering used in diagnostics, e.g. `20 0a | 28 29 | 60`
    pub fn summary(&self) -> String {
        PunctClass::ALL
            .into_iter()
            .map(|class| {
                self.bytes(class)
                    .iter()
                    .map(|b| format!("{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Default for PunctuationTable {
    /// Space and newline delimit, `(` `)` bracket, backtick escapes
    fn default() -> Self {
        Self {
            delimiters: vec![b' ', b'\n'],
            brackets: vec![b'(', b')'],
            escape: vec![b'`'],
        }
    }
}
