//! Byte classification against a punctuation table

use super::table::PunctuationTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three configurable punctuation classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PunctClass {
    Delimiter,
    Bracket,
    Escape,
}

impl PunctClass {
    /// Classes in classification priority order
    pub const ALL: [PunctClass; 3] = [PunctClass::Delimiter, PunctClass::Bracket, PunctClass::Escape];

    /// Preamble keyword that configures this class, colon included
    pub fn keyword(&self) -> &'static str {
        match self {
            PunctClass::Delimiter => "delimiters:",
            PunctClass::Bracket => "brackets:",
            PunctClass::Escape => "escape:",
        }
    }

    /// Case-sensitive keyword lookup
    pub fn from_keyword(word: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.keyword().as_bytes() == word)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PunctClass::Delimiter => "delimiter",
            PunctClass::Bracket => "bracket",
            PunctClass::Escape => "escape",
        }
    }
}

impl fmt::Display for PunctClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single input byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteClass {
    Plain,
    Delimiter,
    Bracket,
    Escape,
}

impl ByteClass {
    pub fn is_plain(&self) -> bool {
        matches!(self, ByteClass::Plain)
    }

    pub fn is_punctuation(&self) -> bool {
        !self.is_plain()
    }

    /// Punctuation class, `None` for plain bytes
    pub fn punct_class(&self) -> Option<PunctClass> {
        match self {
            ByteClass::Plain => None,
            ByteClass::Delimiter => Some(PunctClass::Delimiter),
            ByteClass::Bracket => Some(PunctClass::Bracket),
            ByteClass::Escape => Some(PunctClass::Escape),
        }
    }
}

impl From<PunctClass> for ByteClass {
    fn from(class: PunctClass) -> Self {
        match class {
            PunctClass::Delimiter => ByteClass::Delimiter,
            PunctClass::Bracket => ByteClass::Bracket,
            PunctClass::Escape => ByteClass::Escape,
        }
    }
}

/// Classify one byte. Membership is tested delimiter, then bracket, then
/// escape; the first match wins.
pub fn classify(byte: u8, table: &PunctuationTable) -> ByteClass {
    PunctClass::ALL
        .into_iter()
        .find(|class| table.bytes(*class).contains(&byte))
        .map(ByteClass::from)
        .unwrap_or(ByteClass::Plain)
}

/// Length of the maximal plain run starting at `from`
pub fn plain_run_len(window: &[u8], from: usize, table: &PunctuationTable) -> usize {
    window
        .get(from..)
        .unwrap_or_default()
        .iter()
        .take_while(|byte| classify(**byte, table).is_plain())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classification() {
        let table = PunctuationTable::default();
        assert_eq!(classify(b' ', &table), ByteClass::Delimiter);
        assert_eq!(classify(b'\n', &table), ByteClass::Delimiter);
        assert_eq!(classify(b'(', &table), ByteClass::Bracket);
        assert_eq!(classify(b')', &table), ByteClass::Bracket);
        assert_eq!(classify(b'`', &table), ByteClass::Escape);
        assert_eq!(classify(b'a', &table), ByteClass::Plain);
        assert_eq!(classify(0xE2, &table), ByteClass::Plain);
    }

    #[test]
    fn test_priority_resolves_overlap() {
        // ' ' configured as both delimiter and escape
        let table = PunctuationTable::new(vec![b' '], vec![b'{', b'}'], vec![b' ', b'\\']).unwrap();
        assert_eq!(classify(b' ', &table), ByteClass::Delimiter);
        assert_eq!(classify(b'\\', &table), ByteClass::Escape);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(PunctClass::from_keyword(b"delimiters:"), Some(PunctClass::Delimiter));
        assert_eq!(PunctClass::from_keyword(b"brackets:"), Some(PunctClass::Bracket));
        assert_eq!(PunctClass::from_keyword(b"escape:"), Some(PunctClass::Escape));
        assert_eq!(PunctClass::from_keyword(b"Escape:"), None);
        assert_eq!(PunctClass::from_keyword(b"escape"), None);
    }

    #[test]
    fn test_plain_run_len() {
        let table = PunctuationTable::default();
        assert_eq!(plain_run_len(b"Hello world", 0, &table), 5);
        assert_eq!(plain_run_len(b"Hello world", 5, &table), 0);
        assert_eq!(plain_run_len(b"ab`c", 0, &table), 2);
        assert_eq!(plain_run_len(b"abc", 7, &table), 0);
    }
}
