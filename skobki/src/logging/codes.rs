//! Diagnostic codes and their metadata
//!
//! Every code the tokenizer can log is declared here together with its
//! category, severity and recommended action.

use serde::{Serialize, Serializer};
use std::fmt;

/// Stable diagnostic code, e.g. `E020`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Registry entry; success and informational codes have none
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        lookup(self.0)
    }

    pub fn category(&self) -> &'static str {
        self.metadata().map_or("General", |m| m.category)
    }

    pub fn severity(&self) -> Severity {
        self.metadata().map_or(Severity::Low, |m| m.severity)
    }

    pub fn requires_halt(&self) -> bool {
        self.metadata().is_some_and(|m| m.requires_halt)
    }

    pub fn description(&self) -> Option<&'static str> {
        self.metadata().map(|m| m.description)
    }

    pub fn recommended_action(&self) -> Option<&'static str> {
        self.metadata().map(|m| m.recommended_action)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ErrorMetadata {
    pub code: Code,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

pub mod lexical {
    use super::Code;

    pub const INVALID_ESCAPE: Code = Code::new("E020");
    pub const INVALID_DIRECTIVE: Code = Code::new("E021");
    pub const TOO_MUCH_PUNCTUATION: Code = Code::new("E022");
    pub const INVALID_INPUT_RANGE: Code = Code::new("E023");
    pub const NOT_IMPLEMENTED: Code = Code::new("E024");
    pub const TOO_MANY_TOKENS: Code = Code::new("E025");

    pub const ALL: [Code; 6] = [
        INVALID_ESCAPE,
        INVALID_DIRECTIVE,
        TOO_MUCH_PUNCTUATION,
        INVALID_INPUT_RANGE,
        NOT_IMPLEMENTED,
        TOO_MANY_TOKENS,
    ];
}

pub mod success {
    use super::Code;

    pub const LOGGING_INITIALIZED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const DIRECTIVES_APPLIED: Code = Code::new("I021");
}

/// Codes without a registry entry
pub mod plain {
    use super::Code;

    pub const WARNING: Code = Code::new("W000");
    pub const INFO: Code = Code::new("I000");
    pub const DEBUG: Code = Code::new("D000");
}

const fn lexical_error(
    code: Code,
    severity: Severity,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata {
        code,
        category: "Lexical",
        severity,
        recoverable: false,
        requires_halt: true,
        description,
        recommended_action,
    }
}

static REGISTRY: &[ErrorMetadata] = &[
    lexical_error(
        lexical::INVALID_ESCAPE,
        Severity::Medium,
        "Escape byte at end of input or before a non-punctuation byte",
        "Escape only delimiter, bracket or escape bytes",
    ),
    lexical_error(
        lexical::INVALID_DIRECTIVE,
        Severity::Medium,
        "Malformed directive preamble",
        "Use `delimiters:`, `brackets:`, `escape:` once each, followed by hex pairs and a newline",
    ),
    lexical_error(
        lexical::TOO_MUCH_PUNCTUATION,
        Severity::Medium,
        "Configured punctuation exceeds the table capacity",
        "Name fewer punctuation bytes in the preamble",
    ),
    lexical_error(
        lexical::INVALID_INPUT_RANGE,
        Severity::High,
        "Requested view lies outside the input buffer",
        "Pass a view contained in the input buffer",
    ),
    lexical_error(
        lexical::NOT_IMPLEMENTED,
        Severity::Medium,
        "Nested directive after an opening bracket is reserved",
        "Escape a punctuation byte or drop the escape",
    ),
    lexical_error(
        lexical::TOO_MANY_TOKENS,
        Severity::High,
        "Token limit exceeded",
        "Split the input or raise max_token_count in the build profile",
    ),
];

/// Look up registry metadata by code string
pub fn lookup(code: &str) -> Option<&'static ErrorMetadata> {
    REGISTRY.iter().find(|entry| entry.code.as_str() == code)
}

/// All registered error codes
pub fn registered() -> impl Iterator<Item = Code> {
    REGISTRY.iter().map(|entry| entry.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_codes_registered() {
        for code in lexical::ALL {
            assert!(code.metadata().is_some(), "{code}");
            assert_eq!(code.category(), "Lexical");
            assert!(code.requires_halt());
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<&str> = registered().map(|code| code.as_str()).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn test_unregistered_codes() {
        let code = success::TOKENIZATION_COMPLETE;
        assert!(code.metadata().is_none());
        assert_eq!(code.category(), "General");
        assert_eq!(code.severity(), Severity::Low);
        assert!(!code.requires_halt());
        assert_eq!(code.description(), None);
    }
}
