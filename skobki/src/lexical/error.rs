//! Lexical errors
//!
//! Every error is terminal for the scanner that produced it and carries the
//! absolute input offset where it was detected.

use crate::config::compile_time::lexical::{MAX_TOKEN_COUNT, PUNCTUATION_CAPACITY};
use crate::logging::{codes, Code};
use crate::punctuation::TableError;
use crate::utils::Span;

/// What was wrong with a directive preamble
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveFault {
    #[error("unknown directive keyword")]
    UnknownKeyword,
    #[error("directive keyword repeated")]
    RepeatedKeyword,
    #[error("directive list is empty")]
    EmptyList,
    #[error("list item is not a single hex pair")]
    MalformedItem,
    #[error("non-hex digit in hex pair")]
    NonHexDigit,
    #[error("hex pair truncated by end of input")]
    TruncatedPair,
    #[error("directive line is missing its newline")]
    MissingNewline,
}

/// Lexical analysis errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid escape at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("Invalid directive at offset {offset}: {fault}")]
    InvalidDirective { offset: usize, fault: DirectiveFault },

    #[error("Too much punctuation at offset {offset}: {count} bytes (max {PUNCTUATION_CAPACITY})")]
    TooMuchPunctuation { offset: usize, count: usize },

    #[error("Input view {view} lies outside an input of {input_len} bytes")]
    InvalidInputRange { view: Span, input_len: usize },

    #[error("Nested directive at offset {offset} is not implemented")]
    NotImplemented { offset: usize },

    #[error("Too many tokens at offset {offset}: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { offset: usize, count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> Code {
        match self {
            LexerError::InvalidEscape { .. } => codes::lexical::INVALID_ESCAPE,
            LexerError::InvalidDirective { .. } => codes::lexical::INVALID_DIRECTIVE,
            LexerError::TooMuchPunctuation { .. } => codes::lexical::TOO_MUCH_PUNCTUATION,
            LexerError::InvalidInputRange { .. } => codes::lexical::INVALID_INPUT_RANGE,
            LexerError::NotImplemented { .. } => codes::lexical::NOT_IMPLEMENTED,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    /// Absolute input offset of the offending byte
    pub fn offset(&self) -> usize {
        match self {
            LexerError::InvalidEscape { offset }
            | LexerError::InvalidDirective { offset, .. }
            | LexerError::TooMuchPunctuation { offset, .. }
            | LexerError::NotImplemented { offset }
            | LexerError::TooManyTokens { offset, .. } => *offset,
            LexerError::InvalidInputRange { view, .. } => view.start,
        }
    }

    /// Span attached to the logged event
    pub fn span(&self) -> Span {
        match self {
            LexerError::InvalidInputRange { view, .. } => *view,
            _ => Span::single(self.offset()),
        }
    }

    pub fn requires_halt(&self) -> bool {
        self.error_code().requires_halt()
    }

    pub(crate) fn directive(offset: usize, fault: DirectiveFault) -> Self {
        LexerError::InvalidDirective { offset, fault }
    }

    pub(crate) fn from_table(error: TableError, offset: usize) -> Self {
        match error {
            TableError::TooMuchPunctuation { count } => {
                LexerError::TooMuchPunctuation { offset, count }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LexerError::InvalidEscape { offset: 0 }.error_code(),
            codes::lexical::INVALID_ESCAPE
        );
        assert_eq!(
            LexerError::directive(3, DirectiveFault::EmptyList).error_code(),
            codes::lexical::INVALID_DIRECTIVE
        );
        assert_eq!(
            LexerError::NotImplemented { offset: 1 }.error_code(),
            codes::lexical::NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_offsets_and_spans() {
        let error = LexerError::InvalidInputRange {
            view: Span::new(4, 10),
            input_len: 8,
        };
        assert_eq!(error.offset(), 4);
        assert_eq!(error.span(), Span::new(4, 10));
        assert_eq!(
            LexerError::TooManyTokens { offset: 9, count: 2 }.span(),
            Span::single(9)
        );
    }

    #[test]
    fn test_messages() {
        let error = LexerError::directive(12, DirectiveFault::NonHexDigit);
        assert_eq!(
            error.to_string(),
            "Invalid directive at offset 12: non-hex digit in hex pair"
        );
        let error = LexerError::from_table(TableError::TooMuchPunctuation { count: 20 }, 5);
        assert!(error.to_string().contains("20 bytes"));
        assert!(error.requires_halt());
    }
}
