//! Token kinds and the span-carrying token value

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a token produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Plain run, or one escaped punctuation byte
    Text,
    /// One delimiter byte; never coalesced
    Delimiter,
    /// One bracket byte, opening or closing
    Bracket,
    /// Directive preamble consumed by bootstrap
    Directive,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Text => "text",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Bracket => "bracket",
            TokenKind::Directive => "directive",
        }
    }

    /// Delimiter and bracket tokens are always one byte long
    pub fn is_punctuation(&self) -> bool {
        matches!(self, TokenKind::Delimiter | TokenKind::Bracket)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token: a kind plus the span of its body in the original input.
///
/// For an escaped literal the body is the single byte after the escape byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub body: Span,
}

impl Token {
    pub fn new(kind: TokenKind, body: Span) -> Self {
        Self { kind, body }
    }

    pub fn text(body: Span) -> Self {
        Self::new(TokenKind::Text, body)
    }

    pub fn delimiter(offset: usize) -> Self {
        Self::new(TokenKind::Delimiter, Span::single(offset))
    }

    pub fn bracket(offset: usize) -> Self {
        Self::new(TokenKind::Bracket, Span::single(offset))
    }

    pub fn directive(body: Span) -> Self {
        Self::new(TokenKind::Directive, body)
    }

    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }

    pub fn is_delimiter(&self) -> bool {
        self.kind == TokenKind::Delimiter
    }

    pub fn is_bracket(&self) -> bool {
        self.kind == TokenKind::Bracket
    }

    pub fn is_directive(&self) -> bool {
        self.kind == TokenKind::Directive
    }

    /// Body bytes, `None` if the span does not index `input`
    pub fn bytes<'a>(&self, input: &'a [u8]) -> Option<&'a [u8]> {
        self.body.slice(input)
    }

    /// First body byte; the bracket or delimiter byte for punctuation tokens
    pub fn first_byte(&self, input: &[u8]) -> Option<u8> {
        input.get(self.body.start).copied()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.body)
    }
}
