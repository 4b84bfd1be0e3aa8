//! Tokenization result: tokens plus the context needed to read them
//!
//! A [`TokenStream`] borrows the input it was produced from, so token bodies
//! can be resolved to bytes without copying.

use crate::lexical::LexicalMetrics;
use crate::punctuation::{BracketDirection, PunctuationTable};
use crate::tokens::token::{Token, TokenKind};
use crate::utils::Span;

/// Ordered tokens of one input view, with the table that produced them
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    input: &'a [u8],
    view: Span,
    tokens: Vec<Token>,
    table: PunctuationTable,
    metrics: LexicalMetrics,
    /// Navigation cursor into `tokens`
    position: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(
        input: &'a [u8],
        view: Span,
        tokens: Vec<Token>,
        table: PunctuationTable,
        metrics: LexicalMetrics,
    ) -> Self {
        Self {
            input,
            view,
            tokens,
            table,
            metrics,
            position: 0,
        }
    }

    // === ACCESS ===

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// View of the input that was tokenized, in input offsets
    pub fn view(&self) -> Span {
        self.view
    }

    /// Table in effect after bootstrap
    pub fn table(&self) -> &PunctuationTable {
        &self.table
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    // === BODIES ===

    /// Body bytes of a token from this stream
    pub fn text(&self, token: &Token) -> &'a [u8] {
        token.bytes(self.input).unwrap_or_default()
    }

    /// Body as UTF-8, `None` when the body is not valid UTF-8
    pub fn text_str(&self, token: &Token) -> Option<&'a str> {
        std::str::from_utf8(self.text(token)).ok()
    }

    /// Concatenation of every token body in order.
    ///
    /// Equals the input view exactly when it holds no escapes and the
    /// directive token, if any, was kept.
    pub fn reconstruct(&self) -> Vec<u8> {
        self.tokens
            .iter()
            .flat_map(|token| self.text(token).iter().copied())
            .collect()
    }

    // === FILTERING ===

    pub fn of_kind(&self, kind: TokenKind) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(move |token| token.kind == kind)
    }

    pub fn count_kind(&self, kind: TokenKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Tokens other than delimiters
    pub fn significant(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|token| !token.is_delimiter())
    }

    /// Directive token kept from bootstrap, if any
    pub fn directive(&self) -> Option<&Token> {
        self.tokens.iter().find(|token| token.is_directive())
    }

    /// Direction of a bracket token under this stream's table
    pub fn bracket_direction(&self, token: &Token) -> Option<BracketDirection> {
        if !token.is_bracket() {
            return None;
        }
        self.table.bracket_direction(token.first_byte(self.input)?)
    }

    /// Check that every opening bracket is closed by its partner, in order
    pub fn brackets_balanced(&self) -> bool {
        let mut open: Vec<u8> = Vec::new();
        for token in self.of_kind(TokenKind::Bracket) {
            let Some(byte) = token.first_byte(self.input) else {
                return false;
            };
            match self.table.bracket_direction(byte) {
                Some(BracketDirection::Open) => open.push(byte),
                Some(BracketDirection::Close) => {
                    if open.pop().and_then(|b| self.table.matching_bracket(b)) != Some(byte) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        open.is_empty()
    }

    // === NAVIGATION ===

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position + 1)
    }

    pub fn advance(&mut self) -> Option<&Token> {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        self.current()
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl<'s, 'a> IntoIterator for &'s TokenStream<'a> {
    type Item = &'s Token;
    type IntoIter = std::slice::Iter<'s, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
