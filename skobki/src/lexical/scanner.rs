//! Core scanner state machine
//!
//! One [`Scanner`] walks one input view. It starts in the configuration phase,
//! where [`Scanner::bootstrap`] may reconfigure the punctuation table from a
//! directive preamble, and moves to the content phase on the first content
//! token. End of input and errors are terminal.

use super::directive::parse_preamble;
use super::error::LexerError;
use super::escape::{resolve_literal, LiteralEscape};
use crate::config::compile_time::lexical::MAX_TOKEN_COUNT;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::punctuation::{plain_run_len, BracketDirection, ByteClass, PunctuationTable};
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success, log_warning};

/// Scan metrics, attached to the resulting token stream
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub text_tokens: usize,
    pub delimiter_tokens: usize,
    pub bracket_tokens: usize,
    pub directive_tokens: usize,
    pub open_brackets: usize,
    pub close_brackets: usize,
    pub escapes_resolved: usize,
    pub max_text_run: usize,
    pub directives_applied: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(
        &mut self,
        token: &Token,
        direction: Option<BracketDirection>,
        preferences: &LexicalPreferences,
    ) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token.kind {
            TokenKind::Text => self.text_tokens += 1,
            TokenKind::Delimiter => self.delimiter_tokens += 1,
            TokenKind::Bracket => {
                self.bracket_tokens += 1;
                match direction {
                    Some(BracketDirection::Open) => self.open_brackets += 1,
                    Some(BracketDirection::Close) => self.close_brackets += 1,
                    None => {}
                }
            }
            TokenKind::Directive => self.directive_tokens += 1,
        }
    }

    pub(crate) fn record_text_run(&mut self, length: usize, preferences: &LexicalPreferences) {
        self.max_text_run = self.max_text_run.max(length);

        if preferences.log_token_statistics {
            log_debug!("Text run scanned",
                "length" => length,
                "max_so_far" => self.max_text_run
            );
        }
    }

    pub(crate) fn record_escape(&mut self) {
        self.escapes_resolved += 1;
    }

    pub(crate) fn record_directives(&mut self, count: usize) {
        self.directives_applied += count;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Configuration,
    Content,
}

/// Single-pass tokenizer over one input view
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    view: Span,
    /// Offset into the view, not the input
    cursor: usize,
    is_eof: bool,
    error: Option<LexerError>,
    table: PunctuationTable,
    phase: Phase,
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
    token_count: usize,
    last_token: Option<Token>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `view` of `input` with the default table
    pub fn new(input: &'a [u8], view: Span) -> Result<Self, LexerError> {
        if !view.fits_within(input.len()) {
            let error = LexerError::InvalidInputRange {
                view,
                input_len: input.len(),
            };
            log_error!(error.error_code(), "Input view lies outside the input buffer",
                span = view,
                "input_len" => input.len()
            );
            return Err(error);
        }

        Ok(Self {
            input,
            view,
            cursor: 0,
            is_eof: view.is_empty(),
            error: None,
            table: PunctuationTable::default(),
            phase: Phase::Configuration,
            preferences: LexicalPreferences::default(),
            metrics: LexicalMetrics::default(),
            token_count: 0,
            last_token: None,
        })
    }

    /// Create a scanner over the whole input
    pub fn from_bytes(input: &'a [u8]) -> Self {
        Self {
            input,
            view: Span::whole(input.len()),
            cursor: 0,
            is_eof: input.is_empty(),
            error: None,
            table: PunctuationTable::default(),
            phase: Phase::Configuration,
            preferences: LexicalPreferences::default(),
            metrics: LexicalMetrics::default(),
            token_count: 0,
            last_token: None,
        }
    }

    /// Replace the punctuation table before scanning
    pub fn with_table(mut self, table: PunctuationTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_preferences(mut self, preferences: LexicalPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    // === ACCESSORS ===

    pub fn is_eof(&self) -> bool {
        self.is_eof
    }

    pub fn error(&self) -> Option<&LexerError> {
        self.error.as_ref()
    }

    /// Cursor relative to the view
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor as an input offset
    pub fn offset(&self) -> usize {
        self.view.start + self.cursor
    }

    pub fn table(&self) -> &PunctuationTable {
        &self.table
    }

    pub fn view(&self) -> Span {
        self.view
    }

    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Content tokens produced so far
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    // === STATE ===

    /// Bytes of the view; the window every relative offset indexes
    fn window(&self) -> &'a [u8] {
        let input: &'a [u8] = self.input;
        input
            .get(self.view.start..self.view.end())
            .unwrap_or_default()
    }

    fn peek(&self) -> Option<u8> {
        self.window().get(self.cursor).copied()
    }

    fn absolute(&self, relative: usize) -> usize {
        self.view.start + relative
    }

    /// Move the cursor forward and update the end-of-input flag
    fn advance(&mut self, by: usize) {
        self.cursor += by;
        if self.cursor >= self.view.len {
            self.cursor = self.view.len;
            self.is_eof = true;
        }
    }

    /// Record a terminal error, log it once, and hand it back
    fn fail(&mut self, error: LexerError) -> LexerError {
        let message = if self.preferences.include_offset_in_errors {
            format!("Tokenization failed at offset {}", error.offset())
        } else {
            "Tokenization failed".to_string()
        };

        log_error!(error.error_code(), &message,
            span = error.span(),
            "error" => &error,
            "tokens_processed" => self.token_count
        );

        self.error = Some(error.clone());
        error
    }

    fn emit(&mut self, token: Token) -> Token {
        let direction = if token.is_bracket() {
            token
                .first_byte(self.input)
                .and_then(|byte| self.table.bracket_direction(byte))
        } else {
            None
        };

        self.metrics
            .record_token(&token, direction, &self.preferences);
        self.token_count += 1;
        self.last_token = Some(token);
        token
    }

    // === BOOTSTRAP ===

    /// Read a directive preamble at the start of the view and reconfigure the
    /// table from it.
    ///
    /// Returns the `Directive` token covering the preamble, or `None` when the
    /// view does not start with one. Only valid before the first content
    /// token; later calls are ignored.
    pub fn bootstrap(&mut self) -> Result<Option<Token>, LexerError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        if self.phase != Phase::Configuration {
            log_warning!("Bootstrap ignored after content scanning started",
                "offset" => self.offset()
            );
            return Ok(None);
        }
        self.phase = Phase::Content;

        if self.is_eof {
            return Ok(None);
        }

        log_debug!("Directive bootstrap started",
            "offset" => self.offset(),
            "view_len" => self.view.len
        );

        let preamble = match parse_preamble(self.window(), self.view.start) {
            Ok(preamble) => preamble,
            Err(error) => return Err(self.fail(error)),
        };

        if preamble.is_empty() {
            log_debug!("No directive preamble found", "offset" => self.offset());
            return Ok(None);
        }

        let table = match preamble.to_table() {
            Ok(table) => table,
            Err(error) => return Err(self.fail(error)),
        };

        for directive in &preamble.directives {
            log_debug!("Directive applied",
                "class" => directive.class,
                "bytes" => directive.bytes.len(),
                "span" => directive.span
            );
        }

        self.table = table;
        self.metrics.record_directives(preamble.directives.len());
        self.advance(preamble.span.len);

        log_success!(codes::success::DIRECTIVES_APPLIED, "Directive preamble applied",
            "directives" => preamble.directives.len(),
            "preamble_len" => preamble.span.len,
            "table" => self.table.summary()
        );

        let token = Token::directive(preamble.span);
        self.metrics.record_token(&token, None, &self.preferences);
        Ok(Some(token))
    }

    // === CONTENT ===

    /// Produce the next token; `Ok(None)` at end of input. After an error,
    /// every call returns that error again.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexerError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        if self.is_eof {
            return Ok(None);
        }
        self.phase = Phase::Content;

        if self.token_count >= MAX_TOKEN_COUNT {
            let error = LexerError::TooManyTokens {
                offset: self.offset(),
                count: self.token_count,
            };
            return Err(self.fail(error));
        }

        let Some(byte) = self.peek() else {
            self.is_eof = true;
            return Ok(None);
        };

        let start = self.absolute(self.cursor);
        let token = match self.table.classify(byte) {
            ByteClass::Delimiter => {
                self.advance(1);
                Token::delimiter(start)
            }
            ByteClass::Bracket => {
                self.advance(1);
                Token::bracket(start)
            }
            ByteClass::Escape => self.scan_escape()?,
            ByteClass::Plain => {
                let len = plain_run_len(self.window(), self.cursor, &self.table);
                self.advance(len);
                self.metrics.record_text_run(len, &self.preferences);
                Token::text(Span::new(start, len))
            }
        };

        Ok(Some(self.emit(token)))
    }

    fn scan_escape(&mut self) -> Result<Token, LexerError> {
        let escape_at = self.cursor;
        match resolve_literal(self.window(), escape_at, &self.table) {
            LiteralEscape::Literal(body) => {
                self.advance(2);
                self.metrics.record_escape();
                Ok(Token::text(Span::new(self.absolute(body.start), body.len)))
            }
            LiteralEscape::AtEof => {
                let error = LexerError::InvalidEscape {
                    offset: self.absolute(escape_at),
                };
                Err(self.fail(error))
            }
            LiteralEscape::NotPunctuation(_) => {
                let offset = self.absolute(escape_at);
                let error = if self.follows_open_bracket(offset) {
                    LexerError::NotImplemented { offset }
                } else {
                    LexerError::InvalidEscape { offset }
                };
                Err(self.fail(error))
            }
        }
    }

    /// Check if the previous token is an opening bracket right before `offset`
    fn follows_open_bracket(&self, offset: usize) -> bool {
        self.last_token.is_some_and(|token| {
            token.is_bracket()
                && token.body.end() == offset
                && token
                    .first_byte(self.input)
                    .is_some_and(|byte| self.table.is_open_bracket(byte))
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }
        self.next_token().transpose()
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}
