//! Directive preamble parsing
//!
//! A preamble configures the punctuation table from the input itself:
//!
//! ```text
//! delimiters: 20 0a
//! brackets: 7b 7d
//! escape: 5c
//! {}
//! ```
//!
//! Each keyword may appear at most once, in any order, followed by hex pairs
//! and a newline. Spaces after the colon and between pairs are optional, so
//! `brackets:7b7d` is the same line as `brackets: 7b 7d`. The preamble is read
//! with the default table. It ends at a default bracket, at a bracket named by
//! an earlier `brackets:` line, once all three keywords are consumed, or at end
//! of input.
//!
//! The resulting table holds exactly the decoded bytes: a class the preamble
//! does not name is left empty.

use super::error::{DirectiveFault, LexerError};
use super::escape::{decode_hex_pair, hex_digit, resolve_hex_escape, HexFault};
use crate::config::compile_time::lexical::{MAX_DIRECTIVE_COUNT, PUNCTUATION_CAPACITY};
use crate::punctuation::{plain_run_len, ByteClass, PunctClass, PunctuationTable};
use crate::utils::Span;

/// One parsed directive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub class: PunctClass,
    pub bytes: Vec<u8>,
    /// Whole line, keyword through newline, in input offsets
    pub span: Span,
}

/// Parsed preamble, not yet applied to a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preamble {
    /// Directives in input order
    pub directives: Vec<Directive>,
    /// First keyword through the newline of the last directive line, in
    /// input offsets; empty when no keyword was found
    pub span: Span,
}

impl Preamble {
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn bytes(&self, class: PunctClass) -> Option<&[u8]> {
        self.directives
            .iter()
            .find(|directive| directive.class == class)
            .map(|directive| directive.bytes.as_slice())
    }

    /// Table built from the decoded bytes alone
    pub fn to_table(&self) -> Result<PunctuationTable, LexerError> {
        let class_bytes = |class| self.bytes(class).map(<[u8]>::to_vec).unwrap_or_default();

        PunctuationTable::new(
            class_bytes(PunctClass::Delimiter),
            class_bytes(PunctClass::Bracket),
            class_bytes(PunctClass::Escape),
        )
        .map_err(|error| LexerError::from_table(error, self.span.start))
    }
}

/// Parse a preamble at the start of `window`; `base` is the absolute offset
/// of `window[0]` in the input.
pub fn parse_preamble(window: &[u8], base: usize) -> Result<Preamble, LexerError> {
    let defaults = PunctuationTable::default();
    let mut parser = PreambleParser {
        window,
        base,
        defaults: &defaults,
        cursor: 0,
        punctuation_count: 0,
    };
    parser.parse()
}

struct PreambleParser<'a> {
    window: &'a [u8],
    base: usize,
    defaults: &'a PunctuationTable,
    cursor: usize,
    /// Bytes named by all lists read so far
    punctuation_count: usize,
}

impl PreambleParser<'_> {
    fn parse(&mut self) -> Result<Preamble, LexerError> {
        let mut directives: Vec<Directive> = Vec::new();
        let mut end = 0;

        while directives.len() < MAX_DIRECTIVE_COUNT {
            let Some(&byte) = self.window.get(self.cursor) else {
                break;
            };
            if configured_bracket(&directives, byte) {
                break;
            }

            match self.defaults.classify(byte) {
                ByteClass::Bracket => break,
                ByteClass::Delimiter => self.cursor += 1,
                ByteClass::Escape => {
                    return Err(LexerError::InvalidEscape {
                        offset: self.absolute(self.cursor),
                    })
                }
                ByteClass::Plain => {
                    let start = self.cursor;
                    let run = plain_run_len(self.window, start, self.defaults);
                    let word = &self.window[start..start + run];
                    // List items may follow the colon without a space
                    let len = word
                        .iter()
                        .position(|&b| b == b':')
                        .map_or(run, |colon| colon + 1);

                    let class = PunctClass::from_keyword(&word[..len]).ok_or_else(|| {
                        LexerError::directive(self.absolute(start), DirectiveFault::UnknownKeyword)
                    })?;
                    if directives.iter().any(|directive| directive.class == class) {
                        return Err(LexerError::directive(
                            self.absolute(start),
                            DirectiveFault::RepeatedKeyword,
                        ));
                    }

                    self.cursor += len;
                    let bytes = self.read_list(start)?;
                    directives.push(Directive {
                        class,
                        bytes,
                        span: Span::from_bounds(self.absolute(start), self.absolute(self.cursor)),
                    });
                    end = self.cursor;
                }
            }
        }

        Ok(Preamble {
            directives,
            span: Span::new(self.base, end),
        })
    }

    /// Read list items after a keyword, through the terminating newline
    fn read_list(&mut self, keyword_at: usize) -> Result<Vec<u8>, LexerError> {
        let mut bytes = Vec::new();

        loop {
            let Some(&byte) = self.window.get(self.cursor) else {
                return Err(LexerError::directive(
                    self.absolute(self.cursor),
                    DirectiveFault::MissingNewline,
                ));
            };

            match self.defaults.classify(byte) {
                ByteClass::Delimiter if byte == b'\n' => {
                    self.cursor += 1;
                    break;
                }
                ByteClass::Delimiter => self.cursor += 1,
                ByteClass::Escape => {
                    let (value, consumed) = resolve_hex_escape(self.window, self.cursor)
                        .map_err(|fault| self.hex_error(fault))?;
                    self.cursor += consumed;
                    self.push(&mut bytes, value)?;
                }
                ByteClass::Plain => {
                    let start = self.cursor;
                    let len = plain_run_len(self.window, start, self.defaults);
                    let run = &self.window[start..start + len];
                    if let Some(at) = run.iter().position(|b| hex_digit(*b).is_none()) {
                        return Err(LexerError::directive(
                            self.absolute(start + at),
                            DirectiveFault::NonHexDigit,
                        ));
                    }
                    if len % 2 == 1 {
                        let fault = if start + len == self.window.len() {
                            DirectiveFault::TruncatedPair
                        } else {
                            DirectiveFault::MalformedItem
                        };
                        return Err(LexerError::directive(self.absolute(start), fault));
                    }

                    // An even run is consecutive pairs: `7b7d` names two bytes
                    for at in (start..start + len).step_by(2) {
                        let value = decode_hex_pair(self.window, at)
                            .map_err(|fault| self.hex_error(fault))?;
                        self.cursor = at + 2;
                        self.push(&mut bytes, value)?;
                    }
                }
                ByteClass::Bracket => {
                    return Err(LexerError::directive(
                        self.absolute(self.cursor),
                        DirectiveFault::MalformedItem,
                    ))
                }
            }
        }

        if bytes.is_empty() {
            return Err(LexerError::directive(
                self.absolute(keyword_at),
                DirectiveFault::EmptyList,
            ));
        }

        Ok(bytes)
    }

    fn push(&mut self, bytes: &mut Vec<u8>, value: u8) -> Result<(), LexerError> {
        self.punctuation_count += 1;
        if self.punctuation_count > PUNCTUATION_CAPACITY {
            return Err(LexerError::TooMuchPunctuation {
                offset: self.absolute(self.cursor.saturating_sub(1)),
                count: self.punctuation_count,
            });
        }
        bytes.push(value);
        Ok(())
    }

    fn hex_error(&self, fault: HexFault) -> LexerError {
        match fault {
            HexFault::AtEof => LexerError::InvalidEscape {
                offset: self.absolute(self.cursor),
            },
            HexFault::NonHex(at) => LexerError::directive(self.absolute(at), DirectiveFault::NonHexDigit),
            HexFault::Truncated(at) => {
                LexerError::directive(self.absolute(at), DirectiveFault::TruncatedPair)
            }
        }
    }

    fn absolute(&self, relative: usize) -> usize {
        self.base + relative
    }
}

fn configured_bracket(directives: &[Directive], byte: u8) -> bool {
    directives
        .iter()
        .any(|directive| directive.class == PunctClass::Bracket && directive.bytes.contains(&byte))
}
