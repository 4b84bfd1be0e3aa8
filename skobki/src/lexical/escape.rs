//! Escape resolution
//!
//! Two dialects share the escape byte. In content, an escape makes the next
//! punctuation byte literal text. In the directive preamble, an escape
//! introduces a hex pair naming a punctuation byte. Offsets here are relative
//! to the scanned window.

use crate::punctuation::PunctuationTable;
use crate::utils::Span;

/// Outcome of resolving a content escape at `at`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralEscape {
    /// The escaped byte, as a one-byte body
    Literal(Span),
    /// Escape byte is the last byte of the window
    AtEof,
    /// The byte after the escape is plain; holds its offset
    NotPunctuation(usize),
}

/// Resolve a content escape whose escape byte sits at `at`
pub fn resolve_literal(window: &[u8], at: usize, table: &PunctuationTable) -> LiteralEscape {
    let next = at + 1;
    match window.get(next) {
        None => LiteralEscape::AtEof,
        Some(byte) if table.is_punctuation(*byte) => LiteralEscape::Literal(Span::single(next)),
        Some(_) => LiteralEscape::NotPunctuation(next),
    }
}

/// Value of one hex digit, either case
pub fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Failure decoding a hex pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexFault {
    /// Nothing follows the escape byte
    AtEof,
    /// Byte at this offset is not a hex digit
    NonHex(usize),
    /// Window ends at this offset before two digits were read
    Truncated(usize),
}

/// Decode the two bytes at `at` as one hex pair
pub fn decode_hex_pair(window: &[u8], at: usize) -> Result<u8, HexFault> {
    let mut value = 0u8;
    for offset in at..at + 2 {
        let byte = *window.get(offset).ok_or(HexFault::Truncated(offset))?;
        let digit = hex_digit(byte).ok_or(HexFault::NonHex(offset))?;
        value = (value << 4) | digit;
    }
    Ok(value)
}

/// Resolve a directive escape at `at`: the escape byte plus one hex pair.
/// Returns the decoded byte and the number of bytes consumed.
pub fn resolve_hex_escape(window: &[u8], at: usize) -> Result<(u8, usize), HexFault> {
    if at + 1 >= window.len() {
        return Err(HexFault::AtEof);
    }
    decode_hex_pair(window, at + 1).map(|byte| (byte, 3))
}
