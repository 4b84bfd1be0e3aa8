//! Byte ranges into an input buffer
//!
//! A [`Span`] never owns or copies bytes. Every span produced by the scanner
//! indexes the original input buffer, even when tokenization ran over a view.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset + length pair into an immutable input buffer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Span {
    /// Byte offset of the first byte (0-based)
    pub start: usize,
    /// Number of bytes covered; zero means absent
    pub len: usize,
}

impl Span {
    /// Create a new span
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Create a one-byte span
    pub const fn single(start: usize) -> Self {
        Self { start, len: 1 }
    }

    /// Create a span from half-open byte bounds
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self {
            start,
            len: end.saturating_sub(start),
        }
    }

    /// Span covering a whole buffer of `len` bytes
    pub const fn whole(len: usize) -> Self {
        Self { start: 0, len }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// Exclusive end offset, or `None` on overflow
    pub fn checked_end(&self) -> Option<usize> {
        self.start.checked_add(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if this span contains a byte offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Check if this span contains another span
    pub fn contains_span(&self, other: &Span) -> bool {
        other.start >= self.start && other.end() <= self.end()
    }

    /// Check that `start + len` stays inside a buffer of `buffer_len` bytes
    pub fn fits_within(&self, buffer_len: usize) -> bool {
        self.checked_end().is_some_and(|end| end <= buffer_len)
    }

    /// Combine with another span into one covering both
    pub fn merge(self, other: Self) -> Self {
        Self::from_bounds(self.start.min(other.start), self.end().max(other.end()))
    }

    /// Bytes of `input` covered by this span, `None` when out of range
    pub fn slice<'a>(&self, input: &'a [u8]) -> Option<&'a [u8]> {
        input.get(self.start..self.checked_end()?)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}
