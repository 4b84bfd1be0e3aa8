//! Shared primitive types used by the scanner and the token stream

pub mod span;

pub use span::Span;
