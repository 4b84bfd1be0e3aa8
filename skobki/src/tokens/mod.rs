//! Token system for the skobki scanner
//!
//! Tokens carry a kind and a [`Span`] into the original input; they never copy
//! bytes. A [`TokenStream`] bundles the tokens of one tokenization with the
//! input they index, the punctuation table in effect and the scan metrics.
//!
//! ## Token kinds
//!
//! - **Text**: a maximal run of plain bytes, or one escaped punctuation byte
//! - **Delimiter**: one delimiter byte
//! - **Bracket**: one bracket byte; direction comes from the table
//! - **Directive**: the preamble consumed by bootstrap

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::TokenStream;

pub use crate::utils::Span;
