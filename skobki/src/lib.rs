//! skobki: a configurable bracket-and-escape tokenizer
//!
//! Input bytes are split into text, delimiter and bracket tokens according to
//! a punctuation table. The table can come from the default configuration, the
//! caller, or a directive preamble at the start of the input itself.
//!
//! ```
//! let stream = skobki::tokenize(b"(Hello world)").unwrap();
//! assert_eq!(stream.len(), 5);
//! assert_eq!(stream.text(&stream.tokens()[1]), b"Hello");
//! ```

// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod punctuation;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{
    tokenize, tokenize_view, tokenize_view_with_directives, tokenize_with_directives,
    tokenize_with_directives_and_preferences, tokenize_with_preferences, tokenize_with_table,
    LexerError, LexicalMetrics, Scanner,
};
pub use logging::{init_global_logging, LogLevel};
pub use punctuation::{BracketDirection, ByteClass, PunctClass, PunctuationTable, TableError};
pub use tokens::{Token, TokenKind, TokenStream};
pub use utils::Span;
