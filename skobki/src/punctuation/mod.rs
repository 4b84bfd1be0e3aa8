//! Punctuation table and byte classifier
//!
//! The table holds the bytes of the three punctuation classes; the classifier
//! maps any input byte to plain text or one of those classes. Both the
//! directive bootstrap and the content scanner classify through here.

pub mod classifier;
pub mod table;

pub use classifier::{classify, plain_run_len, ByteClass, PunctClass};
pub use table::{BracketDirection, PunctuationTable, TableError};
