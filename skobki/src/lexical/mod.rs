//! Lexical analysis module
//!
//! Turns a byte buffer, or a view of one, into a [`TokenStream`]. The optional
//! directive bootstrap runs first and may reconfigure the punctuation table
//! before any content is scanned.

pub mod directive;
pub mod error;
pub mod escape;
pub mod scanner;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::punctuation::PunctuationTable;
use crate::tokens::TokenStream;
use crate::utils::Span;
use crate::{log_debug, log_info, log_success};

pub use directive::{parse_preamble, Directive, Preamble};
pub use error::{DirectiveFault, LexerError};
pub use escape::{decode_hex_pair, LiteralEscape};
pub use scanner::{LexicalMetrics, Scanner};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize a whole buffer with the default table
pub fn tokenize(input: &[u8]) -> Result<TokenStream<'_>, LexerError> {
    run(Scanner::from_bytes(input), false)
}

/// Tokenize one view of a buffer; token spans stay input offsets
pub fn tokenize_view(input: &[u8], view: Span) -> Result<TokenStream<'_>, LexerError> {
    run(Scanner::new(input, view)?, false)
}

/// Tokenize a whole buffer, reading a directive preamble first
pub fn tokenize_with_directives(input: &[u8]) -> Result<TokenStream<'_>, LexerError> {
    run(Scanner::from_bytes(input), true)
}

/// Tokenize one view, reading a directive preamble at its start
pub fn tokenize_view_with_directives(
    input: &[u8],
    view: Span,
) -> Result<TokenStream<'_>, LexerError> {
    run(Scanner::new(input, view)?, true)
}

/// Tokenize a view with a caller-supplied table
pub fn tokenize_with_table(
    input: &[u8],
    view: Span,
    table: PunctuationTable,
) -> Result<TokenStream<'_>, LexerError> {
    run(Scanner::new(input, view)?.with_table(table), false)
}

/// Tokenize a view with custom runtime preferences (limits stay compile-time)
pub fn tokenize_with_preferences(
    input: &[u8],
    view: Span,
    preferences: LexicalPreferences,
) -> Result<TokenStream<'_>, LexerError> {
    run(Scanner::new(input, view)?.with_preferences(preferences), false)
}

/// Directive bootstrap plus custom runtime preferences
pub fn tokenize_with_directives_and_preferences(
    input: &[u8],
    view: Span,
    preferences: LexicalPreferences,
) -> Result<TokenStream<'_>, LexerError> {
    run(Scanner::new(input, view)?.with_preferences(preferences), true)
}

/// Create a scanner over a whole buffer
pub fn create_scanner(input: &[u8]) -> Scanner<'_> {
    Scanner::from_bytes(input)
}

/// Create a scanner with custom runtime preferences
pub fn create_scanner_with_preferences(
    input: &[u8],
    preferences: LexicalPreferences,
) -> Scanner<'_> {
    Scanner::from_bytes(input).with_preferences(preferences)
}

fn run(mut scanner: Scanner<'_>, bootstrap: bool) -> Result<TokenStream<'_>, LexerError> {
    let mut tokens = Vec::new();

    if bootstrap {
        if let Some(directive) = scanner.bootstrap()? {
            if scanner.preferences().include_directive_token {
                tokens.push(directive);
            }
        }
    }

    while let Some(token) = scanner.next_token()? {
        tokens.push(token);
    }

    let metrics = scanner.metrics().clone();
    log_success!(codes::success::TOKENIZATION_COMPLETE,
        "Tokenization completed successfully",
        "token_count" => tokens.len(),
        "view" => scanner.view(),
        "directives_applied" => metrics.directives_applied
    );

    if scanner.preferences().log_token_statistics {
        log_info!("Token statistics",
            "text" => metrics.text_tokens,
            "delimiters" => metrics.delimiter_tokens,
            "brackets" => metrics.bracket_tokens,
            "escapes" => metrics.escapes_resolved,
            "max_text_run" => metrics.max_text_run
        );
    }

    Ok(TokenStream::new(
        scanner.input(),
        scanner.view(),
        tokens,
        scanner.table().clone(),
        metrics,
    ))
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Validate lexical error codes and limits (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    for code in codes::lexical::ALL {
        if code.metadata().is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Lexical limits initialized",
        "punctuation_capacity" => PUNCTUATION_CAPACITY,
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_directive_count" => MAX_DIRECTIVE_COUNT
    );

    Ok(())
}

/// Validate that compile-time limits are usable
pub fn validate_tokenization() -> Result<(), String> {
    if PUNCTUATION_CAPACITY < PunctuationTable::default().len() {
        return Err("PUNCTUATION_CAPACITY cannot hold the default table".to_string());
    }
    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }
    if MAX_DIRECTIVE_COUNT != 3 {
        return Err("MAX_DIRECTIVE_COUNT must match the three directive keywords".to_string());
    }

    Ok(())
}

/// Compile-time lexical limits, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalLimits {
    pub punctuation_capacity: usize,
    pub max_token_count: usize,
    pub max_directive_count: usize,
}

pub fn get_lexical_limits() -> LexicalLimits {
    LexicalLimits {
        punctuation_capacity: PUNCTUATION_CAPACITY,
        max_token_count: MAX_TOKEN_COUNT,
        max_directive_count: MAX_DIRECTIVE_COUNT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenKind};
    use assert_matches::assert_matches;

    #[test]
    fn test_validation() {
        assert!(init_lexical_analysis_logging().is_ok());
        assert!(validate_tokenization().is_ok());
        assert_eq!(get_lexical_limits().max_directive_count, 3);
    }

    #[test]
    fn test_reconstruct_without_escapes() {
        for input in [
            &b"(Hello world)"[..],
            &b"((version 1.0)(debug true)(timeout 30))"[..],
            &b"  a  (b\n\nc) d "[..],
            &b""[..],
            "(caf\u{e9} \u{26a1})".as_bytes(),
        ] {
            let stream = tokenize(input).unwrap();
            assert_eq!(stream.reconstruct(), input.to_vec());
        }
    }

    #[test]
    fn test_token_bodies_retokenize_to_themselves() {
        let input = b"(alpha (beta gamma)\ndelta)";
        let stream = tokenize(input).unwrap();

        for token in stream.iter() {
            let again = tokenize_view(input, token.body).unwrap();
            assert_eq!(again.tokens(), &[*token]);
        }
    }

    #[test]
    fn test_view_tokenization() {
        let input = b"ignored (a b) ignored";
        let stream = tokenize_view(input, Span::new(8, 5)).unwrap();
        assert_eq!(stream.len(), 5);
        assert_eq!(stream.text(&stream.tokens()[1]), b"a");
        assert_eq!(stream.view(), Span::new(8, 5));
        assert_eq!(stream.reconstruct(), b"(a b)".to_vec());

        assert_matches!(
            tokenize_view(input, Span::new(15, 10)),
            Err(LexerError::InvalidInputRange { .. })
        );
    }

    #[test]
    fn test_directives_configure_table() {
        let input = b"delimiters: 20 0a\nbrackets: 7b 7d\nescape: 5c\n{}";
        let stream = tokenize_with_directives(input).unwrap();

        assert_eq!(stream.len(), 2);
        assert!(stream.iter().all(Token::is_bracket));
        assert_eq!(stream.text(&stream.tokens()[0]), b"{");
        assert_eq!(stream.text(&stream.tokens()[1]), b"}");
        assert_eq!(stream.table().brackets(), b"{}");
        assert!(stream.brackets_balanced());
    }

    #[test]
    fn test_directive_token_kept_on_request() {
        let input = b"brackets: 28 29\nescape: 5c\n(a\\)b)";
        let preferences = LexicalPreferences {
            include_directive_token: true,
            ..Default::default()
        };
        let stream =
            tokenize_with_directives_and_preferences(input, Span::whole(input.len()), preferences)
                .unwrap();

        let directive = stream.directive().unwrap();
        assert_eq!(stream.text(directive), b"brackets: 28 29\nescape: 5c\n");
        assert_eq!(stream.count_kind(TokenKind::Text), 3);
        assert_eq!(stream.tokens()[0].kind, TokenKind::Directive);
    }

    #[test]
    fn test_directive_token_dropped_by_default() {
        let input = b"escape: 5c\n(a)";
        let preferences = LexicalPreferences {
            include_directive_token: false,
            ..Default::default()
        };
        let stream =
            tokenize_with_directives_and_preferences(input, Span::whole(input.len()), preferences)
                .unwrap();
        assert!(stream.directive().is_none());
        // No `brackets:` line, so the active table has no brackets
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.text(&stream.tokens()[0]), b"(a)");
    }

    #[test]
    fn test_compact_directive_lines() {
        let stream = tokenize_with_directives(b"escape:5c\nbrackets: 7b7d\n{a}").unwrap();
        let kinds: Vec<TokenKind> = stream.iter().map(|token| token.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Bracket, TokenKind::Text, TokenKind::Bracket]);
        assert_eq!(stream.table().escapes(), b"\\");
    }

    #[test]
    fn test_configured_bracket_starts_content() {
        let stream = tokenize_with_directives(b"brackets: 7b 7d\n{a}").unwrap();
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.text(&stream.tokens()[0]), b"{");
        assert!(stream.brackets_balanced());
    }

    #[test]
    fn test_preamble_filling_capacity() {
        let delimiters: Vec<String> =
            (1..PUNCTUATION_CAPACITY - 1).map(|i| format!("{:02x}", i % 256)).collect();
        let input = format!("delimiters: {}\nbrackets: 28 29\n(a)", delimiters.join(" "));
        let stream = tokenize_with_directives(input.as_bytes()).unwrap();
        assert_eq!(stream.table().len(), PUNCTUATION_CAPACITY);
        assert_eq!(stream.len(), 3);
    }

    #[test]
    fn test_blank_line_after_preamble_is_content() {
        let full = tokenize_with_directives(b"delimiters: 0a\nbrackets: 28 29\nescape: 60\n\n(a)").unwrap();
        let partial = tokenize_with_directives(b"delimiters: 0a\nbrackets: 28 29\n\n(a)").unwrap();
        assert!(full.tokens()[0].is_delimiter());
        assert!(partial.tokens()[0].is_delimiter());
        assert_eq!(full.len(), partial.len());
    }

    #[test]
    fn test_directive_errors() {
        assert_matches!(
            tokenize_with_directives(b"delimiters: 20\ndelimiters: 20\n()"),
            Err(LexerError::InvalidDirective { fault: DirectiveFault::RepeatedKeyword, .. })
        );
        assert_matches!(
            tokenize_with_directives(b"brackets: 7b 7g\n{}"),
            Err(LexerError::InvalidDirective { fault: DirectiveFault::NonHexDigit, .. })
        );
        assert_matches!(
            tokenize_with_directives(b"escape: 5c"),
            Err(LexerError::InvalidDirective { fault: DirectiveFault::MissingNewline, .. })
        );
    }

    #[test]
    fn test_capacity_overflow() {
        let items: Vec<String> = (0..=PUNCTUATION_CAPACITY).map(|i| format!("{:02x}", i % 256)).collect();
        let input = format!("delimiters: {}\n()", items.join(" "));
        assert_matches!(
            tokenize_with_directives(input.as_bytes()),
            Err(LexerError::TooMuchPunctuation { .. })
        );
    }

    #[test]
    fn test_reserved_nested_directive() {
        assert_matches!(
            tokenize(b"(`s|Hello world!)"),
            Err(LexerError::NotImplemented { offset: 1 })
        );
    }

    #[test]
    fn test_custom_table_and_preferences() {
        let table = PunctuationTable::new(vec![b'|'], b"<>".to_vec(), vec![b'!']).unwrap();
        let input = b"<a|b!>>";
        let stream = tokenize_with_table(input, Span::whole(input.len()), table).unwrap();
        assert_eq!(stream.len(), 6);
        assert_eq!(stream.text(&stream.tokens()[4]), b">");

        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            log_token_statistics: true,
            ..Default::default()
        };
        let stream = tokenize_with_preferences(b"(a)", Span::whole(3), preferences).unwrap();
        assert_eq!(stream.metrics().total_tokens, 3);
        assert_eq!(stream.metrics().bracket_tokens, 0);
    }

    #[test]
    fn test_errors_are_logged_with_code() {
        use crate::logging::{LogLevel, LoggingService, MemoryLogger};
        use std::sync::Arc;

        let logger = Arc::new(MemoryLogger::new());
        let service = Arc::new(LoggingService::new(logger.clone(), LogLevel::Debug));
        // Only this test installs a global logger
        crate::logging::init_global_logging_with_service(service).unwrap();

        assert!(tokenize(b"ok `").is_err());
        assert!(logger.has_error(codes::lexical::INVALID_ESCAPE));

        let error = logger
            .errors()
            .into_iter()
            .find(|event| event.code == codes::lexical::INVALID_ESCAPE && event.span == Some(Span::single(3)))
            .unwrap();
        assert_eq!(error.context.get("tokens_processed").map(String::as_str), Some("2"));

        tokenize(b"(a)").unwrap();
        assert!(logger.has_success(codes::success::TOKENIZATION_COMPLETE));
    }

    #[test]
    fn test_create_scanner() {
        let preferences = LexicalPreferences {
            include_offset_in_errors: false,
            ..Default::default()
        };
        let scanner = create_scanner_with_preferences(b"a", preferences);
        assert!(!scanner.preferences().include_offset_in_errors);
        assert_eq!(create_scanner(b"a b").count(), 3);
    }
}
