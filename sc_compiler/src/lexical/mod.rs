//! Lexical analysis
//!
//! [`Lexer`] is the pull-based core. The free functions here run it to
//! completion for callers that want a whole line at once, optionally
//! enforcing the build-time resource limits.

pub mod analyzer;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::SyntaxToken;
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};

pub use analyzer::{Lexer, LexerError, LexicalMetrics};

/// Lex a line to completion, end-of-file token included
pub fn tokenize(text: &str) -> Vec<SyntaxToken> {
    Lexer::new(text).collect()
}

/// Lex a line while enforcing source length and token count limits
pub fn tokenize_checked(text: &str) -> Result<Vec<SyntaxToken>, LexerError> {
    tokenize_checked_with_preferences(text, &LexicalPreferences::default())
}

pub fn tokenize_checked_with_preferences(
    text: &str,
    preferences: &LexicalPreferences,
) -> Result<Vec<SyntaxToken>, LexerError> {
    if text.len() > MAX_SOURCE_LENGTH {
        let error = LexerError::SourceTooLong { length: text.len() };
        log_error!(error.error_code(), "Source exceeds maximum length",
            span = Span::new(MAX_SOURCE_LENGTH, text.len()),
            "length" => text.len(),
            "limit" => MAX_SOURCE_LENGTH
        );
        return Err(error);
    }

    log_debug!("Starting lexical analysis",
        "source_length" => text.len(),
        "max_tokens_allowed" => MAX_TOKEN_COUNT
    );

    let mut tokens = Vec::new();
    for token in Lexer::new(text) {
        if !token.is_eof() && tokens.len() >= MAX_TOKEN_COUNT {
            let error = LexerError::TooManyTokens {
                count: tokens.len() + 1,
            };
            log_error!(error.error_code(), "Token limit exceeded",
                span = token.span(),
                "limit" => MAX_TOKEN_COUNT
            );
            return Err(error);
        }
        if preferences.log_token_trace {
            log_debug!("Token", "kind" => token.kind, "position" => token.position);
        }
        tokens.push(token);
    }

    if preferences.collect_detailed_metrics {
        let metrics = LexicalMetrics::from_tokens_with_preferences(&tokens, preferences);
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Lexical analysis completed",
            "tokens" => metrics.total_tokens,
            "numbers" => metrics.number_tokens,
            "operators" => metrics.operator_tokens,
            "bad_characters" => metrics.bad_tokens
        );
    } else {
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Lexical analysis completed",
            "tokens" => tokens.len().saturating_sub(1)
        );
    }

    Ok(tokens)
}

/// Lex a fragment that must form exactly one token
///
/// Returns `None` for empty input or when the fragment splits into more than
/// one token.
pub fn lex_single(text: &str) -> Option<SyntaxToken> {
    let mut lexer = Lexer::new(text);
    let token = lexer.next_token();
    if token.is_eof() || !lexer.next_token().is_eof() {
        return None;
    }
    Some(token)
}

/// Verify that every lexical code has registry metadata
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::BAD_CHARACTER,
        codes::lexical::SOURCE_TOO_LONG,
        codes::lexical::INVALID_NUMBER,
        codes::lexical::TOO_MANY_TOKENS,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Lexical limits initialized",
        "max_source_length" => MAX_SOURCE_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::SyntaxKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_tokenize_ends_with_single_end_of_file() {
        let tokens = tokenize("1+2");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn test_tokenize_checked_accepts_normal_input() {
        let tokens = tokenize_checked("(1 + 2) * 3").unwrap();
        assert_eq!(tokens, tokenize("(1 + 2) * 3"));
    }

    #[test]
    fn test_tokenize_checked_rejects_long_source() {
        let text = "1".repeat(MAX_SOURCE_LENGTH + 1);
        assert_matches!(
            tokenize_checked(&text),
            Err(LexerError::SourceTooLong { length }) if length == MAX_SOURCE_LENGTH + 1
        );
    }

    #[test]
    fn test_tokenize_checked_rejects_too_many_tokens() {
        let text = "+".repeat(MAX_TOKEN_COUNT + 1);
        assert!(text.len() <= MAX_SOURCE_LENGTH);
        assert_matches!(
            tokenize_checked(&text),
            Err(LexerError::TooManyTokens { count }) if count == MAX_TOKEN_COUNT + 1
        );
    }

    #[test]
    fn test_tokenize_checked_end_of_file_is_not_counted() {
        let text = "+".repeat(MAX_TOKEN_COUNT);
        let tokens = tokenize_checked(&text).unwrap();
        assert_eq!(tokens.len(), MAX_TOKEN_COUNT + 1);
        assert!(tokens[MAX_TOKEN_COUNT].is_eof());
    }

    #[test]
    fn test_lex_single() {
        assert_eq!(lex_single("42").map(|t| t.value), Some(Some(42)));
        assert_eq!(lex_single("  ").map(|t| t.kind), Some(SyntaxKind::WhitespaceToken));
        assert_eq!(lex_single("?").map(|t| t.kind), Some(SyntaxKind::BadToken));
        assert!(lex_single("").is_none());
        assert!(lex_single("1+").is_none());
    }

    #[test]
    fn test_tokens_are_self_describing() {
        for input in ["12 + (3*4) - 5 / 6", "  $x 007 ", "99999999999 )( é"] {
            for token in tokenize(input).iter().filter(|t| !t.is_eof()) {
                let relexed = lex_single(&token.text)
                    .unwrap_or_else(|| panic!("'{}' did not lex to one token", token.text));
                assert_eq!(relexed.kind, token.kind);
                assert_eq!(relexed.text, token.text);
                assert_eq!(relexed.value, token.value);
            }
        }
    }

    #[test]
    fn test_init_logging() {
        assert!(init_lexical_analysis_logging().is_ok());
    }
}
