//! Pull-based lexer for arithmetic expressions
//!
//! [`Lexer::next_token`] scans one token per call and never fails: characters
//! it does not recognize come back as bad tokens. Once the input is exhausted
//! every further call returns the same end-of-file token.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{SyntaxKind, SyntaxToken};
use std::collections::HashMap;

/// Resource limit violations reported before parsing starts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Source too long: {length} bytes (max {MAX_SOURCE_LENGTH})")]
    SourceTooLong { length: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::SourceTooLong { .. } => codes::lexical::SOURCE_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }
}

/// Token statistics for one lexed line
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub number_tokens: usize,
    pub operator_tokens: usize,
    pub parenthesis_tokens: usize,
    pub whitespace_tokens: usize,
    pub bad_tokens: usize,
    /// Number tokens whose digits do not fit in an `i32`
    pub overflowed_numbers: usize,
    pub max_number_length: usize,

    // Only populated when operator tracking is enabled
    pub operator_usage_patterns: HashMap<SyntaxKind, usize>,
}

impl LexicalMetrics {
    /// Collect metrics over a token slice using default preferences
    pub fn from_tokens(tokens: &[SyntaxToken]) -> Self {
        Self::from_tokens_with_preferences(tokens, &LexicalPreferences::default())
    }

    pub fn from_tokens_with_preferences(
        tokens: &[SyntaxToken],
        preferences: &LexicalPreferences,
    ) -> Self {
        let mut metrics = Self::default();
        for token in tokens {
            metrics.record_token(token, preferences);
        }
        metrics
    }

    pub(crate) fn record_token(&mut self, token: &SyntaxToken, preferences: &LexicalPreferences) {
        // End-of-file is a terminator, not content
        if token.is_eof() {
            return;
        }

        self.total_tokens += 1;

        match token.kind {
            SyntaxKind::NumberToken => {
                self.number_tokens += 1;
                self.max_number_length = self.max_number_length.max(token.text.len());
                if token.value.is_none() {
                    self.overflowed_numbers += 1;
                }
            }
            kind if kind.is_operator() => {
                self.operator_tokens += 1;
                if preferences.track_operator_patterns {
                    *self.operator_usage_patterns.entry(kind).or_insert(0) += 1;
                }
            }
            kind if kind.is_parenthesis() => self.parenthesis_tokens += 1,
            SyntaxKind::WhitespaceToken => self.whitespace_tokens += 1,
            SyntaxKind::BadToken => self.bad_tokens += 1,
            _ => {}
        }
    }

    /// Tokens the parser will consume, end-of-file excluded
    pub fn significant_tokens(&self) -> usize {
        self.total_tokens - self.whitespace_tokens - self.bad_tokens
    }
}

/// Single-pass scanner over one line of source text
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    text: &'a str,
    position: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            finished: false,
        }
    }

    /// Byte offset of the next character to scan
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn source(&self) -> &'a str {
        self.text
    }

    fn current(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    /// Advance past a maximal run of characters matching `predicate`
    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.position;
        let run = self.text[start..]
            .char_indices()
            .find(|(_, ch)| !predicate(*ch))
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len() - start);
        self.position += run;
        &self.text[start..self.position]
    }

    /// Scan the token at the current position
    pub fn next_token(&mut self) -> SyntaxToken {
        let start = self.position;

        let ch = match self.current() {
            Some(ch) => ch,
            None => return SyntaxToken::end_of_file(self.text.len()),
        };

        if ch.is_ascii_digit() {
            let text = self.consume_while(|c| c.is_ascii_digit());
            return SyntaxToken::number(start, text);
        }

        if ch.is_whitespace() {
            let text = self.consume_while(char::is_whitespace);
            return SyntaxToken::new(SyntaxKind::WhitespaceToken, start, text);
        }

        self.position += ch.len_utf8();
        let text = &self.text[start..self.position];

        match SyntaxKind::from_punctuation(ch) {
            Some(kind) => SyntaxToken::new(kind, start, text),
            None => SyntaxToken::new(SyntaxKind::BadToken, start, text),
        }
    }
}

/// Yields every token through the first end-of-file, then stops
impl<'a> Iterator for Lexer<'a> {
    type Item = SyntaxToken;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }
        Some(token)
    }
}
