//! Diagnostics recorded while parsing
//!
//! Malformed input never aborts a parse. Each problem becomes a [`Diagnostic`]
//! pairing a [`SyntaxError`] with the source span it refers to, and the
//! parser carries on with a placeholder.

use crate::config::compile_time::syntax::MAX_DIAGNOSTICS;
use crate::logging::{codes, Code};
use crate::tokens::SyntaxKind;
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// Kinds of malformed input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum SyntaxError {
    #[error("bad character input: '{character}'")]
    BadCharacter { character: char },

    #[error("unexpected token: expected {expected}, got {found}")]
    UnexpectedToken {
        expected: SyntaxKind,
        found: SyntaxKind,
    },

    #[error("the number {text} isn't a valid 32-bit integer")]
    InvalidNumber { text: String },

    #[error("expression nesting exceeds {max_depth} levels")]
    NestingTooDeep { max_depth: usize },
}

impl SyntaxError {
    pub fn unexpected_token(expected: SyntaxKind, found: SyntaxKind) -> Self {
        Self::UnexpectedToken { expected, found }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::BadCharacter { .. } => codes::lexical::BAD_CHARACTER,
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::InvalidNumber { .. } => codes::lexical::INVALID_NUMBER,
            Self::NestingTooDeep { .. } => codes::syntax::NESTING_TOO_DEEP,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

/// A malformed-input condition anchored to the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub error: SyntaxError,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(error: SyntaxError, span: Span) -> Self {
        Self { error, span }
    }

    /// Zero-based byte offset the diagnostic points at
    pub fn position(&self) -> usize {
        self.span.start
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn code(&self) -> Code {
        self.error.error_code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.error, self.position())
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Ordered diagnostic collection with a storage cap
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    suppressed: usize,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, error: SyntaxError, span: Span) {
        if self.diagnostics.len() >= MAX_DIAGNOSTICS {
            self.suppressed += 1;
            return;
        }
        self.diagnostics.push(Diagnostic::new(error, span));
    }

    pub fn report_bad_character(&mut self, character: char, position: usize) {
        self.report(
            SyntaxError::BadCharacter { character },
            Span::with_length(position, character.len_utf8()),
        );
    }

    pub fn report_unexpected_token(&mut self, span: Span, found: SyntaxKind, expected: SyntaxKind) {
        self.report(SyntaxError::unexpected_token(expected, found), span);
    }

    pub fn report_invalid_number(&mut self, span: Span, text: &str) {
        self.report(
            SyntaxError::InvalidNumber {
                text: text.to_string(),
            },
            span,
        );
    }

    pub fn report_nesting_too_deep(&mut self, span: Span, max_depth: usize) {
        self.report(SyntaxError::NestingTooDeep { max_depth }, span);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics dropped after the cap was reached
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
