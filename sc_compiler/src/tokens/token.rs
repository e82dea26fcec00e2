//! Token and syntax kind definitions

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of token and tree node the front end produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    // Tokens
    NumberToken,
    WhitespaceToken,
    PlusToken,
    MinusToken,
    StarToken,
    SlashToken,
    OpenParenthesisToken,
    CloseParenthesisToken,
    BadToken,
    EndOfFileToken,

    // Expressions
    NumberExpression,
    BinaryExpression,
    ParenthesizedExpression,
}

impl SyntaxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxKind::NumberToken => "NumberToken",
            SyntaxKind::WhitespaceToken => "WhitespaceToken",
            SyntaxKind::PlusToken => "PlusToken",
            SyntaxKind::MinusToken => "MinusToken",
            SyntaxKind::StarToken => "StarToken",
            SyntaxKind::SlashToken => "SlashToken",
            SyntaxKind::OpenParenthesisToken => "OpenParenthesisToken",
            SyntaxKind::CloseParenthesisToken => "CloseParenthesisToken",
            SyntaxKind::BadToken => "BadToken",
            SyntaxKind::EndOfFileToken => "EndOfFileToken",
            SyntaxKind::NumberExpression => "NumberExpression",
            SyntaxKind::BinaryExpression => "BinaryExpression",
            SyntaxKind::ParenthesizedExpression => "ParenthesizedExpression",
        }
    }

    /// Map a single punctuation character to its token kind
    pub fn from_punctuation(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(SyntaxKind::PlusToken),
            '-' => Some(SyntaxKind::MinusToken),
            '*' => Some(SyntaxKind::StarToken),
            '/' => Some(SyntaxKind::SlashToken),
            '(' => Some(SyntaxKind::OpenParenthesisToken),
            ')' => Some(SyntaxKind::CloseParenthesisToken),
            _ => None,
        }
    }

    /// Fixed source text for punctuation kinds
    pub fn punctuation_text(&self) -> Option<&'static str> {
        match self {
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::StarToken => Some("*"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::OpenParenthesisToken => Some("("),
            SyntaxKind::CloseParenthesisToken => Some(")"),
            _ => None,
        }
    }

    pub fn is_token(&self) -> bool {
        !self.is_expression()
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            SyntaxKind::NumberExpression
                | SyntaxKind::BinaryExpression
                | SyntaxKind::ParenthesizedExpression
        )
    }

    /// Binary operator tokens
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::StarToken
                | SyntaxKind::SlashToken
        )
    }

    pub fn is_parenthesis(&self) -> bool {
        matches!(
            self,
            SyntaxKind::OpenParenthesisToken | SyntaxKind::CloseParenthesisToken
        )
    }

    /// Tokens the parser never sees: trivia and unrecognized characters
    pub fn is_significant(&self) -> bool {
        !matches!(self, SyntaxKind::WhitespaceToken | SyntaxKind::BadToken)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, positioned fragment of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,
    /// Zero-based byte offset of the first character
    pub position: usize,
    pub text: String,
    /// Parsed payload, only ever present on number tokens
    pub value: Option<i32>,
}

impl SyntaxToken {
    pub fn new(kind: SyntaxKind, position: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            text: text.into(),
            value: None,
        }
    }

    /// Number token; the value is `None` when the digits overflow `i32`
    pub fn number(position: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let value = text.parse::<i32>().ok();
        Self {
            kind: SyntaxKind::NumberToken,
            position,
            text,
            value,
        }
    }

    pub fn end_of_file(position: usize) -> Self {
        Self::new(SyntaxKind::EndOfFileToken, position, "")
    }

    /// Zero-width placeholder inserted by error recovery
    pub fn synthesized(kind: SyntaxKind, position: usize) -> Self {
        Self::new(kind, position, "")
    }

    pub fn span(&self) -> Span {
        Span::with_length(self.position, self.text.len())
    }

    /// True for zero-width tokens that were not read from the source
    pub fn is_missing(&self) -> bool {
        self.text.is_empty() && self.kind != SyntaxKind::EndOfFileToken
    }

    pub fn is_eof(&self) -> bool {
        self.kind == SyntaxKind::EndOfFileToken
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.kind, self.text)?;
        if let Some(value) = self.value {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_token_value() {
        let token = SyntaxToken::number(0, "123");
        assert_eq!(token.value, Some(123));
        assert_eq!(token.span(), Span::new(0, 3));
    }

    #[test]
    fn test_number_token_overflow_has_no_value() {
        let token = SyntaxToken::number(4, "99999999999");
        assert_eq!(token.kind, SyntaxKind::NumberToken);
        assert_eq!(token.text, "99999999999");
        assert_eq!(token.value, None);
    }

    #[test]
    fn test_display_matches_driver_format() {
        assert_eq!(SyntaxToken::number(0, "42").to_string(), "NumberToken: '42' 42");
        assert_eq!(
            SyntaxToken::new(SyntaxKind::PlusToken, 3, "+").to_string(),
            "PlusToken: '+'"
        );
        assert_eq!(
            SyntaxToken::end_of_file(5).to_string(),
            "EndOfFileToken: ''"
        );
    }

    #[test]
    fn test_punctuation_mapping_is_consistent() {
        for ch in ['+', '-', '*', '/', '(', ')'] {
            let kind = SyntaxKind::from_punctuation(ch).unwrap();
            assert_eq!(kind.punctuation_text(), Some(ch.to_string().as_str()));
        }
        assert_eq!(SyntaxKind::from_punctuation('%'), None);
    }

    #[test]
    fn test_kind_classification() {
        assert!(SyntaxKind::StarToken.is_operator());
        assert!(!SyntaxKind::OpenParenthesisToken.is_operator());
        assert!(SyntaxKind::BinaryExpression.is_expression());
        assert!(SyntaxKind::EndOfFileToken.is_token());
        assert!(SyntaxKind::EndOfFileToken.is_significant());
        assert!(!SyntaxKind::WhitespaceToken.is_significant());
        assert!(!SyntaxKind::BadToken.is_significant());
    }

    #[test]
    fn test_synthesized_token_is_missing() {
        let token = SyntaxToken::synthesized(SyntaxKind::CloseParenthesisToken, 6);
        assert!(token.is_missing());
        assert!(token.span().is_empty());
        assert!(!SyntaxToken::end_of_file(6).is_missing());
    }
}
