//! Buffered token stream consumed by the parser
//!
//! The stream owns the complete lexer output, trivia included, so the source
//! line can always be reconstructed. Parsing only walks the significant
//! subset: whitespace and bad tokens are skipped, and the end-of-file token is
//! always the final significant entry.

use crate::tokens::token::{SyntaxKind, SyntaxToken};

/// Token stream with clamped lookahead over significant tokens
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens exactly as lexed
    all_tokens: Vec<SyntaxToken>,
    /// Indices into all_tokens for significant tokens, ending with end-of-file
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
}

impl TokenStream {
    /// Build a stream from lexer output. A missing end-of-file token is
    /// appended so lookahead always has a terminal entry.
    pub fn new(mut tokens: Vec<SyntaxToken>) -> Self {
        if let Some(eof_index) = tokens.iter().position(|t| t.is_eof()) {
            tokens.truncate(eof_index + 1);
        } else {
            let end = tokens
                .last()
                .map(|t| t.position + t.text.len())
                .unwrap_or(0);
            tokens.push(SyntaxToken::end_of_file(end));
        }

        let significant_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.kind.is_significant())
            .map(|(index, _)| index)
            .collect();

        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
        }
    }

    /// Token `offset` places ahead of the cursor, clamped to end-of-file
    pub fn peek(&self, offset: usize) -> &SyntaxToken {
        let last = self.significant_indices.len() - 1;
        let index = self.position.saturating_add(offset).min(last);
        &self.all_tokens[self.significant_indices[index]]
    }

    pub fn current(&self) -> &SyntaxToken {
        self.peek(0)
    }

    /// Return the current token and move past it. The cursor never moves
    /// beyond end-of-file.
    pub fn advance(&mut self) -> SyntaxToken {
        let token = self.current().clone();
        if self.position + 1 < self.significant_indices.len() {
            self.position += 1;
        }
        token
    }

    pub fn check(&self, kind: SyntaxKind) -> bool {
        self.current().kind == kind
    }

    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of significant tokens, end-of-file included
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        // The end-of-file token is always present
        false
    }

    pub fn all_tokens(&self) -> &[SyntaxToken] {
        &self.all_tokens
    }

    /// Unrecognized characters that were kept out of the parse buffer
    pub fn bad_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.all_tokens
            .iter()
            .filter(|token| token.kind == SyntaxKind::BadToken)
    }

    pub fn end_of_file(&self) -> &SyntaxToken {
        self.peek(usize::MAX)
    }

    /// Reassemble the source text from every token
    pub fn source_text(&self) -> String {
        self.all_tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;

    #[test]
    fn test_whitespace_and_bad_tokens_are_skipped() {
        let stream = TokenStream::new(tokenize("1 $ + 2"));

        let kinds: Vec<SyntaxKind> = (0..stream.len()).map(|i| stream.peek(i).kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::NumberToken,
                SyntaxKind::PlusToken,
                SyntaxKind::NumberToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
        assert_eq!(stream.bad_tokens().count(), 1);
        assert_eq!(stream.source_text(), "1 $ + 2");
    }

    #[test]
    fn test_peek_clamps_to_end_of_file() {
        let stream = TokenStream::new(tokenize("7"));
        assert_eq!(stream.peek(1).kind, SyntaxKind::EndOfFileToken);
        assert_eq!(stream.peek(50).kind, SyntaxKind::EndOfFileToken);
        assert_eq!(stream.peek(usize::MAX).kind, SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_advance_stops_at_end_of_file() {
        let mut stream = TokenStream::new(tokenize("1"));
        assert_eq!(stream.advance().kind, SyntaxKind::NumberToken);
        assert!(stream.is_at_end());
        assert_eq!(stream.advance().kind, SyntaxKind::EndOfFileToken);
        assert_eq!(stream.advance().kind, SyntaxKind::EndOfFileToken);
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn test_missing_end_of_file_is_appended() {
        let stream = TokenStream::new(vec![SyntaxToken::number(0, "12")]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.end_of_file().position, 2);
    }

    #[test]
    fn test_empty_input_has_only_end_of_file() {
        let stream = TokenStream::new(Vec::new());
        assert_eq!(stream.len(), 1);
        assert!(stream.is_at_end());
        assert!(!stream.is_empty());
    }
}
