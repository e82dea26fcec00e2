//! Recursive descent parser for arithmetic expressions
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := NUMBER | '(' expression ')'
//! ```
//!
//! The parser is total. Every malformed construct records a diagnostic and
//! yields a placeholder so the caller always receives a complete tree.

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::lexical;
use crate::logging::codes;
use crate::syntax::error::DiagnosticBag;
use crate::syntax::nodes::{BinaryOperator, ExpressionSyntax};
use crate::syntax::SyntaxTree;
use crate::tokens::{SyntaxKind, SyntaxToken, TokenStream};
use crate::{log_debug, log_success, log_warning};

const ADDITIVE_PRECEDENCE: u8 = 1;
const MULTIPLICATIVE_PRECEDENCE: u8 = 2;

pub struct Parser {
    tokens: TokenStream,
    diagnostics: DiagnosticBag,
    parse_depth: usize,
}

impl Parser {
    /// Lex `text` to completion and buffer the significant tokens
    pub fn new(text: &str) -> Self {
        Self::from_tokens(lexical::tokenize(text))
    }

    /// Buffer already lexed tokens. Bad tokens are reported here and kept out
    /// of the parse buffer.
    pub fn from_tokens(tokens: Vec<SyntaxToken>) -> Self {
        let tokens = TokenStream::new(tokens);
        let mut diagnostics = DiagnosticBag::new();

        for bad in tokens.bad_tokens() {
            if let Some(character) = bad.text.chars().next() {
                diagnostics.report_bad_character(character, bad.position);
            }
        }

        log_debug!("Creating expression parser",
            "tokens" => tokens.len(),
            "bad_characters" => diagnostics.len()
        );

        Self {
            tokens,
            diagnostics,
            parse_depth: 0,
        }
    }

    /// Token `offset` places ahead, clamped to end-of-file
    pub fn peek(&self, offset: usize) -> &SyntaxToken {
        self.tokens.peek(offset)
    }

    pub fn current(&self) -> &SyntaxToken {
        self.tokens.current()
    }

    /// Consume and return the current token
    pub fn next_token(&mut self) -> SyntaxToken {
        self.tokens.advance()
    }

    /// Consume the current token if it has `kind`. Otherwise report it and
    /// return a zero-width token of `kind` without consuming anything.
    pub fn match_token(&mut self, kind: SyntaxKind) -> SyntaxToken {
        if self.current().kind == kind {
            return self.next_token();
        }

        let found = self.current();
        let span = found.span();
        let found_kind = found.kind;
        let position = found.position;

        log_debug!("Unexpected token",
            "expected" => kind,
            "found" => found_kind,
            "position" => position
        );
        self.diagnostics.report_unexpected_token(span, found_kind, kind);

        SyntaxToken::synthesized(kind, position)
    }

    /// Parse the whole line into a tree
    pub fn parse(mut self) -> SyntaxTree {
        let root = self.parse_expression();
        let end_of_file_token = self.match_token(SyntaxKind::EndOfFileToken);

        if self.diagnostics.is_empty() {
            log_success!(codes::success::AST_CONSTRUCTION_COMPLETE,
                "Expression parsed successfully",
                "nodes" => root.node_count(),
                "depth" => root.depth()
            );
        } else {
            log_warning!("Expression parsed with diagnostics",
                "diagnostics" => self.diagnostics.len(),
                "suppressed" => self.diagnostics.suppressed()
            );
        }

        SyntaxTree {
            root,
            end_of_file_token,
            suppressed_diagnostics: self.diagnostics.suppressed(),
            diagnostics: self.diagnostics.into_vec(),
        }
    }

    pub fn parse_expression(&mut self) -> ExpressionSyntax {
        let mut left = self.parse_term();

        while let Some(operator) = self.current_operator(ADDITIVE_PRECEDENCE) {
            let operator_token = self.next_token();
            let right = self.parse_term();
            left = ExpressionSyntax::binary(left, operator, operator_token, right);
        }

        left
    }

    pub fn parse_term(&mut self) -> ExpressionSyntax {
        let mut left = self.parse_factor();

        while let Some(operator) = self.current_operator(MULTIPLICATIVE_PRECEDENCE) {
            let operator_token = self.next_token();
            let right = self.parse_factor();
            left = ExpressionSyntax::binary(left, operator, operator_token, right);
        }

        left
    }

    pub fn parse_factor(&mut self) -> ExpressionSyntax {
        if self.current().kind == SyntaxKind::OpenParenthesisToken {
            return self.parse_parenthesized_expression();
        }

        let number_token = self.match_token(SyntaxKind::NumberToken);
        if number_token.value.is_none() && !number_token.is_missing() {
            self.diagnostics
                .report_invalid_number(number_token.span(), &number_token.text);
        }
        ExpressionSyntax::number(number_token)
    }

    fn parse_parenthesized_expression(&mut self) -> ExpressionSyntax {
        if self.parse_depth >= MAX_PARSE_DEPTH {
            return self.skip_nested_group();
        }

        self.parse_depth += 1;
        let open = self.match_token(SyntaxKind::OpenParenthesisToken);
        let expression = self.parse_expression();
        let close = self.match_token(SyntaxKind::CloseParenthesisToken);
        self.parse_depth -= 1;

        ExpressionSyntax::parenthesized(open, expression, close)
    }

    /// Report nesting past the depth limit and skip the balanced group at the
    /// cursor, returning a placeholder in its place.
    fn skip_nested_group(&mut self) -> ExpressionSyntax {
        let start = self.current().span();
        let mut balance = 0usize;

        loop {
            let token = self.next_token();
            match token.kind {
                SyntaxKind::OpenParenthesisToken => balance += 1,
                SyntaxKind::CloseParenthesisToken => balance = balance.saturating_sub(1),
                SyntaxKind::EndOfFileToken => break,
                _ => {}
            }
            if balance == 0 || self.tokens.is_at_end() {
                break;
            }
        }

        log_debug!("Nesting limit reached", "max_depth" => MAX_PARSE_DEPTH, "position" => start.start);
        self.diagnostics.report_nesting_too_deep(start, MAX_PARSE_DEPTH);

        ExpressionSyntax::number(SyntaxToken::synthesized(
            SyntaxKind::NumberToken,
            start.start,
        ))
    }

    /// Operator at the cursor if it belongs to the given precedence tier
    fn current_operator(&self, precedence: u8) -> Option<BinaryOperator> {
        BinaryOperator::from_token_kind(self.current().kind)
            .filter(|operator| operator.precedence() == precedence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::error::SyntaxError;
    use crate::utils::Span;
    use assert_matches::assert_matches;

    fn parse(text: &str) -> SyntaxTree {
        Parser::new(text).parse()
    }

    fn assert_number(expression: &ExpressionSyntax, expected: i32) {
        assert_matches!(expression, ExpressionSyntax::Number(number) if number.value() == expected);
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let tree = parse("1 + 2 * 3");
        assert!(tree.diagnostics.is_empty());

        let root = assert_matches!(&tree.root, ExpressionSyntax::Binary(b) => b);
        assert_eq!(root.operator, BinaryOperator::Addition);
        assert_number(&root.left, 1);

        let right = assert_matches!(root.right.as_ref(), ExpressionSyntax::Binary(b) => b);
        assert_eq!(right.operator, BinaryOperator::Multiplication);
        assert_number(&right.left, 2);
        assert_number(&right.right, 3);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let tree = parse("(1 + 2) * 3");
        assert!(tree.diagnostics.is_empty());

        let root = assert_matches!(&tree.root, ExpressionSyntax::Binary(b) => b);
        assert_eq!(root.operator, BinaryOperator::Multiplication);
        assert_number(&root.right, 3);

        let group = assert_matches!(root.left.as_ref(), ExpressionSyntax::Parenthesized(p) => p);
        let inner = assert_matches!(group.expression.as_ref(), ExpressionSyntax::Binary(b) => b);
        assert_eq!(inner.operator, BinaryOperator::Addition);
        assert_number(&inner.left, 1);
        assert_number(&inner.right, 2);
    }

    #[test]
    fn test_operators_are_left_associative() {
        assert_eq!(parse("1 - 2 - 3").root.to_string(), "((1 - 2) - 3)");
        assert_eq!(parse("8 / 4 / 2").root.to_string(), "((8 / 4) / 2)");
        assert_eq!(
            parse("1 + 2 * 3 - 4 / 5").root.to_string(),
            "((1 + (2 * 3)) - (4 / 5))"
        );
    }

    #[test]
    fn test_missing_right_operand() {
        let tree = parse("1 +");
        assert_eq!(tree.diagnostics.len(), 1);
        assert_eq!(
            tree.diagnostics[0].error,
            SyntaxError::unexpected_token(SyntaxKind::NumberToken, SyntaxKind::EndOfFileToken)
        );
        assert_eq!(tree.diagnostics[0].position(), 3);

        let root = assert_matches!(&tree.root, ExpressionSyntax::Binary(b) => b);
        assert_number(&root.right, 0);
        assert_matches!(root.right.as_ref(), ExpressionSyntax::Number(n) if n.number_token.is_missing());
    }

    #[test]
    fn test_missing_close_parenthesis() {
        let tree = parse("(1 + 2");
        assert_eq!(tree.diagnostics.len(), 1);
        assert_eq!(
            tree.diagnostics[0].error,
            SyntaxError::unexpected_token(
                SyntaxKind::CloseParenthesisToken,
                SyntaxKind::EndOfFileToken
            )
        );
        let group = assert_matches!(&tree.root, ExpressionSyntax::Parenthesized(p) => p);
        assert!(group.close_parenthesis_token.is_missing());
        assert_eq!(group.close_parenthesis_token.position, 6);
    }

    #[test]
    fn test_trailing_input() {
        let tree = parse("1 2 3");
        assert_eq!(tree.diagnostics.len(), 1);
        assert_eq!(
            tree.diagnostics[0].error,
            SyntaxError::unexpected_token(SyntaxKind::EndOfFileToken, SyntaxKind::NumberToken)
        );
        assert_eq!(tree.diagnostics[0].span, Span::new(2, 3));
        assert_number(&tree.root, 1);
    }

    #[test]
    fn test_unmatched_close_parenthesis() {
        let tree = parse("1)");
        assert_eq!(tree.diagnostics.len(), 1);
        assert_matches!(
            tree.diagnostics[0].error,
            SyntaxError::UnexpectedToken { found: SyntaxKind::CloseParenthesisToken, .. }
        );
    }

    #[test]
    fn test_invalid_factor_yields_placeholder() {
        let tree = parse("* 2");
        assert!(!tree.diagnostics.is_empty());
        assert_eq!(
            tree.diagnostics[0].error,
            SyntaxError::unexpected_token(SyntaxKind::NumberToken, SyntaxKind::StarToken)
        );
        let root = assert_matches!(&tree.root, ExpressionSyntax::Binary(b) => b);
        assert_number(&root.left, 0);
        assert_number(&root.right, 2);
    }

    #[test]
    fn test_empty_input_reports_missing_number() {
        let tree = parse("");
        assert_eq!(tree.diagnostics.len(), 1);
        assert_number(&tree.root, 0);
        assert!(tree.end_of_file_token.is_eof());
    }

    #[test]
    fn test_bad_characters_are_reported_and_skipped() {
        let tree = parse("1 $ + 2");
        assert_eq!(tree.diagnostics.len(), 1);
        assert_eq!(
            tree.diagnostics[0].error,
            SyntaxError::BadCharacter { character: '$' }
        );
        assert_eq!(tree.diagnostics[0].position(), 2);
        assert_eq!(tree.root.to_string(), "(1 + 2)");
    }

    #[test]
    fn test_bad_character_diagnostics_come_first() {
        let tree = parse("1 + #");
        assert_eq!(tree.diagnostics.len(), 2);
        assert_matches!(tree.diagnostics[0].error, SyntaxError::BadCharacter { character: '#' });
        assert_matches!(tree.diagnostics[1].error, SyntaxError::UnexpectedToken { .. });
    }

    #[test]
    fn test_overflowing_number_is_reported() {
        let tree = parse("99999999999 + 1");
        assert_eq!(tree.diagnostics.len(), 1);
        assert_eq!(
            tree.diagnostics[0].error,
            SyntaxError::InvalidNumber {
                text: "99999999999".to_string()
            }
        );
    }

    #[test]
    fn test_peek_clamps_to_end_of_file() {
        let parser = Parser::new("1 + 2");
        assert_eq!(parser.current().kind, SyntaxKind::NumberToken);
        assert_eq!(parser.peek(1).kind, SyntaxKind::PlusToken);
        assert_eq!(parser.peek(3).kind, SyntaxKind::EndOfFileToken);
        assert_eq!(parser.peek(100).kind, SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_match_token_synthesizes_without_consuming() {
        let mut parser = Parser::new("+");
        let token = parser.match_token(SyntaxKind::NumberToken);
        assert_eq!(token.kind, SyntaxKind::NumberToken);
        assert!(token.is_missing());
        assert_eq!(token.position, 0);
        assert_eq!(parser.current().kind, SyntaxKind::PlusToken);

        let matched = parser.match_token(SyntaxKind::PlusToken);
        assert_eq!(matched.text, "+");
        assert!(parser.current().is_eof());
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let depth = MAX_PARSE_DEPTH + 5;
        let text = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let tree = parse(&text);

        assert_eq!(tree.diagnostics.len(), 1);
        assert_matches!(tree.diagnostics[0].error, SyntaxError::NestingTooDeep { .. });
        assert!(tree.root.depth() <= MAX_PARSE_DEPTH + 1);
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let text = format!("{}1{}", "(".repeat(MAX_PARSE_DEPTH), ")".repeat(MAX_PARSE_DEPTH));
        let tree = parse(&text);
        assert!(tree.diagnostics.is_empty());
        assert_eq!(tree.root.depth(), MAX_PARSE_DEPTH + 1);
    }

    #[test]
    fn test_malformed_inputs_never_panic() {
        let inputs = [
            "(", ")", "((", "))", "+", "-", "1 +", "* /", "(1 + )", "()", "1 (2)", "((1)",
            "1 ++ 2", "$%^", "((((((((", ") ( ) (", "9999999999999999999999",
        ];
        for input in inputs {
            let tree = parse(input);
            assert!(!tree.diagnostics.is_empty(), "expected diagnostics for {:?}", input);
            assert!(tree.end_of_file_token.is_eof());
        }
    }
}
