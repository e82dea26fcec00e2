//! Expression tree
//!
//! The tree is a closed set of variants. Each node owns its children and keeps
//! the tokens it was built from, so [`ExpressionSyntax::children`] can return
//! nodes and tokens in source order.

use crate::tokens::{SyntaxKind, SyntaxToken};
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// The four arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl BinaryOperator {
    pub fn from_token_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::PlusToken => Some(BinaryOperator::Addition),
            SyntaxKind::MinusToken => Some(BinaryOperator::Subtraction),
            SyntaxKind::StarToken => Some(BinaryOperator::Multiplication),
            SyntaxKind::SlashToken => Some(BinaryOperator::Division),
            _ => None,
        }
    }

    pub fn token_kind(&self) -> SyntaxKind {
        match self {
            BinaryOperator::Addition => SyntaxKind::PlusToken,
            BinaryOperator::Subtraction => SyntaxKind::MinusToken,
            BinaryOperator::Multiplication => SyntaxKind::StarToken,
            BinaryOperator::Division => SyntaxKind::SlashToken,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
        }
    }

    /// Binding strength; multiplicative operators bind tighter
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Addition | BinaryOperator::Subtraction => 1,
            BinaryOperator::Multiplication | BinaryOperator::Division => 2,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberExpressionSyntax {
    pub number_token: SyntaxToken,
}

impl NumberExpressionSyntax {
    pub fn new(number_token: SyntaxToken) -> Self {
        Self { number_token }
    }

    /// Literal value; tokens without a value read as zero
    pub fn value(&self) -> i32 {
        self.number_token.value.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpressionSyntax {
    pub left: Box<ExpressionSyntax>,
    pub operator: BinaryOperator,
    pub operator_token: SyntaxToken,
    pub right: Box<ExpressionSyntax>,
}

impl BinaryExpressionSyntax {
    /// Returns `None` when the token is not an arithmetic operator
    pub fn new(
        left: ExpressionSyntax,
        operator_token: SyntaxToken,
        right: ExpressionSyntax,
    ) -> Option<Self> {
        let operator = BinaryOperator::from_token_kind(operator_token.kind)?;
        Some(Self {
            left: Box::new(left),
            operator,
            operator_token,
            right: Box::new(right),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesizedExpressionSyntax {
    pub open_parenthesis_token: SyntaxToken,
    pub expression: Box<ExpressionSyntax>,
    pub close_parenthesis_token: SyntaxToken,
}

impl ParenthesizedExpressionSyntax {
    pub fn new(
        open_parenthesis_token: SyntaxToken,
        expression: ExpressionSyntax,
        close_parenthesis_token: SyntaxToken,
    ) -> Self {
        Self {
            open_parenthesis_token,
            expression: Box::new(expression),
            close_parenthesis_token,
        }
    }
}

/// An expression tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ExpressionSyntax {
    Number(NumberExpressionSyntax),
    Binary(BinaryExpressionSyntax),
    Parenthesized(ParenthesizedExpressionSyntax),
}

/// A child of a tree node: either a nested node or one of its tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyntaxNode<'a> {
    Expression(&'a ExpressionSyntax),
    Token(&'a SyntaxToken),
}

impl<'a> SyntaxNode<'a> {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxNode::Expression(expression) => expression.kind(),
            SyntaxNode::Token(token) => token.kind,
        }
    }

    pub fn children(&self) -> Vec<SyntaxNode<'a>> {
        match self {
            SyntaxNode::Expression(expression) => expression.children(),
            SyntaxNode::Token(_) => Vec::new(),
        }
    }
}

impl ExpressionSyntax {
    pub fn number(number_token: SyntaxToken) -> Self {
        ExpressionSyntax::Number(NumberExpressionSyntax::new(number_token))
    }

    /// Binary node from an operator already classified by the caller
    pub fn binary(
        left: ExpressionSyntax,
        operator: BinaryOperator,
        operator_token: SyntaxToken,
        right: ExpressionSyntax,
    ) -> Self {
        debug_assert_eq!(operator.token_kind(), operator_token.kind);
        ExpressionSyntax::Binary(BinaryExpressionSyntax {
            left: Box::new(left),
            operator,
            operator_token,
            right: Box::new(right),
        })
    }

    pub fn parenthesized(
        open_parenthesis_token: SyntaxToken,
        expression: ExpressionSyntax,
        close_parenthesis_token: SyntaxToken,
    ) -> Self {
        ExpressionSyntax::Parenthesized(ParenthesizedExpressionSyntax::new(
            open_parenthesis_token,
            expression,
            close_parenthesis_token,
        ))
    }

    pub fn kind(&self) -> SyntaxKind {
        match self {
            ExpressionSyntax::Number(_) => SyntaxKind::NumberExpression,
            ExpressionSyntax::Binary(_) => SyntaxKind::BinaryExpression,
            ExpressionSyntax::Parenthesized(_) => SyntaxKind::ParenthesizedExpression,
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<SyntaxNode<'_>> {
        match self {
            ExpressionSyntax::Number(number) => vec![SyntaxNode::Token(&number.number_token)],
            ExpressionSyntax::Binary(binary) => vec![
                SyntaxNode::Expression(&binary.left),
                SyntaxNode::Token(&binary.operator_token),
                SyntaxNode::Expression(&binary.right),
            ],
            ExpressionSyntax::Parenthesized(parenthesized) => vec![
                SyntaxNode::Token(&parenthesized.open_parenthesis_token),
                SyntaxNode::Expression(&parenthesized.expression),
                SyntaxNode::Token(&parenthesized.close_parenthesis_token),
            ],
        }
    }

    /// Source range covered by the node and its descendants
    pub fn span(&self) -> Span {
        match self {
            ExpressionSyntax::Number(number) => number.number_token.span(),
            ExpressionSyntax::Binary(binary) => binary.left.span().merge(binary.right.span()),
            ExpressionSyntax::Parenthesized(parenthesized) => parenthesized
                .open_parenthesis_token
                .span()
                .merge(parenthesized.close_parenthesis_token.span()),
        }
    }

    /// Number of nodes in the tree, tokens excluded
    pub fn node_count(&self) -> usize {
        match self {
            ExpressionSyntax::Number(_) => 1,
            ExpressionSyntax::Binary(binary) => 1 + binary.left.node_count() + binary.right.node_count(),
            ExpressionSyntax::Parenthesized(parenthesized) => 1 + parenthesized.expression.node_count(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            ExpressionSyntax::Number(_) => 1,
            ExpressionSyntax::Binary(binary) => 1 + binary.left.depth().max(binary.right.depth()),
            ExpressionSyntax::Parenthesized(parenthesized) => 1 + parenthesized.expression.depth(),
        }
    }
}

/// Compact fully parenthesized rendering, e.g. `(1 + (2 * 3))`
impl fmt::Display for ExpressionSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionSyntax::Number(number) => write!(f, "{}", number.value()),
            ExpressionSyntax::Binary(binary) => {
                write!(f, "({} {} {})", binary.left, binary.operator, binary.right)
            }
            ExpressionSyntax::Parenthesized(parenthesized) => {
                write!(f, "{}", parenthesized.expression)
            }
        }
    }
}
