//! Syntax analysis - source line to expression tree
//!
//! [`SyntaxTree::parse`] is the one-shot entry point: it lexes the line,
//! parses it, and returns the root expression together with every
//! diagnostic recorded along the way. Parsing never fails outright.

pub mod error;
pub mod nodes;
pub mod parser;
pub mod printer;

pub use error::{Diagnostic, DiagnosticBag, SyntaxError};
pub use nodes::{
    BinaryExpressionSyntax, BinaryOperator, ExpressionSyntax, NumberExpressionSyntax,
    ParenthesizedExpressionSyntax, SyntaxNode,
};
pub use parser::Parser;
pub use printer::pretty_print;

use crate::logging::codes;
use crate::tokens::SyntaxToken;
use crate::utils::SourceText;
use crate::log_debug;
use serde::Serialize;

/// Result of parsing one line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxTree {
    pub root: ExpressionSyntax,
    pub end_of_file_token: SyntaxToken,
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics dropped after the storage cap was reached
    pub suppressed_diagnostics: usize,
}

impl SyntaxTree {
    pub fn parse(text: &str) -> Self {
        Parser::new(text).parse()
    }

    /// Parse tokens produced by an earlier lexing pass
    pub fn from_tokens(tokens: Vec<SyntaxToken>) -> Self {
        Parser::from_tokens(tokens).parse()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn pretty_print(&self) -> String {
        printer::pretty_print(&self.root)
    }

    /// Render each diagnostic beneath the source line with a caret underline
    pub fn render_diagnostics(&self, source: &SourceText) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|diagnostic| source.format_error(&diagnostic.span, &diagnostic.to_string()))
            .collect()
    }
}

/// Parse a line of source text
pub fn parse(text: &str) -> SyntaxTree {
    SyntaxTree::parse(text)
}

/// Verify that every syntax code has registry metadata
pub fn init_syntax_logging() -> Result<(), String> {
    let syntax_codes = [
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::NESTING_TOO_DEEP,
    ];

    for code in &syntax_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Syntax module logging validation completed");
    Ok(())
}
