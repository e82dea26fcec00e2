// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use lexical::{tokenize, Lexer, LexerError};
pub use pipeline::{process_line, LineOutput, OutputMode, PipelineError, PipelineOptions, PipelineResult};
pub use syntax::{Diagnostic, ExpressionSyntax, Parser, SyntaxTree};
pub use tokens::{SyntaxKind, SyntaxToken};
