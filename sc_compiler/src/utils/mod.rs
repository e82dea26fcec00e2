//! Shared primitives used by the lexer, parser and diagnostics renderer.

pub mod span;

pub use span::{SourceText, Span};
