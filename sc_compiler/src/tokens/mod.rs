//! Token model for arithmetic expressions
//!
//! Source text is split into [`SyntaxToken`]s, each carrying its
//! [`SyntaxKind`], the byte offset where it starts, the exact text it covers,
//! and, for numbers, the parsed value.
//!
//! ## Token kinds
//!
//! - **Numbers**: maximal runs of ASCII digits. The value is absent when the
//!   run does not fit in a 32-bit signed integer.
//! - **Whitespace**: maximal runs of Unicode whitespace, kept so that the
//!   token sequence reproduces the input exactly.
//! - **Punctuation**: `+ - * / ( )`, one character each.
//! - **Bad**: any other single character.
//! - **End of file**: zero-width terminator.
//!
//! [`TokenStream`] holds a fully lexed line for the parser and exposes only
//! the significant tokens through its lookahead API.

pub mod token;
pub mod token_stream;

pub use token::{SyntaxKind, SyntaxToken};
pub use token_stream::TokenStream;
