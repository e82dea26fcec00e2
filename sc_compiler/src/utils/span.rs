//! Source location tracking for the expression front end
//!
//! Every token, tree node and diagnostic is anchored to a [`Span`] of byte
//! offsets into the line being compiled. Offsets are zero-based and always
//! fall on UTF-8 character boundaries because the lexer only ever advances
//! by whole characters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open range `[start, end)` of byte offsets in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span from start and end offsets
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Create a span covering `length` bytes from `start`
    pub fn with_length(start: usize, length: usize) -> Self {
        Self::new(start, start + length)
    }

    /// Zero-width span at a single offset
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Smallest span covering both spans
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Text covered by this span, clamped to the input
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        let end = self.end.min(input.len());
        let start = self.start.min(end);
        input.get(start..end).unwrap_or("")
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}..{}", self.start, self.end)
        }
    }
}

/// The source line under compilation, used to render diagnostics
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// One-based display column of a byte offset, counted in characters
    pub fn column_at(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        self.text
            .char_indices()
            .take_while(|(index, _)| *index < offset)
            .count()
            + 1
    }

    /// Get the text covered by a span
    pub fn span_text(&self, span: &Span) -> &str {
        span.slice(&self.text)
    }

    /// Render a message with the source line and a caret underline
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let start_column = self.column_at(span.start);
        let width = self.span_text(span).chars().count().max(1);

        let mut result = String::new();
        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!("  --> column {}\n", start_column));
        result.push_str("   |\n");
        result.push_str(&format!("   | {}\n", self.text));
        result.push_str(&format!(
            "   | {}{}\n",
            " ".repeat(start_column - 1),
            "^".repeat(width)
        ));
        result
    }
}
