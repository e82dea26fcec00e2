use crate::syntax::SyntaxTree;
use crate::tokens::SyntaxToken;
use crate::utils::SourceText;
use serde::Serialize;
use std::fmt;

/// What the driver shows for each line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One `Kind: 'text' value` line per token before end of input
    #[default]
    Tokens,
    /// Pretty-printed expression tree followed by diagnostics
    Tree,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Tokens => "tokens",
            OutputMode::Tree => "tree",
        }
    }
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tokens" => Ok(OutputMode::Tokens),
            "tree" => Ok(OutputMode::Tree),
            other => Err(format!("unknown mode '{}', expected tokens or tree", other)),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running one line through the front end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOutput {
    pub source: String,
    pub mode: OutputMode,
    pub tokens: Vec<SyntaxToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<SyntaxTree>,
}

impl LineOutput {
    pub fn has_errors(&self) -> bool {
        self.tree.as_ref().is_some_and(SyntaxTree::has_errors)
    }

    /// Plain-text rendering, one entry per output line
    pub fn render(&self, render_source_context: bool) -> Vec<String> {
        let tree = match (&self.mode, &self.tree) {
            (OutputMode::Tree, Some(tree)) => tree,
            _ => {
                return self
                    .tokens
                    .iter()
                    .filter(|token| !token.is_eof())
                    .map(ToString::to_string)
                    .collect()
            }
        };

        let mut lines: Vec<String> = tree.pretty_print().lines().map(str::to_string).collect();
        let source = SourceText::new(self.source.as_str());

        for diagnostic in &tree.diagnostics {
            lines.push(format!("ERROR: {}", diagnostic));
            if render_source_context {
                // First line of the snippet repeats the message
                let snippet = source.format_error(&diagnostic.span, &diagnostic.message());
                lines.extend(snippet.lines().skip(1).map(str::to_string));
            }
        }

        if tree.suppressed_diagnostics > 0 {
            lines.push(format!(
                "ERROR: {} more diagnostics suppressed",
                tree.suppressed_diagnostics
            ));
        }

        lines
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
