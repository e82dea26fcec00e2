mod error;
pub mod output;

// Re-export public types
pub use error::{PipelineError, PipelineResult};
pub use output::{LineOutput, OutputMode};

use crate::config::runtime::{LexicalPreferences, RuntimeConfig};
use crate::logging::codes;
use crate::syntax::SyntaxTree;

/// Per-line processing options
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub mode: OutputMode,
    pub lexical: LexicalPreferences,
}

impl PipelineOptions {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Options described by a runtime config; an unknown mode falls back to tokens
    pub fn from_runtime_config(config: &RuntimeConfig) -> Self {
        Self {
            mode: config.repl.default_mode.parse().unwrap_or_default(),
            lexical: config.lexical.clone(),
        }
    }
}

/// Run one line through the front end (text -> tokens -> tree)
///
/// Only resource limit violations fail; malformed input yields diagnostics
/// on the returned tree. The tree is built in `Tree` mode only.
pub fn process_line(text: &str, options: &PipelineOptions) -> PipelineResult<LineOutput> {
    crate::log_debug!("Processing line",
        "length" => text.len(),
        "mode" => options.mode
    );

    let tokens = crate::lexical::tokenize_checked_with_preferences(text, &options.lexical)?;

    let tree = match options.mode {
        OutputMode::Tokens => None,
        OutputMode::Tree => Some(SyntaxTree::from_tokens(tokens.clone())),
    };

    crate::log_success!(codes::success::LINE_PROCESSED, "Line processed",
        "tokens" => tokens.len(),
        "diagnostics" => tree.as_ref().map_or(0, |tree| tree.diagnostics.len())
    );

    Ok(LineOutput {
        source: text.to_string(),
        mode: options.mode,
        tokens,
        tree,
    })
}
