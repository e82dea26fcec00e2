use crate::config::runtime::ConfigError;
use crate::lexical::LexerError;
use crate::logging::codes::{self, Code};

/// Errors that stop a line, or the driver, outright
///
/// Syntax problems are not here: they become diagnostics on the tree.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Output serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::LexicalAnalysis(error) => error.error_code(),
            PipelineError::Io(_) => codes::driver::INPUT_READ_ERROR,
            PipelineError::Config(error) => error.error_code(),
            PipelineError::Serialization(_) => codes::driver::OUTPUT_FORMAT_ERROR,
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
