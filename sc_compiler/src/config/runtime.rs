// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logging::codes::{self, Code};

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to compute token metrics after each line
    pub collect_detailed_metrics: bool,

    /// Whether to count operators by kind
    pub track_operator_patterns: bool,

    /// Whether to log every token at debug level
    pub log_token_trace: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
            track_operator_patterns: env_flag(env_vars::LEXICAL_TRACK_OPERATORS, false),
            log_token_trace: env_flag(env_vars::LEXICAL_TOKEN_TRACE, false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Whether diagnostics are printed with the source line and a caret
    pub render_source_context: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            render_source_context: env_flag(env_vars::SYNTAX_RENDER_SOURCE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether info and debug chatter reaches the console; errors always do
    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplPreferences {
    pub prompt: String,

    /// `tokens` or `tree`
    pub default_mode: String,

    /// Whether each line is answered with a JSON document
    pub json_output: bool,
}

impl Default for ReplPreferences {
    fn default() -> Self {
        Self {
            prompt: env::var(env_vars::REPL_PROMPT).unwrap_or_else(|_| "> ".to_string()),
            default_mode: env::var(env_vars::REPL_MODE).unwrap_or_else(|_| "tokens".to_string()),
            json_output: env_flag(env_vars::REPL_JSON, false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Accepts names in any case or the numeric levels 0-3
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        match self {
            ConfigError::Read { .. } => codes::driver::INPUT_READ_ERROR,
            ConfigError::Parse(_) => codes::driver::CONFIG_ERROR,
        }
    }
}

/// Every runtime preference; sections missing from a file fall back to the
/// environment defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
    pub repl: ReplPreferences,
}

impl RuntimeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "SC_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_TRACK_OPERATORS: &str = "SC_LEXICAL_TRACK_OPERATORS";
    pub const LEXICAL_TOKEN_TRACE: &str = "SC_LEXICAL_TOKEN_TRACE";

    // Syntax
    pub const SYNTAX_RENDER_SOURCE_CONTEXT: &str = "SC_SYNTAX_RENDER_SOURCE_CONTEXT";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SC_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SC_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SC_LOGGING_MIN_LEVEL";

    // REPL
    pub const REPL_PROMPT: &str = "SC_REPL_PROMPT";
    pub const REPL_MODE: &str = "SC_REPL_MODE";
    pub const REPL_JSON: &str = "SC_REPL_JSON";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [repl]
            prompt = "sc> "

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.repl.prompt, "sc> ");
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert_eq!(config.lexical, LexicalPreferences::default());
        assert_eq!(config.syntax, SyntaxPreferences::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let error = RuntimeConfig::from_toml_str("[logging]\nmin_log_level = \"loud\"").unwrap_err();
        assert_matches!(error, ConfigError::Parse(_));
        assert_eq!(error.error_code(), codes::driver::CONFIG_ERROR);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lexical]\ntrack_operator_patterns = true").unwrap();

        let config = RuntimeConfig::load(file.path()).unwrap();
        assert!(config.lexical.track_operator_patterns);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = RuntimeConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert_matches!(error, ConfigError::Read { .. });
        assert_eq!(error.error_code(), codes::driver::INPUT_READ_ERROR);
    }

    #[test]
    fn test_env_var_names_are_prefixed() {
        for name in [
            env_vars::LEXICAL_DETAILED_METRICS,
            env_vars::SYNTAX_RENDER_SOURCE_CONTEXT,
            env_vars::LOGGING_MIN_LEVEL,
            env_vars::REPL_PROMPT,
        ] {
            assert!(name.starts_with("SC_"));
        }
    }
}
