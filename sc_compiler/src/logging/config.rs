//! Logging configuration
//!
//! Buffer sizes come from the build-time constants. Verbosity and output
//! format are runtime preferences, set once at startup or read from the
//! environment.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences; fails if they were already set
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Get runtime preferences (with fallback to environment defaults)
fn get_runtime_preferences() -> &'static LoggingPreferences {
    RUNTIME_PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Maximum events retained by in-memory loggers
pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Messages longer than this many characters are truncated
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Validate the compile-time logging constants
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE == 0 {
        return Err("Log buffer size must be positive".to_string());
    }

    if MAX_LOG_MESSAGE_LENGTH < 16 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}

pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         - Log buffer size: {}\n\
         - Max message length: {}\n\
         - Min log level: {}\n\
         - Structured logging: {}\n\
         - Console logging: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
        preferences.min_log_level.as_str(),
        preferences.use_structured_logging,
        preferences.enable_console_logging,
    )
}
