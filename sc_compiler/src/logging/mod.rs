//! Global logging for the expression front end
//!
//! A single `LoggingService` is installed once per process. Lexer, parser
//! and driver report through the macros in `macros`, which are silent until
//! that happens, so library callers that never initialize logging pay
//! nothing beyond a `OnceLock` read.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the build constants and runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    for code in [
        codes::lexical::BAD_CHARACTER,
        codes::lexical::INVALID_NUMBER,
        codes::syntax::UNEXPECTED_TOKEN,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));
    logging_service.log_event(LogEvent::debug(&config::get_config_summary()));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// True when a debug event would reach the installed logger
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }

    logger.log_event(attach_context(event, context));
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    log_event_with_context(LogEvent::success(code, message), context);
}

/// Log a prepared event (used by log_info!, log_warning! and log_debug!)
pub fn log_event_with_context(event: LogEvent, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(attach_context(event, context));
    }
}

fn attach_context(event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    context
        .into_iter()
        .fold(event, |event, (key, value)| event.with_context(key, value))
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Error logging that falls back to stderr before initialization
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{log_debug, log_error, log_info, log_success, log_warning};

    #[test]
    fn test_attach_context_keeps_pairs() {
        let event = attach_context(
            LogEvent::info("line"),
            vec![("length", "5"), ("mode", "tree")],
        );
        assert_eq!(event.context.get("length").map(String::as_str), Some("5"));
        assert_eq!(event.context.get("mode").map(String::as_str), Some("tree"));
    }

    #[test]
    fn test_macros_are_silent_without_logger() {
        // Whether or not another test installed a logger, these must not panic
        log_error!(codes::lexical::BAD_CHARACTER, "bad", "character" => '$');
        log_error!(codes::lexical::SOURCE_TOO_LONG, "long",
            span = crate::utils::Span::new(4, 9),
            "length" => 9
        );
        log_success!(codes::success::LINE_PROCESSED, "done");
        log_info!("info", "count" => 3);
        log_warning!("warn");
        log_debug!("debug", "position" => 0);
    }

    #[test]
    fn test_safe_logging() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }
}
