//! Error and success codes with their classification metadata
//!
//! Every code the front end logs is declared here, grouped by stage, and
//! described once in the metadata registry.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Driver and configuration error codes
pub mod driver {
    use super::Code;

    pub const INPUT_READ_ERROR: Code = Code::new("E011");
    pub const CONFIG_ERROR: Code = Code::new("E012");
    pub const OUTPUT_FORMAT_ERROR: Code = Code::new("E013");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const BAD_CHARACTER: Code = Code::new("E020");
    pub const SOURCE_TOO_LONG: Code = Code::new("E021");
    pub const INVALID_NUMBER: Code = Code::new("E022");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const NESTING_TOO_DEEP: Code = Code::new("E087");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const LINE_PROCESSED: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const ERROR_METADATA: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or configuration initialization failure",
        "Check SC_* environment variables and the configuration file",
    ),
    // Driver
    ErrorMetadata::new(
        "E011",
        "Driver",
        Severity::High,
        false,
        true,
        "Failed to read input or write output",
        "Check that stdin and stdout are available",
    ),
    ErrorMetadata::new(
        "E012",
        "Driver",
        Severity::High,
        false,
        true,
        "Invalid runtime configuration",
        "Fix the configuration file syntax or values",
    ),
    ErrorMetadata::new(
        "E013",
        "Driver",
        Severity::Medium,
        true,
        false,
        "Failed to serialize output",
        "Use plain text output",
    ),
    // Lexical
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::Medium,
        true,
        false,
        "Character is not part of the expression language",
        "Use only digits, whitespace, + - * / and parentheses",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::High,
        false,
        false,
        "Source line exceeds the maximum length",
        "Split the expression or rebuild with a larger max_source_length",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::Medium,
        true,
        false,
        "Number literal does not fit in a 32-bit signed integer",
        "Use a value no larger than 2147483647",
    ),
    ErrorMetadata::new(
        "E027",
        "Lexical",
        Severity::High,
        false,
        false,
        "Source line produces too many tokens",
        "Simplify the expression or rebuild with a larger max_token_count",
    ),
    // Syntax
    ErrorMetadata::new(
        "E050",
        "Syntax",
        Severity::Medium,
        true,
        false,
        "Token does not fit the expression grammar at this point",
        "Check for missing operands, operators or parentheses",
    ),
    ErrorMetadata::new(
        "E087",
        "Syntax",
        Severity::High,
        true,
        false,
        "Parenthesis nesting exceeds the parser depth limit",
        "Remove redundant parentheses",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        ERROR_METADATA
            .iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let error_codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            driver::INPUT_READ_ERROR,
            driver::CONFIG_ERROR,
            driver::OUTPUT_FORMAT_ERROR,
            lexical::BAD_CHARACTER,
            lexical::SOURCE_TOO_LONG,
            lexical::INVALID_NUMBER,
            lexical::TOO_MANY_TOKENS,
            syntax::UNEXPECTED_TOKEN,
            syntax::NESTING_TOO_DEEP,
        ];
        for code in error_codes {
            let metadata = get_error_metadata(code.as_str())
                .unwrap_or_else(|| panic!("missing metadata for {}", code));
            assert_eq!(metadata.code, code.as_str());
        }
    }

    #[test]
    fn test_registry_codes_are_unique() {
        assert_eq!(get_error_registry().len(), ERROR_METADATA.len());
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E050"), "Syntax");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(requires_halt("ERR001"));
        assert!(is_recoverable("E020"));
        assert!(!is_recoverable("E021"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_action("E999"), "No specific action available");
        assert!(is_recoverable("E999"));
        assert!(!requires_halt("E999"));
    }
}
