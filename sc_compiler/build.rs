// build.rs - TOML-driven compile-time limits
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_source_length: usize,
    max_token_count: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_parse_depth: usize,
    max_diagnostics: usize,
    max_render_depth: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SC_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SC_CONFIG_DIR");

    let profile = env::var("SC_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SC_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of sc_compiler directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    // The parser recurses once per nesting level
    const ABSOLUTE_MAX_PARSE_DEPTH: usize = 10_000;
    const ABSOLUTE_MAX_SOURCE_LENGTH: usize = 1_000_000;

    if config.lexical.max_source_length == 0 {
        panic!("LIMITS: max_source_length must be positive");
    }

    if config.lexical.max_source_length > ABSOLUTE_MAX_SOURCE_LENGTH {
        panic!("LIMITS: max_source_length exceeds absolute maximum");
    }

    // EndOfFile is not counted against max_token_count
    if config.lexical.max_token_count == 0 {
        panic!("LIMITS: max_token_count must be positive");
    }

    // Every other token is at least one byte long
    if config.lexical.max_token_count >= config.lexical.max_source_length {
        panic!("LIMITS: max_token_count must be below max_source_length or it can never be reached");
    }

    if config.syntax.max_parse_depth == 0 || config.syntax.max_parse_depth > ABSOLUTE_MAX_PARSE_DEPTH {
        panic!("LIMITS: max_parse_depth must be between 1 and {}", ABSOLUTE_MAX_PARSE_DEPTH);
    }

    if config.syntax.max_diagnostics == 0 {
        panic!("LIMITS: max_diagnostics must be positive");
    }

    if config.syntax.max_render_depth == 0 {
        panic!("LIMITS: max_render_depth must be positive");
    }

    if config.logging.log_buffer_size == 0 {
        panic!("LIMITS: log_buffer_size must be positive");
    }

    if config.logging.max_log_message_length < 16 {
        panic!("LIMITS: max_log_message_length must be at least 16");
    }

    if profile == "production" && config.syntax.max_parse_depth > 1_000 {
        panic!("PRODUCTION: max_parse_depth too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const MAX_SOURCE_LENGTH: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_PARSE_DEPTH: usize = {};
        pub const MAX_DIAGNOSTICS: usize = {};
        pub const MAX_RENDER_DEPTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        // Lexical
        config.lexical.max_source_length,
        config.lexical.max_token_count,
        // Syntax
        config.syntax.max_parse_depth,
        config.syntax.max_diagnostics,
        config.syntax.max_render_depth,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
