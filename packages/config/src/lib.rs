// ABOUTME: Configuration for the Academy admin console client
// ABOUTME: Environment variable names, protocol defaults and settings resolution

pub mod constants;
pub mod settings;

// Re-export main types
pub use settings::{
    academy_dir, base_url_or_fallback, default_token_file, parse_base_url, validate_cookie_name,
    validate_header_name, ClientSettings, ConfigError, ConfigResult,
};
