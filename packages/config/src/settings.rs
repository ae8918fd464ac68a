// ABOUTME: Client settings resolved from the process environment
// ABOUTME: API origin, anti-forgery cookie/header names, token file location and timeouts

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::constants::*;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("API base URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("Invalid cookie name: {0:?}")]
    InvalidCookieName(String),

    #[error("Invalid header name: {0:?}")]
    InvalidHeaderName(String),

    #[error("Invalid timeout for {var}: {value:?} (expected whole seconds greater than 0)")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Settings needed to build an API client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_base_url: Url,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
    /// `None` when no home directory can be resolved and no override is set
    pub token_file: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn from_env() -> ConfigResult<Self> {
        let api_base_url = match env::var(ACADEMY_API_BASE_URL) {
            Ok(base) => parse_base_url(&base)?,
            Err(_) => base_url_or_fallback(DEFAULT_API_BASE_URL),
        };

        let csrf_cookie_name = env::var(ACADEMY_CSRF_COOKIE_NAME)
            .unwrap_or_else(|_| DEFAULT_CSRF_COOKIE_NAME.to_string());
        validate_cookie_name(&csrf_cookie_name)?;

        let csrf_header_name = env::var(ACADEMY_CSRF_HEADER_NAME)
            .unwrap_or_else(|_| DEFAULT_CSRF_HEADER_NAME.to_string());
        validate_header_name(&csrf_header_name)?;

        let token_file = match env::var(ACADEMY_TOKEN_FILE) {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => default_token_file(),
        };

        let request_timeout = timeout_from_env(ACADEMY_HTTP_REQUEST_TIMEOUT_SECS)?;
        let connect_timeout = timeout_from_env(ACADEMY_HTTP_CONNECT_TIMEOUT_SECS)?;

        debug!(
            api_base_url = %api_base_url,
            cookie = %csrf_cookie_name,
            header = %csrf_header_name,
            "Loaded client settings"
        );

        Ok(Self {
            api_base_url,
            csrf_cookie_name,
            csrf_header_name,
            token_file,
            request_timeout,
            connect_timeout,
        })
    }

    /// Settings for a given origin with every other value at its default
    pub fn for_base_url(base: &str) -> ConfigResult<Self> {
        Ok(Self {
            api_base_url: parse_base_url(base)?,
            ..Self::default()
        })
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: base_url_or_fallback(DEFAULT_API_BASE_URL),
            csrf_cookie_name: DEFAULT_CSRF_COOKIE_NAME.to_string(),
            csrf_header_name: DEFAULT_CSRF_HEADER_NAME.to_string(),
            token_file: default_token_file(),
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

/// Get the console state directory (~/.academy)
pub fn academy_dir() -> Option<PathBuf> {
    // HOME first so tests can redirect it
    match env::var(HOME) {
        Ok(home) if !home.is_empty() => Some(PathBuf::from(home).join(ACADEMY_DIR_NAME)),
        _ => dirs::home_dir().map(|home| home.join(ACADEMY_DIR_NAME)),
    }
}

/// Get the default token file path (~/.academy/csrf-token.toml)
pub fn default_token_file() -> Option<PathBuf> {
    academy_dir().map(|dir| dir.join(TOKEN_FILE_NAME))
}

pub fn parse_base_url(value: &str) -> ConfigResult<Url> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

/// Parse `value` as the API origin, falling back to the local development origin
pub fn base_url_or_fallback(value: &str) -> Url {
    parse_base_url(value).unwrap_or_else(|e| {
        warn!(error = %e, fallback = FALLBACK_API_BASE_URL, "Unusable default API base URL");
        Url::parse(FALLBACK_API_BASE_URL).expect("Fallback API base URL is valid")
    })
}

// RFC 7230 tchar
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

pub fn validate_header_name(name: &str) -> ConfigResult<()> {
    if name.is_empty() || !name.chars().all(is_token_char) {
        return Err(ConfigError::InvalidHeaderName(name.to_string()));
    }
    Ok(())
}

pub fn validate_cookie_name(name: &str) -> ConfigResult<()> {
    if name.is_empty() || !name.chars().all(is_token_char) {
        return Err(ConfigError::InvalidCookieName(name.to_string()));
    }
    Ok(())
}

fn timeout_from_env(var: &'static str) -> ConfigResult<Option<Duration>> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
            _ => Err(ConfigError::InvalidTimeout { var, value }),
        },
        Err(_) => Ok(None),
    }
}
