// ABOUTME: Error type returned by every API call
// ABOUTME: Transport, HTTP status, decode and cancellation failures

use thiserror::Error;

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure outcome of an API call.
///
/// `Transport` and `Http` display as the bare message so callers can show
/// it to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Create an HTTP failure
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Human-readable message for display
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status code for HTTP failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a network-related error
    pub fn is_transport_error(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// Check if the server rejected the session or the anti-forgery token
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_message() {
        assert_eq!(ApiError::http(400, "bad input").to_string(), "bad input");
        assert_eq!(
            ApiError::Transport("connection refused".to_string()).to_string(),
            "connection refused"
        );
    }

    #[test]
    fn test_error_predicates() {
        let forbidden = ApiError::http(403, "Invalid CSRF token");
        assert!(forbidden.is_auth_error());
        assert!(!forbidden.is_transport_error());
        assert_eq!(forbidden.status(), Some(403));

        let server = ApiError::http(500, "HTTP 500");
        assert!(!server.is_auth_error());

        let network = ApiError::Transport("dns failure".to_string());
        assert!(network.is_transport_error());
        assert_eq!(network.status(), None);
    }
}
