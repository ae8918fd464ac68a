// ABOUTME: REST client for the Academy admin console backend
// ABOUTME: Every call attaches the anti-forgery token and resynchronizes it from the response

pub mod client;
pub mod envelope;
pub mod error;
pub mod request;

// Re-export main types
pub use client::{ApiClient, TokenSource};
pub use envelope::{failure_message, parse_error_message, parse_success_body, unwrap_envelope};
pub use error::{ApiError, ApiResult};
pub use request::{RequestBody, RequestOptions};

// Re-export the auth types callers wire into the client
pub use academy_auth::{FileTokenStore, MemoryTokenStore, Token, TokenStore};
