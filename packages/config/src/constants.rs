// ABOUTME: Environment variable name constants and protocol defaults
// ABOUTME: Centralized definitions shared by the auth, client and cli packages

// API Origin
pub const ACADEMY_API_BASE_URL: &str = "ACADEMY_API_BASE_URL";

// Anti-forgery Token Names
pub const ACADEMY_CSRF_COOKIE_NAME: &str = "ACADEMY_CSRF_COOKIE_NAME";
pub const ACADEMY_CSRF_HEADER_NAME: &str = "ACADEMY_CSRF_HEADER_NAME";

// Token Persistence
pub const ACADEMY_TOKEN_FILE: &str = "ACADEMY_TOKEN_FILE";

// HTTP Client Timeouts (unset means no timeout)
pub const ACADEMY_HTTP_REQUEST_TIMEOUT_SECS: &str = "ACADEMY_HTTP_REQUEST_TIMEOUT_SECS";
pub const ACADEMY_HTTP_CONNECT_TIMEOUT_SECS: &str = "ACADEMY_HTTP_CONNECT_TIMEOUT_SECS";

// System Environment Variables
pub const HOME: &str = "HOME";

/// Local development origin, also used when an embedded origin is unusable
pub const FALLBACK_API_BASE_URL: &str = "http://localhost:8080";

/// Default API origin used when `ACADEMY_API_BASE_URL` is not set.
/// Release builds may embed one through `ACADEMY_BUILD_API_BASE_URL`.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("ACADEMY_BUILD_API_BASE_URL") {
    Some(url) => url,
    None => FALLBACK_API_BASE_URL,
};

/// Cookie the backend sets after login, readable by the client
pub const DEFAULT_CSRF_COOKIE_NAME: &str = "XSRF-TOKEN";

/// Header the client echoes the token under (and the server may rotate it through)
pub const DEFAULT_CSRF_HEADER_NAME: &str = "X-XSRF-TOKEN";

/// Directory under the home directory holding console state
pub const ACADEMY_DIR_NAME: &str = ".academy";

/// File name of the persisted token inside the console directory
pub const TOKEN_FILE_NAME: &str = "csrf-token.toml";
