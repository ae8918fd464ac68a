// ABOUTME: Anti-forgery token handling for the Academy admin console
// ABOUTME: Persistent token store plus exact-name cookie extraction from the client cookie jar

pub mod cookie;
pub mod error;
pub mod store;
pub mod token;

// Re-export main types
pub use cookie::{token_from_cookie_header, CookieReader};
pub use error::{StoreError, StoreResult};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::Token;
