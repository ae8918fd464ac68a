// ABOUTME: Token store abstraction and its in-memory and file-backed implementations
// ABOUTME: Reads degrade to None and writes to no-ops when storage is unavailable

mod file;
mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use std::sync::Arc;

use crate::token::Token;

/// Synchronous holder of the current anti-forgery token.
///
/// Implementations never fail: absence and unavailable storage are both
/// reported as `None`, and writes that cannot be performed are dropped.
pub trait TokenStore: Send + Sync {
    /// Current token, if any
    fn get(&self) -> Option<Token>;

    /// Overwrite the current token
    fn set(&self, token: &Token);

    /// Clear the current token
    fn remove(&self);
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn get(&self) -> Option<Token> {
        (**self).get()
    }

    fn set(&self, token: &Token) {
        (**self).set(token)
    }

    fn remove(&self) {
        (**self).remove()
    }
}
