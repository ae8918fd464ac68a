// ABOUTME: In-process token store holding the token for the lifetime of the value
// ABOUTME: Used by tests and short-lived sessions that need no persistence

use std::sync::RwLock;

use super::TokenStore;
use crate::token::Token;

/// Process-local token store, used by tests and short-lived sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<Token>) -> Self {
        Self {
            slot: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Token> {
        match self.slot.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, token: &Token) {
        match self.slot.write() {
            Ok(mut slot) => *slot = Some(token.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(token.clone()),
        }
    }

    fn remove(&self) {
        match self.slot.write() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}
