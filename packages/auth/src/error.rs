// ABOUTME: Error types for token persistence
// ABOUTME: Internal to the file store; the TokenStore trait degrades these to absence

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Token storage unavailable: no storage location")]
    Unavailable,

    #[error("Invalid token file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize token: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
