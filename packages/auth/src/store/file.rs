// ABOUTME: File-backed token store persisting the token across process restarts
// ABOUTME: TOML file written atomically; unavailable or corrupt storage reads as absent

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use academy_config::constants::ACADEMY_TOKEN_FILE;
use academy_config::{default_token_file, ClientSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::TokenStore;
use crate::error::{StoreError, StoreResult};
use crate::token::Token;

/// On-disk record of the persisted token
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    value: Token,
    updated_at: DateTime<Utc>,
}

/// Token store persisted as a TOML file so the token survives restarts.
///
/// A store without a path models a context with no usable storage: every
/// read yields `None` and every write is skipped.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: Option<PathBuf>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store with no storage location
    pub fn unavailable() -> Self {
        Self { path: None }
    }

    /// `ACADEMY_TOKEN_FILE` if set, otherwise `~/.academy/csrf-token.toml`
    pub fn from_env() -> Self {
        let path = match std::env::var(ACADEMY_TOKEN_FILE) {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => default_token_file(),
        };
        Self { path }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self {
            path: settings.token_file.clone(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }

    fn location(&self) -> StoreResult<&Path> {
        self.path.as_deref().ok_or(StoreError::Unavailable)
    }

    fn load(&self) -> StoreResult<Option<Token>> {
        let path = self.location()?;
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredToken = toml::from_str(&content)?;
        Ok(Some(stored.value))
    }

    fn save(&self, token: &Token) -> StoreResult<()> {
        let path = self.location()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let record = StoredToken {
            value: token.clone(),
            updated_at: Utc::now(),
        };
        let content = toml::to_string_pretty(&record)?;

        // Write then rename so readers never observe a half-written file
        let staging = path.with_extension("tmp");
        fs::write(&staging, content)?;
        restrict_permissions(&staging)?;
        fs::rename(&staging, path)?;
        Ok(())
    }

    fn delete(&self) -> StoreResult<()> {
        let path = self.location()?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::from_env()
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<Token> {
        if !self.is_available() {
            return None;
        }

        match self.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Ignoring unreadable token file");
                None
            }
        }
    }

    fn set(&self, token: &Token) {
        if !self.is_available() {
            debug!("Token storage unavailable, dropping write");
            return;
        }

        if let Err(e) = self.save(token) {
            warn!(path = ?self.path, error = %e, "Failed to persist token");
        }
    }

    fn remove(&self) {
        if !self.is_available() {
            return;
        }

        if let Err(e) = self.delete() {
            warn!(path = ?self.path, error = %e, "Failed to remove token file");
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
