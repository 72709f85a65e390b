//! File-backed session store.
//!
//! Restores the token on load and keeps the file in step with the in-memory
//! copy. The in-memory copy is authoritative; a failed write leaves the
//! session usable for the rest of the process.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::domain::account::AuthToken;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    token: RwLock<Option<AuthToken>>,
}

impl FileSessionStore {
    /// Opens the store, reading any token persisted at `path`.
    ///
    /// A missing or blank file means signed out.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SessionStoreError> {
        let path = path.as_ref().to_path_buf();
        let token = match fs::read_to_string(&path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                (!trimmed.is_empty()).then(|| AuthToken::new(trimmed))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), restored = token.is_some(), "Session store loaded");

        Ok(Self {
            path,
            token: RwLock::new(token),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, token: &AuthToken) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token.expose())?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<AuthToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: AuthToken) -> Result<(), SessionStoreError> {
        let result = self.persist(&token);
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        result
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
