//! Session storage implementation
//!
//! This module handles persistence of the admin session, including
//! serialization, deserialization and expiration. The file store keeps one
//! JSON document under a fixed path; last write wins.
//!
//! `FileSessionStore` uses blocking `std::fs` even when called from async
//! request paths. Each CLI command touches one small file a few times, so
//! the calls are not moved onto `spawn_blocking`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, error, warn};
use crate::models::Session;
use crate::utils::errors::Result;

/// Storage backend for the admin session
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Load the stored session. Expired sessions are removed and reported
    /// as absent.
    fn load(&self) -> Result<Option<Session>>;

    /// Replace the stored session
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session; removing nothing is not an error
    fn clear(&self) -> Result<()>;
}

/// Session kept in a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored session");
                return Ok(None);
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to read session file");
                return Err(e.into());
            }
        };

        let session: Session = match serde_json::from_str(&data) {
            Ok(session) => session,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupted session file, removing");
                self.clear()?;
                return Ok(None);
            }
        };

        if session.is_expired() {
            warn!(expires_at = ?session.expires_at, "Session has expired, removing");
            self.clear()?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, serialized)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let mut guard = self.session.write().unwrap_or_else(|e| e.into_inner());
        if guard.as_ref().map(Session::is_expired).unwrap_or(false) {
            *guard = None;
        }
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
