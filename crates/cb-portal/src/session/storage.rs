//! Session Storage Adapters
//!
//! Thin adapter layer between the session holder and durable local storage,
//! kept separate from the pure guard logic. One record, three operations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{PortalError, Result};
use crate::session::entity::PersistedSession;

/// Durable storage for the single persisted session entry.
pub trait SessionStorage: Send + Sync {
    /// Read the entry. `Ok(None)` means "checked, nothing stored";
    /// `Err` means the entry exists but could not be read or parsed.
    fn load(&self) -> Result<Option<PersistedSession>>;

    /// Write (replace) the entry.
    fn save(&self, entry: &PersistedSession) -> Result<()>;

    /// Remove the entry. Removing a missing entry is not an error.
    fn delete(&self) -> Result<()>;
}

/// File-backed storage: one JSON document under the configured data dir.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<PersistedSession>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry = serde_json::from_str(&content)
            .map_err(|e| PortalError::malformed_session(e.to_string()))?;
        Ok(Some(entry))
    }

    fn save(&self, entry: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash mid-write cannot leave a torn entry
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entry)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "Persisted session entry");
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for tests and dev mode.
#[derive(Default)]
pub struct MemorySessionStorage {
    entry: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the entry, simulating a previous login.
    pub fn with_entry(entry: PersistedSession) -> Self {
        Self {
            entry: Mutex::new(Some(entry)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.entry.lock().clone())
    }

    fn save(&self, entry: &PersistedSession) -> Result<()> {
        *self.entry.lock() = Some(entry.clone());
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        *self.entry.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_common::{Identity, Role};

    fn sample_entry() -> PersistedSession {
        PersistedSession::new(Identity::new("Sam Admin", "admins/sam"), Role::Admin)
    }

    #[test]
    fn file_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("session.json"));

        assert!(storage.load().unwrap().is_none());

        let entry = sample_entry();
        storage.save(&entry).unwrap();
        assert_eq!(storage.load().unwrap(), Some(entry));

        storage.delete().unwrap();
        assert!(storage.load().unwrap().is_none());
        // Deleting again is fine
        storage.delete().unwrap();
    }

    #[test]
    fn file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested/data/session.json"));
        storage.save(&sample_entry()).unwrap();
        assert!(storage.load().unwrap().is_some());
    }

    #[test]
    fn malformed_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let storage = FileSessionStorage::new(&path);
        let err = storage.load().unwrap_err();
        assert!(matches!(err, PortalError::MalformedSession { .. }));
    }

    #[test]
    fn memory_storage_round_trips() {
        let storage = MemorySessionStorage::new();
        assert!(storage.load().unwrap().is_none());

        let entry = sample_entry();
        storage.save(&entry).unwrap();
        assert_eq!(storage.load().unwrap(), Some(entry));

        storage.delete().unwrap();
        assert!(storage.load().unwrap().is_none());
    }
}
