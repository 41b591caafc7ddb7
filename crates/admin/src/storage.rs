//! Durable client storage for the dashboard session.
//!
//! The session token, refresh token and cached user profile each live in a
//! named slot of a [`SessionStorage`]. Storage is a best-effort collaborator:
//! when it is unavailable or failing, writes are dropped and reads return
//! `None`. Failures are logged, never returned.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

/// Slot holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Slot holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Slot holding the signed-in user's profile as JSON.
pub const USER_KEY: &str = "user";

/// Every slot that belongs to the session.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Key-value storage for session slots.
pub trait SessionStorage: Send + Sync {
    /// Read a slot.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot.
    fn set(&self, key: &str, value: &str);

    /// Delete a slot. Deleting a missing slot is not an error.
    fn remove(&self, key: &str);
}

/// Open the storage for a configured directory, or the no-op storage when
/// no directory is available.
#[must_use]
pub fn open(dir: Option<&Path>) -> Arc<dyn SessionStorage> {
    match dir {
        Some(dir) => Arc::new(FileStorage::new(dir)),
        None => {
            warn!("No storage directory available, session will not persist");
            Arc::new(UnavailableStorage)
        }
    }
}

/// In-process storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Storage that keeps each slot in its own file under a directory.
///
/// Files are written with owner-only permissions on Unix and replaced
/// atomically via a temporary file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for the slot files. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Some(self.dir.join(key))
        } else {
            warn!(key = %key, "Rejected invalid storage key");
            None
        }
    }

    fn write(&self, path: &Path, value: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value)?;
        restrict_permissions(&tmp)?;
        std::fs::rename(&tmp, path)
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read storage slot");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let Some(path) = self.slot_path(key) else {
            return;
        };
        match self.write(&path, value) {
            Ok(()) => debug!(key = %key, "Storage slot written"),
            Err(e) => warn!(key = %key, error = %e, "Failed to write storage slot"),
        }
    }

    fn remove(&self, key: &str) {
        let Some(path) = self.slot_path(key) else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => debug!(key = %key, "Storage slot removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(key = %key, error = %e, "Failed to remove storage slot"),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Storage used when no durable backing exists. Every call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl SessionStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("storedash-storage-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_KEY), None);

        storage.set(TOKEN_KEY, "abc123");
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc123"));

        storage.remove(TOKEN_KEY);
        storage.remove(TOKEN_KEY);
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = temp_dir();
        FileStorage::new(&dir).set(TOKEN_KEY, "abc123");

        let reopened = FileStorage::new(&dir);
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("abc123"));

        reopened.remove(TOKEN_KEY);
        assert_eq!(reopened.get(TOKEN_KEY), None);
        reopened.remove(TOKEN_KEY);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_storage_overwrites_slot() {
        let dir = temp_dir();
        let storage = FileStorage::new(&dir);
        storage.set(USER_KEY, "{\"id\":1}");
        storage.set(USER_KEY, "{\"id\":2}");
        assert_eq!(storage.get(USER_KEY).as_deref(), Some("{\"id\":2}"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = temp_dir();
        let storage = FileStorage::new(&dir);
        storage.set(TOKEN_KEY, "secret");
        let mode = std::fs::metadata(dir.join(TOKEN_KEY))
            .map(|m| m.permissions().mode() & 0o777)
            .unwrap_or_default();
        assert_eq!(mode, 0o600);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = temp_dir();
        let storage = FileStorage::new(&dir);
        storage.set("../escape", "x");
        assert_eq!(storage.get("../escape"), None);
        assert!(!dir.join("../escape").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_storage_missing_dir_reads_none() {
        let storage = FileStorage::new(temp_dir());
        assert_eq!(storage.get(TOKEN_KEY), None);
        storage.remove(TOKEN_KEY);
    }

    #[test]
    fn test_unavailable_storage_is_noop() {
        let storage = open(None);
        storage.set(TOKEN_KEY, "abc");
        assert_eq!(storage.get(TOKEN_KEY), None);
        storage.remove(TOKEN_KEY);
    }
}
