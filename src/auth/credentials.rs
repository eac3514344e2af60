//! Credential storage.

use crate::error::CredentialResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Holds the bearer token for the current operator.
pub trait CredentialStore: Send + Sync {
    /// The stored token, if any.
    fn get(&self) -> Option<String>;

    /// Replace the stored token.
    fn set(&self, token: &str) -> CredentialResult<()>;

    /// Forget the stored token.
    fn clear(&self) -> CredentialResult<()>;
}

/// Current token. A panic elsewhere while the lock was held does not hide it.
fn read_token(lock: &RwLock<Option<String>>) -> Option<String> {
    lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Overwrite the token, recovering the lock if it was poisoned so that a
/// clear always takes effect.
fn replace_token(lock: &RwLock<Option<String>>, token: Option<String>) {
    *lock.write().unwrap_or_else(PoisonError::into_inner) = token;
}

/// On-disk layout of the token file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
    saved_at: String,
}

/// Token persisted as JSON at a fixed path, surviving restarts.
///
/// The file is read once when the store is opened. A missing, unreadable or
/// corrupt file means "logged out".
pub struct FileCredentialStore {
    path: PathBuf,
    token: RwLock<Option<String>>,
}

impl FileCredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = Self::load(&path);
        if token.is_some() {
            tracing::debug!("Loaded stored credential from {}", path.display());
        }
        Self {
            path,
            token: RwLock::new(token),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Option<String> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable credential file {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<StoredCredential>(&contents) {
            Ok(stored) if !stored.token.is_empty() => Some(stored.token),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Ignoring corrupt credential file {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        read_token(&self.token)
    }

    fn set(&self, token: &str) -> CredentialResult<()> {
        let stored = StoredCredential {
            token: token.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&stored)?)?;

        replace_token(&self.token, Some(stored.token));
        Ok(())
    }

    fn clear(&self) -> CredentialResult<()> {
        replace_token(&self.token, None);

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Token kept only for the life of the process.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        read_token(&self.token)
    }

    fn set(&self, token: &str) -> CredentialResult<()> {
        replace_token(&self.token, Some(token.to_string()));
        Ok(())
    }

    fn clear(&self) -> CredentialResult<()> {
        replace_token(&self.token, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemoryCredentialStore::new();
        assert!(store.get().is_none());

        store.set("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    fn poison(lock: &RwLock<Option<String>>) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = lock.write().unwrap();
            panic!("writer died holding the token lock");
        }));
        assert!(result.is_err());
        assert!(lock.is_poisoned());
    }

    #[test]
    fn test_memory_store_clears_after_poisoned_lock() {
        let store = MemoryCredentialStore::with_token("abc");
        poison(&store.token);

        assert_eq!(store.get().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert!(store.get().is_none());
        store.set("fresh").unwrap();
        assert_eq!(store.get().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_store_clears_after_poisoned_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let store = FileCredentialStore::open(&path);
        store.set("abc").unwrap();
        poison(&store.token);

        store.clear().unwrap();
        assert!(store.get().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("token.json");

        let store = FileCredentialStore::open(&path);
        assert!(store.get().is_none());
        store.set("persisted-token").unwrap();

        let reopened = FileCredentialStore::open(&path);
        assert_eq!(reopened.get().as_deref(), Some("persisted-token"));
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");

        let store = FileCredentialStore::open(&path);
        store.set("t").unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.get().is_none());

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::open(&path);
        assert!(store.get().is_none());
    }
}
