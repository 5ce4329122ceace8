//! Filesystem storage for the session token.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use shamba_core::StorageError;
use shamba_core::TokenStore;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk form of one stored slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    /// The storage key this slot belongs to.
    pub key: String,
    /// The stored value.
    pub token: String,
    /// When the value was written.
    pub saved_at: DateTime<Utc>,
}

/// A [`TokenStore`] keeping each key in its own JSON file.
///
/// Writes go to a temporary file that is renamed into place while an
/// exclusive lock on `.lock` is held, so a concurrent reader sees either the
/// old value or the new one.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    root: PathBuf,
}

impl FileTokenStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize(key)))
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// Read the full stored record for `key`.
    pub fn load_record(&self, key: &str) -> Result<Option<StoredToken>, StorageError> {
        let path = self.slot_path(key);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredToken = serde_json::from_str(&json)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))?;

        if stored.key != key {
            return Err(StorageError::Corrupt(format!(
                "{} holds key '{}', expected '{}'",
                path.display(),
                stored.key,
                key
            )));
        }

        Ok(Some(stored))
    }

    fn lock(&self) -> Result<File, StorageError> {
        fs::create_dir_all(&self.root)?;
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        lock.lock_exclusive()?;
        Ok(lock)
    }
}

impl TokenStore for FileTokenStore {
    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let stored = self.load_record(key)?;
        debug!(found = stored.is_some(), "Loaded stored token");
        Ok(stored.map(|s| s.token))
    }

    #[instrument(skip(self, value))]
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let lock = self.lock()?;

        let stored = StoredToken {
            key: key.to_string(),
            token: value.to_string(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp)?;
            // Set restrictive permissions before the secret is written (Unix only)
            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;

        FileExt::unlock(&lock)?;
        debug!(path = %path.display(), "Stored token");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let lock = self.lock()?;

        match fs::remove_file(self.slot_path(key)) {
            Ok(()) => debug!("Removed stored token"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        FileExt::unlock(&lock)?;
        Ok(())
    }
}

/// Map a key to a filesystem-safe file stem.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
