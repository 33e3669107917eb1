//! Directory-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a uniquely named
//! temporary file in the same directory and are renamed into place, so a
//! reader sees either the old or the new value. Read-modify-write sequences
//! take an advisory lock on `<dir>/<key>.lock`.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::StorageError;

#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Raw contents of `key`, `None` if never written.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// Typed value of `key`.
    ///
    /// A value that no longer deserializes reads as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring unreadable stored value");
                Ok(None)
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let content =
            serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
                key: key.to_string(),
                source,
            })?;

        let tmp_path = self
            .dir
            .join(format!(".{}.{}.tmp", key, uuid::Uuid::new_v4().simple()));
        fs::write(&tmp_path, content).map_err(|e| StorageError::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::io(path, e));
        }
        Ok(())
    }

    /// Delete `key`. Deleting a missing key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// Exclusive advisory lock for `key`, released when the guard drops.
    ///
    /// Blocks until any other holder (in this or another process) releases.
    pub fn lock(&self, key: &str) -> Result<KeyLock, StorageError> {
        validate_key(key)?;
        let path = self.dir.join(format!("{}.lock", key));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| StorageError::io(&path, e))?;
        FileExt::lock_exclusive(&file).map_err(|source| StorageError::Lock {
            path: path.clone(),
            source,
        })?;
        Ok(KeyLock { file, path })
    }

    /// Move an unreadable value aside so the next write does not destroy it.
    ///
    /// Returns the backup path, or `None` if the key was absent.
    pub fn quarantine(&self, key: &str) -> Result<Option<PathBuf>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let backup = self.dir.join(format!(
            "{}.json.corrupt-{}",
            key,
            chrono::Utc::now().format("%Y%m%d%H%M%S%3f")
        ));
        fs::rename(&path, &backup).map_err(|e| StorageError::io(&path, e))?;
        tracing::warn!(
            key,
            backup = %backup.display(),
            "Moved unreadable value aside"
        );
        Ok(Some(backup))
    }
}

/// Guard returned by [`KvStore::lock`].
#[derive(Debug)]
pub struct KeyLock {
    file: File,
    path: PathBuf,
}

impl Drop for KeyLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::debug!(path = %self.path.display(), error = %e, "Failed to release lock");
        }
    }
}

/// Keys become file names: ASCII letters, digits, `_`, `-` and `.`, not
/// starting with a dot.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
