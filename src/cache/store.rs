// Cache store for reading and writing cached response bodies.
// Each entry is one file named by its key; the file mtime is the entry timestamp.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::NamedTempFile;

use super::key::CacheKey;
use crate::error::{CacheError, Result};

/// A cached response body and when it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Raw response body bytes.
    pub body: Vec<u8>,
    /// Last modification time reported by the store.
    pub modified: SystemTime,
}

/// Storage capability used by the cache transport.
///
/// `read` returns `Ok(None)` when no entry exists; any other failure is an error.
/// `write` must be atomic: readers see either the old or the new entry, never a
/// partial one.
pub trait CacheStore: Send + Sync {
    fn read(&self, key: &CacheKey) -> Result<Option<CacheEntry>>;

    fn write(&self, key: &CacheKey, body: &[u8]) -> Result<()>;
}

/// File-system backed cache store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store, making sure the root directory exists.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(CacheError::MissingCacheDir);
        }

        fs::create_dir_all(&root).map_err(|source| CacheError::CreateCacheDir {
            path: root.clone(),
            source,
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding the entry for `key`.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.as_str())
    }
}

impl CacheStore for FsStore {
    fn read(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        let path = self.path_for(key);

        let modified = match fs::metadata(&path).and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let body = match fs::read(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(CacheEntry { body, modified }))
    }

    fn write(&self, key: &CacheKey, body: &[u8]) -> Result<()> {
        // Write atomically via temp file in the same directory
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(body)?;
        file.as_file().sync_all()?;
        file.persist(self.path_for(key))?;

        Ok(())
    }
}
