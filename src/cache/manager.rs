//! Cache manager for persisting upstream responses to disk
//!
//! Provides a `CacheManager` that stores one JSON file per cache key and
//! replaces files atomically, so a concurrent reader never sees a torn write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;
use tracing::warn;

use super::entry::CacheEntry;
use super::store::{validate_key, CacheStore, StoreError};

/// Disk-backed cache store
///
/// Entries live in an XDG-compliant cache directory (`~/.cache/matchday/` on
/// Linux) as `<key>.json`. A directory that cannot be created leaves the store
/// behaving as empty; every save then fails and is logged by the caller.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using the platform cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "matchday")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory holding the cache files
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to a cache file for the given key
    pub fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

impl CacheStore for CacheManager {
    fn ensure_storage_ready(&self) {
        if let Err(err) = fs::create_dir_all(&self.cache_dir) {
            warn!(
                cache_dir = %self.cache_dir.display(),
                error = %err,
                "failed to create cache directory"
            );
        }
    }

    fn put(&self, key: &str, entry: &CacheEntry) -> Result<(), StoreError> {
        validate_key(key)?;
        fs::create_dir_all(&self.cache_dir)?;

        let json = serde_json::to_string_pretty(entry)?;

        // Temp file in the same directory so the rename stays on one filesystem
        let mut file = NamedTempFile::new_in(&self.cache_dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(self.cache_path(key)).map_err(io::Error::from)?;

        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<CacheEntry>, StoreError> {
        validate_key(key)?;

        let content = match fs::read_to_string(self.cache_path(key)) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }
}
