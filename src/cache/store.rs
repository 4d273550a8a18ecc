//! Store abstraction for cached upstream payloads
//!
//! Implementations only provide the raw `put`/`get` primitives. The policy
//! operations (`save`, `load`, `is_fresh`, `age_of`) are provided methods so
//! every backend absorbs and logs failures the same way.

use chrono::Duration;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::entry::{duration_to_hours, CacheEntry};

/// Errors raised by the raw store primitives
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored entry could not be encoded or decoded
    #[error("cache entry is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The key contains characters that are not safe as a file name
    #[error("invalid cache key: '{0}'")]
    InvalidKey(String),
}

/// Checks that a key only uses ASCII alphanumerics, `_` and `-`
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Keyed storage holding the latest payload for each upstream resource
pub trait CacheStore: Send + Sync {
    /// Creates the storage location if it is missing.
    ///
    /// Must not fail the caller; a store that cannot be prepared behaves as empty.
    fn ensure_storage_ready(&self);

    /// Replaces the entry for `key`. Readers see the old or the new entry, never a mix.
    fn put(&self, key: &str, entry: &CacheEntry) -> Result<(), StoreError>;

    /// Returns the entry for `key`, `Ok(None)` when there is none.
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, StoreError>;

    /// Stores `data` under `key` stamped with the current time.
    ///
    /// Failures are logged. The error is returned for inspection only.
    fn save(&self, key: &str, data: &Value) -> Result<(), StoreError> {
        self.save_entry(key, &CacheEntry::new(data.clone()))
    }

    /// Stores a prepared entry, logging the outcome
    fn save_entry(&self, key: &str, entry: &CacheEntry) -> Result<(), StoreError> {
        match self.put(key, entry) {
            Ok(()) => {
                debug!(cache_key = key, "cached data");
                Ok(())
            }
            Err(err) => {
                error!(cache_key = key, error = %err, "failed to save cache");
                Err(err)
            }
        }
    }

    /// Returns the entry for `key`. Missing, unreadable and corrupt entries are all `None`.
    fn load(&self, key: &str) -> Option<CacheEntry> {
        match self.get(key) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(cache_key = key, error = %err, "failed to load cache");
                None
            }
        }
    }

    /// Whether an entry exists and is younger than `max_age`
    fn is_fresh(&self, key: &str, max_age: Duration) -> bool {
        self.load(key).is_some_and(|entry| entry.is_fresh(max_age))
    }

    /// Elapsed time since the entry for `key` was written
    fn age_of(&self, key: &str) -> Option<Duration> {
        self.load(key).map(|entry| entry.age())
    }

    /// Age of the entry for `key` in fractional hours
    fn age_hours_of(&self, key: &str) -> Option<f64> {
        self.age_of(key).map(duration_to_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_safe_keys() {
        assert!(validate_key("fixtures").is_ok());
        assert!(validate_key("recent_results").is_ok());
        assert!(validate_key("player_stats_2srYA1QS1OhCE45rzou1ZR_season_2025_comp_8").is_ok());
        assert!(validate_key("table-v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_unsafe_keys() {
        for key in ["", "../etc/passwd", "a/b", "with space", "dot.json", "ключ"] {
            let err = validate_key(key).unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey(_)), "{key} should be rejected");
        }
    }
}
