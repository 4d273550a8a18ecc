//! In-process cache store
//!
//! Used as a test double for the orchestrator and for runs that should not
//! touch the disk. Clones share the same map.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::entry::CacheEntry;
use super::store::{validate_key, CacheStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryStore {
    fn ensure_storage_ready(&self) {}

    fn put(&self, key: &str, entry: &CacheEntry) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<CacheEntry>, StoreError> {
        validate_key(key)?;
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.save("fixtures", &json!({"items": []})).unwrap();

        assert_eq!(other.len(), 1);
        assert_eq!(other.load("fixtures").unwrap().data, json!({"items": []}));
    }

    #[test]
    fn test_fresh_after_save() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(!store.is_fresh("fixtures", Duration::hours(1)));

        store.save("fixtures", &json!(1)).unwrap();

        assert!(store.is_fresh("fixtures", Duration::hours(1)));
        assert!(!store.is_fresh("fixtures", Duration::zero()));
    }

    #[test]
    fn test_rejects_invalid_key() {
        let store = MemoryStore::new();
        assert!(store.save("bad key", &json!(1)).is_err());
        assert!(store.is_empty());
    }
}
