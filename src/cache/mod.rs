//! Cache module for storing upstream responses
//!
//! Each cache key holds the latest JSON payload fetched for one upstream
//! resource, stamped with the time it was written. Entries are never deleted;
//! stale entries stay available as a fallback when the upstream is down.

mod entry;
mod manager;
mod memory;
mod store;

pub use entry::{duration_to_hours, hours_to_duration, CacheEntry};
pub use manager::CacheManager;
pub use memory::MemoryStore;
pub use store::{validate_key, CacheStore, StoreError};
