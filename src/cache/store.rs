//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a fixed TTL.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::cache::{CacheCounters, CacheEntry, CacheStats};

// == Cache Store ==
/// In-memory cache with a single fixed TTL for all entries.
///
/// Lookups never return data past the TTL, but they do not remove stale
/// entries either: a stale entry is masked and simply overwritten by the next
/// successful fetch. The optional background sweep reclaims the memory.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// TTL applied to every entry
    ttl: Duration,
    /// Hit/miss counters
    counters: CacheCounters,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            counters: CacheCounters::new(),
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the cached value only if an entry exists and its age is still
    /// within the TTL window. A stale entry counts as a miss but stays in the
    /// map until overwritten or swept.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                self.counters.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`, stamped with the current
    /// instant.
    ///
    /// The value and its timestamp land in the map as one entry, so a
    /// concurrent reader never observes a half-written pair.
    pub fn set(&mut self, key: String, value: Value) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Sweep Expired ==
    /// Removes all stale entries from the cache.
    ///
    /// Correctness never depends on this; `get` masking is authoritative.
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.is_fresh(ttl));
        before - self.entries.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.entries.len())
    }

    // == Length ==
    /// Returns the current number of entries, stale included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
