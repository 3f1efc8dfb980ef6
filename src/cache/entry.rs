//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::{Duration, Instant};

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry: the stored payload and when it was written.
///
/// An entry is created whole at write time and never patched afterwards; a
/// refresh overwrites it wholesale with a new insertion instant.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached upstream payload
    pub value: Value,
    /// Insertion instant, set once at creation
    pub inserted_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current instant.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within the TTL window.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is
    /// considered stale, so a lookup never returns data at or past the TTL.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }

    /// Returns the age of the entry.
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }
}
