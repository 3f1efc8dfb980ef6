//! Cache Module
//!
//! Provides in-memory caching with a fixed TTL and deterministic key
//! construction.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::cache_key;
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;
