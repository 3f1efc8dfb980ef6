//! TTL Sweep Task
//!
//! Optional background task that periodically removes stale cache entries.
//! Lookup-time masking is authoritative; this only reclaims memory over long
//! uptimes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps stale cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. It acquires a write lock on the cache store to remove
/// stale entries.
///
/// # Arguments
/// * `cache` - Shared reference to the cache
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(
    cache: Arc<RwLock<CacheStore>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if removed > 0 {
                info!("TTL sweep: removed {} stale entries", removed);
            } else {
                debug!("TTL sweep: no stale entries found");
            }
        }
    })
}
