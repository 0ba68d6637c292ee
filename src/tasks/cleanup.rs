//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{Cache, CacheValue};

/// Spawns a background task that periodically cleans up expired cache entries.
///
/// Each tick takes the cache lock once and sweeps every entry. The task
/// checks `shutdown` between ticks only, so a sweep that has started always
/// runs to completion.
///
/// # Arguments
/// * `cache` - Shared handle to the cache
/// * `cleanup_interval` - Delay between sweeps
/// * `shutdown` - Stops the task once cancelled
///
/// # Example
/// ```ignore
/// let cache = Cache::new(1000, Duration::from_secs(900));
/// let shutdown = CancellationToken::new();
/// let handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(60), shutdown.clone());
/// // Later, during shutdown:
/// shutdown.cancel();
/// handle.await?;
/// ```
pub fn spawn_cleanup_task<K, V>(
    cache: Cache<K, V>,
    cleanup_interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: CacheValue + Send + 'static,
{
    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {:?}",
            cleanup_interval
        );

        let mut ticker = interval_at(Instant::now() + cleanup_interval, cleanup_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let removed = cache.cleanup_expired().await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }

        info!("TTL cleanup task stopped");
    })
}
