//! Shared Cache Handle
//!
//! Thread-safe wrapper that lets request handlers and the cleanup task
//! operate on one [`CacheStore`].

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, CacheStore, CacheValue};
use crate::error::CacheError;

// == Cache ==
/// Cloneable handle to a cache guarded by one exclusive lock.
///
/// Every operation, reads included, holds the lock for its whole critical
/// section because a hit reorders the recency list. No I/O happens under
/// the lock.
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: Arc<Mutex<CacheStore<K, V>>>,
}

impl<K, V> Clone for Cache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: CacheValue,
{
    /// Creates an empty cache; `capacity` 0 means unbounded.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(capacity, ttl))
    }

    pub fn from_store(store: CacheStore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn set(&self, key: K, value: V) -> Result<(), CacheError> {
        self.inner.lock().await.set(key, value)
    }

    pub async fn get<Q>(&self, key: &Q) -> Result<V, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.get(key)
    }

    pub async fn delete<Q>(&self, key: &Q) -> Result<(), CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.delete(key)
    }

    /// Sweeps expired entries; returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.inner.lock().await.cleanup_expired()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache: Cache<String, String> = Cache::new(10, Duration::from_secs(60));
        let other = cache.clone();

        assert_ok!(cache.set("k".to_string(), "v".to_string()).await);

        assert_eq!(other.get("k").await.unwrap(), "v");
        assert_ok!(other.delete("k").await);
        assert_err!(cache.get("k").await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_respect_capacity() {
        let cache: Cache<String, String> = Cache::new(16, Duration::from_secs(60));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    for i in 0..200 {
                        let key = format!("w{worker}-{i}");
                        cache.set(key.clone(), "value".to_string()).await.unwrap();
                        let _ = cache.get(&key).await;
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let stats = cache.stats().await;
        assert_eq!(cache.len().await, 16);
        assert_eq!(stats.total_entries, 16);
        assert_eq!(stats.evictions, 8 * 200 - 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_expired_through_handle() {
        let cache: Cache<String, String> = Cache::new(10, Duration::from_secs(1));
        cache.set("k".to_string(), "v".to_string()).await.unwrap();

        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(cache.get("k").await, Err(CacheError::Expired));
        assert_eq!(cache.cleanup_expired().await, 1);
        assert_eq!(cache.get("k").await, Err(CacheError::NotFound));
        assert!(cache.is_empty().await);
    }
}
