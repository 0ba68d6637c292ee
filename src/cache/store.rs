//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, CacheValue, LruTracker};
use crate::error::CacheError;

// == Cache Store ==
/// Single-threaded cache storage with LRU eviction and TTL support.
///
/// The key set of `entries` and the keys tracked by `lru` are always equal.
/// Wrap in [`Cache`](crate::cache::Cache) to share it between tasks.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed, 0 = unbounded
    capacity: usize,
    /// Lifetime of an entry after its most recent write
    ttl: Duration,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: CacheValue,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, 0 for no bound
    /// * `ttl` - How long an entry stays readable after it was last set
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl,
        }
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists, the value is overwritten, the TTL is reset
    /// and the key becomes most recently used. A new key that pushes the
    /// cache over capacity evicts exactly one entry, the least recently used.
    pub fn set(&mut self, key: K, value: V) -> Result<(), CacheError> {
        if value.is_nil() {
            return Err(CacheError::NilValue);
        }

        let expires_at = Instant::now() + self.ttl;

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, expires_at);
            self.lru.touch(entry.node);
            return Ok(());
        }

        let node = self.lru.push_front(key.clone());
        self.entries
            .insert(key, CacheEntry::new(value, expires_at, node));

        if self.capacity > 0 && self.entries.len() > self.capacity {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit moves the key to the head of the recency list. An expired entry
    /// is reported as [`CacheError::Expired`] and left in place for the
    /// cleanup sweep; its recency is not refreshed.
    pub fn get<Q>(&mut self, key: &Q) -> Result<V, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::NotFound);
        };

        if entry.is_expired() {
            self.stats.record_expired();
            return Err(CacheError::Expired);
        }

        self.stats.record_hit();
        self.lru.touch(entry.node);
        Ok(entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key from both the map and the recency list.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<(), CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.remove(key).ok_or(CacheError::NotFound)?;
        self.lru.remove(entry.node);
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Contains ==
    /// Checks presence without touching recency or expiry.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        let lru = &mut self.lru;

        self.entries.retain(|_, entry| {
            if entry.is_expired_at(now) {
                lru.remove(entry.node);
                false
            } else {
                true
            }
        });

        let removed = before - self.entries.len();
        self.stats.record_swept(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }
}

impl<K, V> CacheStore<K, V> {
    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Recency ==
    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> + '_ {
        self.lru.iter()
    }

    /// The next eviction candidate.
    pub fn least_recent(&self) -> Option<&K> {
        self.lru.peek_oldest()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
