//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::lru::NodeId;

// == Cache Value ==
/// Values the cache is willing to hold.
///
/// A nil value is rejected on insertion, so a hit always yields usable data.
pub trait CacheValue: Clone {
    /// Returns true when the value carries nothing worth caching.
    fn is_nil(&self) -> bool;
}

impl CacheValue for String {
    fn is_nil(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Clone> CacheValue for Vec<T> {
    fn is_nil(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Clone> CacheValue for Option<T> {
    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl<T: CacheValue> CacheValue for Arc<T> {
    fn is_nil(&self) -> bool {
        self.as_ref().is_nil()
    }
}

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant after which reads report the entry as expired
    pub expires_at: Instant,
    /// Position of the key in the recency list
    pub(crate) node: NodeId,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub(crate) fn new(value: V, expires_at: Instant, node: NodeId) -> Self {
        Self {
            value,
            expires_at,
            node,
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the entry's TTL.
    pub(crate) fn refresh(&mut self, value: V, expires_at: Instant) {
        self.value = value;
        self.expires_at = expires_at;
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is still valid at exactly `expires_at`; it expires strictly
    /// after that instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL, saturating at zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
