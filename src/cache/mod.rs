//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, CacheValue};
pub use lru::{LruTracker, NodeId};
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
