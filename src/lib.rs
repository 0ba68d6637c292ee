//! Order Cache - order lookup service with a TTL-LRU cache in front of storage
//!
//! Order events are consumed from a stream, validated, and persisted in
//! batches. Lookups are served cache-aside from a bounded in-memory cache
//! with per-entry expiry and least-recently-used eviction.

pub mod adapters;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod ports;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::{OrderCache, OrderService};
pub use tasks::spawn_cleanup_task;
