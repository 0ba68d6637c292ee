//! Collaborator contracts
//!
//! The ingestion loop and the lookup service only see these traits; the
//! concrete event stream and storage engine live in [`crate::adapters`].

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Order;

// == Source Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Payload could not be decoded into an order
    #[error("failed to decode order event: {0}")]
    Decode(String),

    /// Transient failure talking to the stream
    #[error("event stream error: {0}")]
    Transport(String),

    /// The stream has ended and will not yield more events
    #[error("event stream closed")]
    Closed,
}

// == Storage Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("order not found: {0}")]
    NotFound(String),

    #[error("storage failure: {0}")]
    Backend(String),
}

// == Event Source ==
/// A stream of order events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Waits for the next event.
    ///
    /// `Ok(None)` is an empty event. Implementations must be cancel-safe:
    /// the ingestion loop races this future against its timer and shutdown
    /// signal, and a dropped call must not lose an event.
    async fn consume(&self) -> Result<Option<Order>, SourceError>;
}

// == Order Storage ==
/// Durable order storage.
#[async_trait]
pub trait OrderStorage: Send + Sync {
    /// Persists a whole batch; either every order is written or none is.
    async fn save_orders(&self, orders: &[Order]) -> Result<(), StorageError>;

    /// Loads one order, [`StorageError::NotFound`] if it was never stored.
    async fn get_order(&self, order_uid: &str) -> Result<Order, StorageError>;
}
