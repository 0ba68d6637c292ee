//! Domain records and response models
//!
//! The order document plus the DTOs used for serializing HTTP response
//! bodies.

pub mod order;
pub mod responses;

// Re-export commonly used types
pub use order::{Delivery, Item, Order, Payment};
pub use responses::{ErrorResponse, PublishResponse, StatsResponse};

#[cfg(test)]
pub(crate) use order::sample_order;
