//! Adapters Module
//!
//! Concrete implementations of the [`crate::ports`] contracts used by the
//! server binary.

mod channel_source;
mod memory_storage;

pub use channel_source::{channel, ChannelSource, EventPublisher};
pub use memory_storage::MemoryStorage;
