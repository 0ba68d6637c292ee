//! Ingest Module
//!
//! Turns the order event stream into batched storage writes.

mod batch;
mod consumer;
mod outcome;

pub use batch::Batch;
pub use consumer::{IngestLoop, IngestSettings, IngestSummary};
pub use outcome::{classify, SkipReason, Step};
