//! Per-event outcome of the ingestion loop.
//!
//! [`classify`] turns one consume result into a [`Step`] without doing any
//! I/O, so the skip/stop policy can be tested on its own.

use tracing::{error, warn};
use validator::Validate;

use crate::models::Order;
use crate::ports::SourceError;

// == Skip Reason ==
/// Why an event was dropped without reaching the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The source failed this time but may succeed on the next call
    Source(SourceError),
    /// The source produced an empty event
    Empty,
    /// The order failed validation; it is never retried
    Invalid { order_uid: String, reason: String },
}

impl SkipReason {
    pub fn log(&self) {
        match self {
            SkipReason::Source(err) => error!(error = %err, "failed to consume order event"),
            SkipReason::Empty => error!("empty order event"),
            SkipReason::Invalid { order_uid, reason } => warn!(
                order_uid = %order_uid,
                error = %reason,
                "failed to validate order event"
            ),
        }
    }
}

// == Step ==
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Valid order to add to the batch
    Append(Box<Order>),
    /// Event dropped; the loop continues
    Skip(SkipReason),
    /// The source is finished; flush and stop
    Stop,
}

/// Decides what the loop does with one consume result.
pub fn classify(result: Result<Option<Order>, SourceError>) -> Step {
    match result {
        Err(SourceError::Closed) => Step::Stop,
        Err(err) => Step::Skip(SkipReason::Source(err)),
        Ok(None) => Step::Skip(SkipReason::Empty),
        Ok(Some(order)) => match order.validate() {
            Ok(()) => Step::Append(Box::new(order)),
            Err(errors) => Step::Skip(SkipReason::Invalid {
                order_uid: order.order_uid,
                reason: errors.to_string(),
            }),
        },
    }
}
