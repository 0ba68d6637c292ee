//! In-process event stream
//!
//! Raw JSON payloads travel over a bounded `tokio::sync::mpsc` channel and
//! are decoded on the consuming side.

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::models::Order;
use crate::ports::{EventSource, SourceError};

/// Creates a connected publisher/source pair holding at most `buffer`
/// in-flight events.
pub fn channel(buffer: usize) -> (EventPublisher, ChannelSource) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (
        EventPublisher { tx },
        ChannelSource {
            rx: Mutex::new(rx),
        },
    )
}

// == Event Publisher ==
/// Producer half; cheap to clone.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: mpsc::Sender<Vec<u8>>,
}

impl EventPublisher {
    /// Queues a raw payload, waiting while the buffer is full.
    pub async fn publish(&self, payload: Vec<u8>) -> Result<(), SourceError> {
        self.tx.send(payload).await.map_err(|_| SourceError::Closed)
    }

    /// Serializes and queues an order.
    pub async fn publish_order(&self, order: &Order) -> Result<(), SourceError> {
        let payload =
            serde_json::to_vec(order).map_err(|err| SourceError::Decode(err.to_string()))?;
        self.publish(payload).await
    }
}

// == Channel Source ==
/// Consumer half.
#[derive(Debug)]
pub struct ChannelSource {
    rx: Mutex<mpsc::Receiver<Vec<u8>>>,
}

#[async_trait]
impl EventSource for ChannelSource {
    async fn consume(&self) -> Result<Option<Order>, SourceError> {
        let payload = self.rx.lock().await.recv().await;
        let Some(payload) = payload else {
            return Err(SourceError::Closed);
        };

        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        // A literal `null` decodes to an empty event
        serde_json::from_slice::<Option<Order>>(&payload)
            .map_err(|err| SourceError::Decode(err.to_string()))
    }
}
