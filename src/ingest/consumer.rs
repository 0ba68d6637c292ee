//! Order Ingestion Loop
//!
//! Drains the event source into batches and writes each batch to storage
//! when it reaches the size threshold or when the flush timer fires.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::ingest::{classify, Batch, Step};
use crate::ports::{EventSource, OrderStorage};

// == Settings ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSettings {
    /// Flush as soon as this many orders are pending
    pub batch_size: usize,
    /// Flush whatever is pending at least this often
    pub flush_timeout: Duration,
}

impl IngestSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            batch_size: config.batch_size,
            flush_timeout: config.flush_timeout(),
        }
    }
}

// == Summary ==
/// Counters reported when the loop exits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Valid orders added to a batch
    pub accepted: u64,
    /// Events dropped before batching
    pub skipped: u64,
    /// Bulk writes attempted
    pub flushes: u64,
    /// Bulk writes that failed; their orders are lost
    pub failed_flushes: u64,
    /// Orders in successful bulk writes
    pub persisted: u64,
}

// == Ingest Loop ==
pub struct IngestLoop {
    source: Arc<dyn EventSource>,
    storage: Arc<dyn OrderStorage>,
    settings: IngestSettings,
}

impl IngestLoop {
    pub fn new(
        source: Arc<dyn EventSource>,
        storage: Arc<dyn OrderStorage>,
        settings: IngestSettings,
    ) -> Self {
        Self {
            source,
            storage,
            settings,
        }
    }

    /// Runs until `shutdown` is cancelled or the source closes.
    ///
    /// Each iteration prefers, in order: shutdown, the flush timer, the next
    /// event. Pending orders are always flushed before returning.
    pub async fn run(self, shutdown: CancellationToken) -> IngestSummary {
        let mut batch = Batch::new(self.settings.batch_size);
        let mut summary = IngestSummary::default();
        let flush_timeout = self.settings.flush_timeout;

        let mut ticker = interval_at(Instant::now() + flush_timeout, flush_timeout);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            batch_size = batch.threshold(),
            flush_timeout = ?flush_timeout,
            "start handling order events"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    self.flush(&mut batch, &mut summary).await;
                    info!("stop handling order events");
                    break;
                }
                _ = ticker.tick() => {
                    self.flush(&mut batch, &mut summary).await;
                }
                result = self.source.consume() => match classify(result) {
                    Step::Append(order) => {
                        summary.accepted += 1;
                        if batch.push(*order) {
                            self.flush(&mut batch, &mut summary).await;
                            ticker.reset();
                        }
                    }
                    Step::Skip(reason) => {
                        summary.skipped += 1;
                        reason.log();
                    }
                    Step::Stop => {
                        self.flush(&mut batch, &mut summary).await;
                        warn!("order event source closed, stop handling order events");
                        break;
                    }
                },
            }
        }

        summary
    }

    /// Writes the pending batch once. The batch is cleared whether or not
    /// the write succeeds.
    async fn flush(&self, batch: &mut Batch, summary: &mut IngestSummary) {
        if batch.is_empty() {
            return;
        }

        let orders = batch.take();
        summary.flushes += 1;

        match self.storage.save_orders(&orders).await {
            Ok(()) => {
                summary.persisted += orders.len() as u64;
                debug!(count = orders.len(), "saved orders batch to storage");
            }
            Err(err) => {
                summary.failed_flushes += 1;
                error!(
                    count = orders.len(),
                    error = %err,
                    "failed to save orders batch to storage"
                );
            }
        }
    }
}
