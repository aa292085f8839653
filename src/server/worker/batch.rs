//! Progress tracking for queued reminder batches.
//!
//! Batches live in memory; a restart forgets them along with any unprocessed jobs. Finished
//! batches are kept for a retention period so they can still be polled, then dropped the next
//! time a batch is created.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::reminder::ReminderBatchDto;

/// How long a finished batch stays available for polling.
pub const DEFAULT_BATCH_RETENTION: Duration = Duration::from_secs(60 * 60);

struct TrackedBatch {
    batch: ReminderBatchDto,
    finished_at: Option<Instant>,
}

#[derive(Clone)]
pub struct BatchTracker {
    batches: Arc<RwLock<HashMap<Uuid, TrackedBatch>>>,
    retention: Duration,
}

impl Default for BatchTracker {
    fn default() -> Self {
        Self::with_retention(DEFAULT_BATCH_RETENTION)
    }
}

impl BatchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retention(retention: Duration) -> Self {
        Self {
            batches: Arc::new(RwLock::new(HashMap::new())),
            retention,
        }
    }

    /// Registers a new batch expecting `total` jobs.
    ///
    /// Finished batches older than the retention period are dropped first.
    pub async fn create(&self, total: usize) -> ReminderBatchDto {
        let batch = ReminderBatchDto {
            id: Uuid::new_v4(),
            total,
            processed: 0,
            sent: 0,
            failed: 0,
            finished: total == 0,
        };

        let mut batches = self.batches.write().await;

        let before = batches.len();
        batches.retain(|_, tracked| match tracked.finished_at {
            Some(finished_at) => finished_at.elapsed() < self.retention,
            None => true,
        });
        let evicted = before - batches.len();
        if evicted > 0 {
            tracing::debug!(evicted = %evicted, "Dropped expired reminder batches");
        }

        batches.insert(
            batch.id,
            TrackedBatch {
                batch: batch.clone(),
                finished_at: batch.finished.then(Instant::now),
            },
        );

        batch
    }

    /// Records the outcome of one job.
    ///
    /// Returns the updated batch, or `None` if the batch is unknown.
    pub async fn record(&self, batch_id: Uuid, sent: bool) -> Option<ReminderBatchDto> {
        let mut batches = self.batches.write().await;
        let tracked = batches.get_mut(&batch_id)?;
        let batch = &mut tracked.batch;

        batch.processed += 1;
        if sent {
            batch.sent += 1;
        } else {
            batch.failed += 1;
        }
        batch.finished = batch.processed >= batch.total;

        if batch.finished && tracked.finished_at.is_none() {
            tracked.finished_at = Some(Instant::now());
        }

        Some(tracked.batch.clone())
    }

    pub async fn get(&self, batch_id: Uuid) -> Option<ReminderBatchDto> {
        self.batches
            .read()
            .await
            .get(&batch_id)
            .map(|tracked| tracked.batch.clone())
    }
}
