pub mod batch;
pub mod handler;
pub mod pool;
pub mod queue;

pub use pool::WorkerPool;
pub use queue::ReminderQueue;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::reminder::ReminderBatchDto,
    server::{
        error::{worker::WorkerError, Error},
        messaging::MessagingClient,
        model::worker::ReminderJob,
        service::invoice::InvoiceRenderer,
        worker::{batch::BatchTracker, handler::WorkerJobHandler, pool::WorkerPoolConfig},
    },
};

#[derive(Clone)]
pub struct Worker {
    pub queue: ReminderQueue,
    pub pool: WorkerPool,
    pub batches: BatchTracker,
}

impl Worker {
    pub fn new(
        config: WorkerPoolConfig,
        db: DatabaseConnection,
        messaging: MessagingClient,
        renderer: InvoiceRenderer,
    ) -> Self {
        let queue = ReminderQueue::new();
        let batches = BatchTracker::new();
        let handler = WorkerJobHandler::new(db, messaging, renderer, batches.clone());
        let pool = WorkerPool::new(config, queue.clone(), handler);

        Self {
            queue,
            pool,
            batches,
        }
    }

    /// Creates a batch and queues one invoice reminder per member, in the given order.
    pub async fn enqueue_invoice_reminders(&self, member_ids: &[i32]) -> ReminderBatchDto {
        let batch = self.batches.create(member_ids.len()).await;

        self.queue
            .push_many(member_ids.iter().map(|&member_id| ReminderJob::SendInvoice {
                batch_id: batch.id,
                member_id,
            }))
            .await;

        tracing::info!(batch_id = %batch.id, total = batch.total, "Queued invoice reminders");

        batch
    }

    pub async fn batch_status(&self, batch_id: Uuid) -> Result<ReminderBatchDto, Error> {
        self.batches
            .get(batch_id)
            .await
            .ok_or_else(|| WorkerError::BatchNotFound(batch_id).into())
    }
}
