use sea_orm::DatabaseConnection;

use crate::server::{
    error::Error,
    messaging::MessagingClient,
    model::worker::ReminderJob,
    service::{invoice::InvoiceRenderer, reminder::ReminderService},
    util::time::today,
    worker::batch::BatchTracker,
};

/// Executes reminder jobs and reports their outcome to the batch tracker.
pub struct WorkerJobHandler {
    db: DatabaseConnection,
    messaging: MessagingClient,
    renderer: InvoiceRenderer,
    batches: BatchTracker,
}

impl WorkerJobHandler {
    pub fn new(
        db: DatabaseConnection,
        messaging: MessagingClient,
        renderer: InvoiceRenderer,
        batches: BatchTracker,
    ) -> Self {
        Self {
            db,
            messaging,
            renderer,
            batches,
        }
    }

    /// Runs a job, returning whether the reminder was delivered
    pub async fn handle(&self, job: &ReminderJob) -> Result<bool, Error> {
        match job {
            ReminderJob::SendInvoice { member_id, .. } => {
                ReminderService::new(&self.db, &self.messaging, &self.renderer)
                    .send_invoice_reminder(*member_id, today())
                    .await
            }
        }
    }

    /// Counts the job towards its batch
    pub async fn finish(&self, job: &ReminderJob, sent: bool) {
        let batch_id = job.batch_id();

        match self.batches.record(batch_id, sent).await {
            Some(batch) if batch.finished => tracing::info!(
                batch_id = %batch.id,
                sent = batch.sent,
                failed = batch.failed,
                "Reminder batch finished"
            ),
            Some(_) => {}
            None => tracing::warn!(batch_id = %batch_id, "Job finished for unknown batch"),
        }
    }
}
