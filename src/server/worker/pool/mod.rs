//! Worker pool for delivering reminder jobs one at a time.
//!
//! A single dispatcher drains the in-process queue, running each job under a timeout and
//! pausing for the configured throttle before taking the next one so the messaging gateway
//! never sees a burst.

mod config;

pub use config::WorkerPoolConfig;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;

use crate::server::{
    error::Error,
    model::worker::ReminderJob,
    worker::{handler::WorkerJobHandler, queue::ReminderQueue},
};

/// Worker pool processing jobs from the `ReminderQueue`.
#[derive(Clone)]
pub struct WorkerPool {
    inner: Arc<WorkerPoolRef>,
}

pub struct WorkerPoolRef {
    config: WorkerPoolConfig,
    queue: ReminderQueue,
    handler: Arc<WorkerJobHandler>,
    shutdown: Arc<Notify>,
    dispatcher_handle: RwLock<Option<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Creates a new worker pool in a stopped state; call `start()` to begin processing.
    pub fn new(config: WorkerPoolConfig, queue: ReminderQueue, handler: WorkerJobHandler) -> Self {
        Self {
            inner: Arc::new(WorkerPoolRef {
                config,
                queue,
                handler: Arc::new(handler),
                shutdown: Arc::new(Notify::new()),
                dispatcher_handle: RwLock::new(None),
            }),
        }
    }

    /// Starts the dispatcher.
    ///
    /// Idempotent: calling it when already running logs a warning and returns Ok.
    pub async fn start(&self) -> Result<(), Error> {
        let mut handle = self.inner.dispatcher_handle.write().await;

        if handle.is_some() {
            tracing::warn!("Worker pool is already running");
            return Ok(());
        }

        *handle = Some(self.spawn_dispatcher());

        tracing::info!(
            throttle_ms = self.inner.config.throttle_ms,
            "Reminder worker pool started"
        );

        Ok(())
    }

    fn spawn_dispatcher(&self) -> JoinHandle<()> {
        let config = self.inner.config.clone();
        let queue = self.inner.queue.clone();
        let handler = Arc::clone(&self.inner.handler);
        let shutdown = Arc::clone(&self.inner.shutdown);

        tokio::spawn(async move {
            tracing::debug!("Dispatcher started");

            loop {
                tokio::select! {
                    // Shutdown wins over picking up the next job
                    biased;

                    _ = shutdown.notified() => {
                        tracing::debug!("Dispatcher received shutdown signal");
                        break;
                    }

                    _ = Self::process_next(&config, &queue, &handler) => {}
                }
            }

            tracing::debug!("Dispatcher stopped");
        })
    }

    /// Takes one job off the queue and runs it, then waits out the throttle.
    ///
    /// Sleeps for the poll interval when the queue is empty.
    async fn process_next(
        config: &WorkerPoolConfig,
        queue: &ReminderQueue,
        handler: &Arc<WorkerJobHandler>,
    ) {
        let Some(job) = queue.pop().await else {
            tokio::time::sleep(config.poll_interval()).await;
            return;
        };

        // The job runs in its own task so a shutdown mid-job still records its outcome
        let task = tokio::spawn(Self::execute_job(
            job,
            Arc::clone(handler),
            config.job_timeout(),
        ));

        if let Err(e) = task.await {
            tracing::error!("Reminder job task panicked: {:?}", e);
        }

        tokio::time::sleep(config.throttle()).await;
    }

    /// Executes a job with timeout and records the outcome against its batch.
    async fn execute_job(job: ReminderJob, handler: Arc<WorkerJobHandler>, timeout: Duration) {
        let result = tokio::time::timeout(timeout, handler.handle(&job)).await;

        let sent = match result {
            Ok(Ok(sent)) => {
                tracing::debug!(sent, "Job completed: {}", job);
                sent
            }
            Ok(Err(e)) => {
                tracing::error!("Job failed: {}, error: {:?}", job, e);
                false
            }
            Err(_) => {
                tracing::error!("Job timed out after {} seconds: {}", timeout.as_secs(), job);
                false
            }
        };

        handler.finish(&job, sent).await;
    }

    /// Stops the dispatcher gracefully.
    ///
    /// Jobs still in the queue are dropped; an in-flight job runs to completion.
    pub async fn stop(&self) -> Result<(), Error> {
        let mut guard = self.inner.dispatcher_handle.write().await;

        let Some(handle) = guard.take() else {
            tracing::debug!("Worker pool is already stopped");
            return Ok(());
        };

        tracing::info!("Shutting down reminder worker pool...");

        self.inner.shutdown.notify_waiters();

        match tokio::time::timeout(self.inner.config.shutdown_timeout(), handle).await {
            Ok(Ok(())) => tracing::debug!("Dispatcher stopped cleanly"),
            Ok(Err(e)) => tracing::error!("Dispatcher panicked: {:?}", e),
            Err(_) => tracing::warn!("Dispatcher did not stop within timeout"),
        }

        let pending = self.inner.queue.len().await;
        if pending > 0 {
            tracing::warn!(pending, "Reminder jobs left unprocessed at shutdown");
        }

        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.inner.dispatcher_handle.read().await.is_some()
    }
}
