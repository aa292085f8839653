//! In-process FIFO queue of reminder jobs.

use std::{collections::VecDeque, sync::Arc};

use tokio::sync::Mutex;

use crate::server::model::worker::ReminderJob;

#[derive(Clone, Default)]
pub struct ReminderQueue {
    jobs: Arc<Mutex<VecDeque<ReminderJob>>>,
}

impl ReminderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, job: ReminderJob) {
        self.jobs.lock().await.push_back(job);
    }

    /// Appends jobs in order
    pub async fn push_many(&self, jobs: impl IntoIterator<Item = ReminderJob>) {
        self.jobs.lock().await.extend(jobs);
    }

    /// Removes the oldest job
    pub async fn pop(&self) -> Option<ReminderJob> {
        self.jobs.lock().await.pop_front()
    }

    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }
}
