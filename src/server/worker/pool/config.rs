use std::time::Duration;

/// Configuration for the reminder worker pool
#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    /// How long to wait between polls when the queue is empty (milliseconds).
    pub poll_interval_ms: u64,

    /// Pause after each processed job before the next one is taken (milliseconds).
    ///
    /// The messaging gateway rejects bursts, so reminders are spaced out.
    pub throttle_ms: u64,

    /// Maximum time a job can run before being cancelled (seconds).
    ///
    /// Covers rendering, upload and send of a single invoice.
    pub job_timeout_seconds: u64,

    /// Maximum time to wait for the dispatcher to shutdown (seconds).
    pub shutdown_timeout_seconds: u64,
}

impl WorkerPoolConfig {
    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Get throttle delay as Duration
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Get job timeout as Duration
    pub fn job_timeout(&self) -> Duration {
        Duration::from_secs(self.job_timeout_seconds)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 250,
            throttle_ms: 5000,
            job_timeout_seconds: 120,
            shutdown_timeout_seconds: 5,
        }
    }
}
