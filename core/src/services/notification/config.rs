//! Configuration for the notification worker

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NotificationWorkerConfig {
    /// How long to wait before polling again once the outbox is drained
    pub poll_interval: Duration,
}

impl Default for NotificationWorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}
