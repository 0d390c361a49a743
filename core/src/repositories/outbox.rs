//! Read side of the transactional notification outbox.
//!
//! Rows are inserted by the mutations that need them (see
//! [`UserRepository::create_user`](super::UserRepository::create_user),
//! [`UserRepository::update_email`](super::UserRepository::update_email) and
//! [`CodeRepository::save_code`](super::CodeRepository::save_code)); this
//! trait only drains them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::notification::NotificationTask;
use crate::errors::DomainError;

#[async_trait]
pub trait NotificationOutbox: Send + Sync {
    /// The earliest not-done task, ordered by creation time then id
    ///
    /// # Returns
    /// * `Ok(Some(task))` - A pending task
    /// * `Ok(None)` - The outbox is drained
    /// * `Err(DomainError::Validation(UnknownKindTask))` - The stored kind is not recognized
    async fn next_pending(&self) -> Result<Option<NotificationTask>, DomainError>;

    /// Mark a task delivered at `exec_time`
    async fn mark_done(&self, task_id: i64, exec_time: DateTime<Utc>) -> Result<(), DomainError>;
}
