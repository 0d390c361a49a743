//! MySQL implementation of the notification outbox.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Transaction};

use ua_core::domain::entities::{NewNotification, NotificationTask};
use ua_core::errors::DomainError;
use ua_core::repositories::NotificationOutbox;

use super::{row_to_task, MySqlAccountStore};
use crate::database::constraint::{map_read_error, map_write_error};

/// Insert an outbox row inside the caller's transaction
pub(crate) async fn enqueue(
    tx: &mut Transaction<'_, MySql>,
    notification: &NewNotification,
) -> Result<(), DomainError> {
    sqlx::query("INSERT INTO notifications (user_id, kind, is_done, created_at) VALUES (?, ?, FALSE, ?)")
        .bind(notification.user_id.to_string())
        .bind(notification.kind.as_str())
        .bind(notification.created_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_write_error(e, "enqueue notification"))?;

    Ok(())
}

#[async_trait]
impl NotificationOutbox for MySqlAccountStore {
    async fn next_pending(&self) -> Result<Option<NotificationTask>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, kind, is_done, created_at, exec_time
            FROM notifications
            WHERE is_done = FALSE
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_read_error(e, "poll outbox"))?;

        row.as_ref().map(row_to_task).transpose()
    }

    async fn mark_done(&self, task_id: i64, exec_time: DateTime<Utc>) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE notifications SET is_done = TRUE, exec_time = ? WHERE id = ?")
            .bind(exec_time)
            .bind(task_id)
            .execute(self.pool())
            .await
            .map_err(|e| map_write_error(e, "mark notification done"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("notification"));
        }
        Ok(())
    }
}
