//! MySQL implementation of the CodeRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use ua_core::domain::entities::{NewNotification, RecoveryCode};
use ua_core::errors::DomainError;
use ua_core::repositories::CodeRepository;

use super::{enqueue, MySqlAccountStore};
use crate::database::constraint::{map_read_error, map_write_error};

#[async_trait]
impl CodeRepository for MySqlAccountStore {
    async fn save_code(&self, code: RecoveryCode, notification: NewNotification) -> Result<(), DomainError> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| map_read_error(e, "begin transaction"))?;

        sqlx::query("DELETE FROM recovery_codes WHERE user_id = ?")
            .bind(code.user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "replace recovery code"))?;

        sqlx::query("INSERT INTO recovery_codes (code, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&code.code)
            .bind(code.user_id.to_string())
            .bind(code.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "save recovery code"))?;

        enqueue(&mut tx, &notification).await?;

        tx.commit().await.map_err(|e| map_write_error(e, "commit recovery code"))
    }

    async fn code_by_value(&self, code: &str) -> Result<Option<RecoveryCode>, DomainError> {
        let row = sqlx::query("SELECT code, user_id, created_at FROM recovery_codes WHERE code = ? LIMIT 1")
            .bind(code)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| map_read_error(e, "find recovery code"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user_id: String = row.try_get("user_id").map_err(|e| map_read_error(e, "read recovery code"))?;
        let user_id = Uuid::parse_str(&user_id)
            .map_err(|e| DomainError::internal(format!("Invalid UUID in user_id: {}", e)))?;

        Ok(Some(RecoveryCode {
            user_id,
            code: row.try_get("code").map_err(|e| map_read_error(e, "read recovery code"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| map_read_error(e, "read recovery code"))?,
        }))
    }

    async fn code_by_user(&self, user_id: Uuid) -> Result<Option<String>, DomainError> {
        let row = sqlx::query(
            "SELECT code FROM recovery_codes WHERE user_id = ? ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_read_error(e, "find recovery code by user"))?;

        row.map(|r| r.try_get("code"))
            .transpose()
            .map_err(|e| map_read_error(e, "read recovery code"))
    }
}
