//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use ua_core::domain::entities::{NewNotification, Page, User};
use ua_core::errors::DomainError;
use ua_core::repositories::UserRepository;

use super::{enqueue, escape_like, row_to_user, MySqlAccountStore, USER_COLUMNS};
use crate::database::constraint::{map_read_error, map_write_error};

impl MySqlAccountStore {
    async fn find_user(&self, filter: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, filter);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| map_read_error(e, "find user"))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlAccountStore {
    async fn create_user(&self, user: User, notification: NewNotification) -> Result<User, DomainError> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| map_read_error(e, "begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, username, pass_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.pass_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "create user"))?;

        enqueue(&mut tx, &notification).await?;

        tx.commit().await.map_err(|e| map_write_error(e, "commit create user"))?;

        tracing::debug!(user_id = %user.id, "User row inserted");
        Ok(user)
    }

    async fn update_email(
        &self,
        user_id: Uuid,
        email: &str,
        notification: NewNotification,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| map_read_error(e, "begin transaction"))?;

        let result = sqlx::query("UPDATE users SET email = ?, updated_at = ? WHERE id = ?")
            .bind(email)
            .bind(notification.created_at)
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "update email"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("user"));
        }

        enqueue(&mut tx, &notification).await?;

        tx.commit().await.map_err(|e| map_write_error(e, "commit update email"))
    }

    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET username = ?, updated_at = ? WHERE id = ?")
            .bind(username)
            .bind(updated_at)
            .bind(user_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| map_write_error(e, "update username"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("user"));
        }
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        pass_hash: &[u8],
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| map_read_error(e, "begin transaction"))?;

        let result = sqlx::query("UPDATE users SET pass_hash = ?, updated_at = ? WHERE id = ?")
            .bind(pass_hash)
            .bind(updated_at)
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "update password"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("user"));
        }

        sqlx::query("DELETE FROM recovery_codes WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "clear recovery codes"))?;

        tx.commit().await.map_err(|e| map_write_error(e, "commit update password"))
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), DomainError> {
        // Sessions, codes and outbox rows cascade.
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| map_write_error(e, "delete user"))?;
        Ok(())
    }

    async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_user("id", user_id.to_string()).await
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_user("email", email.to_string()).await
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_user("username", username.to_string()).await
    }

    async fn list_users_by_username(&self, query: &str, page: Page) -> Result<(Vec<User>, u64), DomainError> {
        let pattern = format!("%{}%", escape_like(query));

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM users WHERE username LIKE ?")
            .bind(&pattern)
            .fetch_one(self.pool())
            .await
            .and_then(|row| row.try_get("total"))
            .map_err(|e| map_read_error(e, "count users"))?;

        let select = format!(
            "SELECT {} FROM users WHERE username LIKE ? ORDER BY created_at DESC, id LIMIT ? OFFSET ?",
            USER_COLUMNS
        );
        let rows = sqlx::query(&select)
            .bind(&pattern)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool())
            .await
            .map_err(|e| map_read_error(e, "list users"))?;

        let users = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;
        Ok((users, total.max(0) as u64))
    }
}
