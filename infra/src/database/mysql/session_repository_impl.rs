//! MySQL implementation of the SessionRepository trait.

use async_trait::async_trait;

use ua_core::domain::entities::{Session, TokenId, User};
use ua_core::errors::DomainError;
use ua_core::repositories::SessionRepository;

use super::{row_to_session, row_to_user, MySqlAccountStore};
use crate::database::constraint::{map_read_error, map_write_error};

#[async_trait]
impl SessionRepository for MySqlAccountStore {
    async fn save_session(&self, session: Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, token_id, ip, user_agent, is_logout, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(session.token_id.to_string())
        .bind(session.origin.ip.map(|ip| ip.to_string()))
        .bind(&session.origin.user_agent)
        .bind(session.is_logout)
        .bind(session.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| map_write_error(e, "save session"))?;

        Ok(())
    }

    async fn session_by_token_id(&self, token_id: TokenId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, token_id, ip, user_agent, is_logout, created_at
            FROM sessions
            WHERE token_id = ? AND is_logout = FALSE
            LIMIT 1
            "#,
        )
        .bind(token_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_read_error(e, "find session"))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn user_by_token_id(&self, token_id: TokenId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.email, u.username, u.pass_hash, u.created_at, u.updated_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_id = ? AND s.is_logout = FALSE
            LIMIT 1
            "#,
        )
        .bind(token_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| map_read_error(e, "find session owner"))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn revoke_session(&self, token_id: TokenId) -> Result<(), DomainError> {
        sqlx::query("UPDATE sessions SET is_logout = TRUE WHERE token_id = ?")
            .bind(token_id.to_string())
            .execute(self.pool())
            .await
            .map_err(|e| map_write_error(e, "revoke session"))?;

        Ok(())
    }
}
