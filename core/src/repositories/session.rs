//! Session repository trait.

use async_trait::async_trait;

use crate::domain::entities::session::{Session, TokenId};
use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Persistence for login sessions
///
/// Only sessions with `is_logout = false` are visible to the lookups.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session
    async fn save_session(&self, session: Session) -> Result<(), DomainError>;

    /// The active session carrying `token_id`
    ///
    /// # Returns
    /// * `Ok(Some(Session))` - Session exists and is not revoked
    /// * `Ok(None)` - Unknown or revoked
    async fn session_by_token_id(&self, token_id: TokenId) -> Result<Option<Session>, DomainError>;

    /// The owner of the active session carrying `token_id`
    async fn user_by_token_id(&self, token_id: TokenId) -> Result<Option<User>, DomainError>;

    /// Mark the session carrying `token_id` as logged out
    ///
    /// Revoking an already revoked or unknown session is not an error.
    async fn revoke_session(&self, token_id: TokenId) -> Result<(), DomainError>;
}
