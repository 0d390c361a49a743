//! Session resolution and revocation

use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::session::{AuthToken, AuthUser, Session};
use crate::domain::entities::user::Origin;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::SessionRepository;
use crate::services::clock::Clock;
use crate::services::token::TokenAuthority;

/// Service binding auth tokens to persisted sessions
pub struct SessionService<S: SessionRepository> {
    /// Session persistence
    sessions: Arc<S>,
    /// Token issuance and verification
    tokens: Arc<dyn TokenAuthority>,
    clock: Arc<dyn Clock>,
}

impl<S: SessionRepository> SessionService<S> {
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `sessions` - Repository for session rows
    /// * `tokens` - Token authority used to issue and parse auth tokens
    /// * `clock` - Time source for session creation timestamps
    pub fn new(sessions: Arc<S>, tokens: Arc<dyn TokenAuthority>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions,
            tokens,
            clock,
        }
    }

    /// Issue a token for `user_id` and persist the matching session
    ///
    /// If the session cannot be stored the token is dropped and never
    /// reaches the caller.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the new session
    /// * `origin` - Client IP and user agent
    /// * `ttl` - Token lifetime
    pub async fn start_session(&self, user_id: Uuid, origin: Origin, ttl: Duration) -> DomainResult<AuthToken> {
        let (token, token_id) = self.tokens.issue(ttl)?;
        let session = Session::new(user_id, token_id, origin, self.clock.now());

        self.sessions.save_session(session).await?;
        info!(user_id = %user_id, token_id = %token_id, "Session started");

        Ok(token)
    }

    /// Resolve an auth token to its user and active session
    ///
    /// # Returns
    ///
    /// * `Ok(AuthUser)` - Token valid and its session active
    /// * `Err(ValidationError::InvalidToken)` - Empty, malformed or forged token
    /// * `Err(ValidationError::ExpiredToken)` - Token past its expiry
    /// * `Err(DomainError::NotFound)` - Session revoked or unknown
    pub async fn user_by_auth_token(&self, token: &AuthToken) -> DomainResult<AuthUser> {
        if token.is_empty() {
            return Err(ValidationError::InvalidToken.into());
        }

        let token_id = self.tokens.parse(token)?;

        let user = self
            .sessions
            .user_by_token_id(token_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        let session = self
            .sessions
            .session_by_token_id(token_id)
            .await?
            .ok_or_else(|| DomainError::not_found("session"))?;

        debug!(user_id = %user.id, token_id = %token_id, "Auth token resolved");
        Ok(AuthUser { user, session })
    }

    /// Revoke the session the user authenticated with
    ///
    /// Logging out twice is not an error.
    pub async fn logout(&self, auth_user: &AuthUser) -> DomainResult<()> {
        self.sessions.revoke_session(auth_user.session.token_id).await?;
        info!(user_id = %auth_user.user.id, token_id = %auth_user.session.token_id, "Session revoked");
        Ok(())
    }
}
