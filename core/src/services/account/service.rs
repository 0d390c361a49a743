//! Main user account service implementation

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::notification::{NewNotification, NotificationKind};
use crate::domain::entities::recovery_code::RecoveryCode;
use crate::domain::entities::session::{AuthToken, AuthUser};
use crate::domain::entities::user::{normalize_email, Origin, Page, User};
use crate::errors::{ConflictError, DomainError, DomainResult, ValidationError};
use crate::repositories::{CodeRepository, SessionRepository, UserRepository};
use crate::services::clock::Clock;
use crate::services::password::PasswordHasher;
use crate::services::recovery_code::CodeGenerator;
use crate::services::session::SessionService;

use super::config::AccountServiceConfig;

/// Fresh codes tried before a collision is reported
const MAX_CODE_ATTEMPTS: u32 = 3;

/// Account service for the complete user lifecycle
pub struct UserAccountService<U, S, C>
where
    U: UserRepository,
    S: SessionRepository,
    C: CodeRepository,
{
    /// User repository for account persistence
    users: Arc<U>,
    /// Recovery code persistence
    codes: Arc<C>,
    /// Session service for token issuance and revocation
    sessions: Arc<SessionService<S>>,
    hasher: Arc<dyn PasswordHasher>,
    code_generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<U, S, C> UserAccountService<U, S, C>
where
    U: UserRepository,
    S: SessionRepository,
    C: CodeRepository,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `users` - Repository for user data persistence
    /// * `codes` - Repository for recovery codes
    /// * `sessions` - Session service shared with token resolution
    /// * `hasher` - Password hasher
    /// * `code_generator` - Recovery code generator
    /// * `clock` - Time source for timestamps and code expiry
    /// * `config` - Service configuration
    pub fn new(
        users: Arc<U>,
        codes: Arc<C>,
        sessions: Arc<SessionService<S>>,
        hasher: Arc<dyn PasswordHasher>,
        code_generator: Arc<dyn CodeGenerator>,
        clock: Arc<dyn Clock>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            users,
            codes,
            sessions,
            hasher,
            code_generator,
            clock,
            config,
        }
    }

    /// The session service used by this account service
    pub fn sessions(&self) -> &Arc<SessionService<S>> {
        &self.sessions
    }

    /// Register a new user and log them in
    ///
    /// The user row and its `Welcome` notification are committed together.
    ///
    /// # Arguments
    ///
    /// * `email` - Contact email, normalized before storage
    /// * `username` - Public handle
    /// * `password` - Plaintext password
    /// * `origin` - Client metadata for the first session
    ///
    /// # Returns
    ///
    /// * `Ok((User, AuthToken))` - The stored user and a fresh auth token
    /// * `Err(ConflictError::EmailExist | UsernameExist)` - Already taken
    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        password: &str,
        origin: Origin,
    ) -> DomainResult<(User, AuthToken)> {
        let pass_hash = self.hasher.hash(password)?;
        let now = self.clock.now();
        let user = User::new(email, username, pass_hash, now);
        let welcome = NewNotification::new(user.id, NotificationKind::Welcome, now);

        let user = self.users.create_user(user, welcome).await?;
        info!(user_id = %user.id, "User registered");

        self.login(&user.email, password, origin).await
    }

    /// Authenticate by email and password and start a session
    ///
    /// # Returns
    ///
    /// * `Ok((User, AuthToken))` - Credentials valid
    /// * `Err(DomainError::NotFound)` - No user with that email
    /// * `Err(ValidationError::NotValidPassword)` - Wrong password
    pub async fn login(&self, email: &str, password: &str, origin: Origin) -> DomainResult<(User, AuthToken)> {
        let email = normalize_email(email);
        let user = self
            .users
            .user_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        if !self.hasher.compare(&user.pass_hash, password) {
            warn!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(ValidationError::NotValidPassword.into());
        }

        let token = self
            .sessions
            .start_session(user.id, origin, self.config.token_ttl)
            .await?;

        Ok((user, token))
    }

    /// Revoke the caller's current session
    pub async fn logout(&self, auth_user: &AuthUser) -> DomainResult<()> {
        self.sessions.logout(auth_user).await
    }

    /// Change the caller's username
    ///
    /// # Returns
    ///
    /// * `Err(ConflictError::UsernameNeedDifferentiate)` - Same as the current one; nothing is written
    /// * `Err(ConflictError::UsernameExist)` - Taken by another user
    pub async fn update_username(&self, auth_user: &AuthUser, username: &str) -> DomainResult<()> {
        if auth_user.user.username == username {
            return Err(ConflictError::UsernameNeedDifferentiate.into());
        }

        self.users
            .update_username(auth_user.user.id, username, self.clock.now())
            .await?;
        info!(user_id = %auth_user.user.id, "Username updated");
        Ok(())
    }

    /// Change the caller's email and notify the new address
    ///
    /// # Returns
    ///
    /// * `Err(ConflictError::EmailNeedDifferentiate)` - Same as the current one after normalization; nothing is written
    /// * `Err(ConflictError::EmailExist)` - Taken by another user
    pub async fn update_email(&self, auth_user: &AuthUser, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        if auth_user.user.email == email {
            return Err(ConflictError::EmailNeedDifferentiate.into());
        }

        let notification =
            NewNotification::new(auth_user.user.id, NotificationKind::ChangeEmail, self.clock.now());
        self.users
            .update_email(auth_user.user.id, &email, notification)
            .await?;
        info!(user_id = %auth_user.user.id, "Email updated");
        Ok(())
    }

    /// Change the caller's password after checking the old one
    ///
    /// Outstanding recovery codes are invalidated in the same transaction.
    pub async fn update_password(
        &self,
        auth_user: &AuthUser,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if !self.hasher.compare(&auth_user.user.pass_hash, old_password) {
            return Err(ValidationError::NotValidPassword.into());
        }

        let pass_hash = self.hasher.hash(new_password)?;
        self.users
            .update_password(auth_user.user.id, &pass_hash, self.clock.now())
            .await?;
        info!(user_id = %auth_user.user.id, "Password updated");
        Ok(())
    }

    /// Issue a recovery code for the account behind `email`
    ///
    /// Prior codes are replaced and a `PassRecovery` notification is queued;
    /// the code itself only travels through the notification. A code already
    /// held by another account is regenerated up to `MAX_CODE_ATTEMPTS` times.
    pub async fn create_recovery_code(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let user = self
            .users
            .user_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))?;

        let now = self.clock.now();
        let mut attempt = 1;
        loop {
            let code = RecoveryCode::new(user.id, self.code_generator.generate(), now);
            let notification = NewNotification::new(user.id, NotificationKind::PassRecovery, now);

            match self.codes.save_code(code, notification).await {
                Ok(()) => break,
                Err(e) if e.is_conflict(ConflictError::CodeExist) && attempt < MAX_CODE_ATTEMPTS => {
                    warn!(user_id = %user.id, attempt, "Recovery code collided, regenerating");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
        info!(user_id = %user.id, "Recovery code issued");
        Ok(())
    }

    /// Set a new password using a recovery code
    ///
    /// # Returns
    ///
    /// * `Err(ValidationError::NotValidCode)` - Not shaped like a recovery code
    /// * `Err(DomainError::NotFound)` - No such code
    /// * `Err(ConflictError::CodeExpired)` - Code older than the configured lifetime
    pub async fn recovery_password(&self, code: &str, new_password: &str) -> DomainResult<()> {
        if !RecoveryCode::is_well_formed(code) {
            return Err(ValidationError::NotValidCode.into());
        }

        let stored = self
            .codes
            .code_by_value(code)
            .await?
            .ok_or_else(|| DomainError::not_found("recovery code"))?;

        if stored.is_expired(self.clock.now(), self.config.recovery_code_ttl) {
            warn!(user_id = %stored.user_id, "Recovery rejected: code expired");
            return Err(ConflictError::CodeExpired.into());
        }

        let pass_hash = self.hasher.hash(new_password)?;
        self.users
            .update_password(stored.user_id, &pass_hash, self.clock.now())
            .await?;
        info!(user_id = %stored.user_id, "Password recovered");
        Ok(())
    }

    /// Permanently delete the caller's account
    pub async fn delete_user(&self, auth_user: &AuthUser) -> DomainResult<()> {
        self.users.delete_user(auth_user.user.id).await?;
        info!(user_id = %auth_user.user.id, "User deleted");
        Ok(())
    }

    /// Fail with `EmailExist` if the email is already registered
    pub async fn verify_email_available(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        match self.users.user_by_email(&email).await? {
            Some(_) => Err(ConflictError::EmailExist.into()),
            None => Ok(()),
        }
    }

    /// Fail with `UsernameExist` if the username is already taken
    pub async fn verify_username_available(&self, username: &str) -> DomainResult<()> {
        match self.users.user_by_username(username).await? {
            Some(_) => Err(ConflictError::UsernameExist.into()),
            None => Ok(()),
        }
    }

    /// Look up another user's profile
    pub async fn user(&self, _auth_user: &AuthUser, user_id: Uuid) -> DomainResult<User> {
        self.users
            .user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    /// Search users by username substring
    ///
    /// # Returns
    ///
    /// * `Ok((users, total))` - One page of matches, newest first, and the total match count
    pub async fn list_users_by_username(
        &self,
        _auth_user: &AuthUser,
        query: &str,
        page: Page,
    ) -> DomainResult<(Vec<User>, u64)> {
        self.users.list_users_by_username(query, page).await
    }
}
