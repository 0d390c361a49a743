//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::notification::NewNotification;
use crate::domain::entities::user::{Page, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Writes that trigger a notification take the outbox row as an argument and
/// must commit both in one transaction, or neither.
///
/// Unique-key violations are reported as
/// [`ConflictError::EmailExist`](crate::errors::ConflictError::EmailExist) or
/// [`ConflictError::UsernameExist`](crate::errors::ConflictError::UsernameExist).
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user together with its welcome notification
    ///
    /// # Arguments
    /// * `user` - The user to persist; `email` is already normalized
    /// * `notification` - Outbox row committed in the same transaction
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::Conflict)` - Email or username already taken
    async fn create_user(&self, user: User, notification: NewNotification) -> Result<User, DomainError>;

    /// Change a user's email and enqueue the change notification atomically
    ///
    /// # Returns
    /// * `Ok(())` - Both writes committed
    /// * `Err(DomainError::NotFound)` - No such user
    /// * `Err(DomainError::Conflict)` - Email taken by another user
    async fn update_email(
        &self,
        user_id: Uuid,
        email: &str,
        notification: NewNotification,
    ) -> Result<(), DomainError>;

    /// Change a user's username
    ///
    /// # Returns
    /// * `Ok(())` - Updated
    /// * `Err(DomainError::NotFound)` - No such user
    /// * `Err(DomainError::Conflict)` - Username taken by another user
    async fn update_username(
        &self,
        user_id: Uuid,
        username: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Replace a user's password hash and delete all their recovery codes in
    /// one transaction
    async fn update_password(
        &self,
        user_id: Uuid,
        pass_hash: &[u8],
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Physically delete a user; dependent rows go with it
    async fn delete_user(&self, user_id: Uuid) -> Result<(), DomainError>;

    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Users whose username contains `query`, newest first
    ///
    /// # Returns
    /// * `Ok((users, total))` - One page of matches and the total match count
    async fn list_users_by_username(&self, query: &str, page: Page) -> Result<(Vec<User>, u64), DomainError>;
}
