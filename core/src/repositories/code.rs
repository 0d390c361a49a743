//! Recovery code repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::notification::NewNotification;
use crate::domain::entities::recovery_code::RecoveryCode;
use crate::errors::DomainError;

#[async_trait]
pub trait CodeRepository: Send + Sync {
    /// Replace the user's recovery codes with `code` and enqueue the recovery
    /// notification, all in one transaction
    async fn save_code(&self, code: RecoveryCode, notification: NewNotification) -> Result<(), DomainError>;

    /// Look a code up by its value
    ///
    /// # Returns
    /// * `Ok(Some(code))` - The code and its owner
    /// * `Ok(None)` - No such code
    async fn code_by_value(&self, code: &str) -> Result<Option<RecoveryCode>, DomainError>;

    /// The user's current recovery code value, if any
    async fn code_by_user(&self, user_id: Uuid) -> Result<Option<String>, DomainError>;
}
