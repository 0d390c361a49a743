//! Delivery channel abstraction.

use async_trait::async_trait;

use crate::domain::entities::notification::Message;
use crate::errors::DomainError;

/// Delivers a message to a contact address
///
/// Implementations are called sequentially by the worker and may block for
/// as long as the delivery takes; an error stops the worker.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, contact: &str, message: &Message) -> Result<(), DomainError>;
}
