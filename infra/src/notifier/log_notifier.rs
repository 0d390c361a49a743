//! Log-only notifier for development and testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

use ua_core::domain::entities::{Message, NotificationKind};
use ua_core::errors::DomainError;
use ua_core::services::Notifier;

use super::mask_contact;

/// Writes each delivery to the log instead of sending it
///
/// Recovery codes are redacted unless `reveal_content` is set.
#[derive(Clone, Default)]
pub struct LogNotifier {
    delivered: Arc<AtomicU64>,
    reveal_content: bool,
}

impl LogNotifier {
    pub fn new(reveal_content: bool) -> Self {
        Self {
            delivered: Arc::new(AtomicU64::new(0)),
            reveal_content,
        }
    }

    /// Number of deliveries so far
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }

    fn printable_content<'a>(&self, message: &'a Message) -> &'a str {
        if message.kind == NotificationKind::PassRecovery && !self.reveal_content {
            "[redacted]"
        } else {
            &message.content
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, contact: &str, message: &Message) -> Result<(), DomainError> {
        let count = self.delivered.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "notifier",
            provider = "log",
            contact = %mask_contact(contact),
            kind = %message.kind,
            content = self.printable_content(message),
            count,
            "Notification delivered"
        );

        Ok(())
    }
}
