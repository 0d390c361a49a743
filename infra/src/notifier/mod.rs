//! Notifier adapters
//!
//! Delivery channels handed to the notification worker:
//! - [`LogNotifier`]: writes deliveries to the log (development)
//! - [`HttpNotifier`]: POSTs deliveries as JSON to a mail/SMS gateway

pub mod http_notifier;
pub mod log_notifier;

use std::sync::Arc;

use ua_core::services::Notifier;
use ua_shared::{NotificationConfig, NotifierProvider};

use crate::InfrastructureError;

pub use http_notifier::HttpNotifier;
pub use log_notifier::LogNotifier;

/// Build the notifier selected by `config`
///
/// # Arguments
/// * `config` - Notification settings
/// * `reveal_content` - Let the log notifier print recovery codes in clear
///
/// # Returns
/// * `Err(InfrastructureError::Config)` - The HTTP provider has no endpoint
pub fn create_notifier(
    config: &NotificationConfig,
    reveal_content: bool,
) -> Result<Arc<dyn Notifier>, InfrastructureError> {
    match config.provider {
        NotifierProvider::Log => {
            tracing::info!(reveal_content, "Using log notifier");
            Ok(Arc::new(LogNotifier::new(reveal_content)))
        }
        NotifierProvider::Http => {
            let endpoint = config
                .endpoint
                .clone()
                .filter(|e| !e.trim().is_empty())
                .ok_or_else(|| {
                    InfrastructureError::Config("NOTIFIER_ENDPOINT is required for the http notifier".to_string())
                })?;
            tracing::info!(endpoint = %endpoint, "Using HTTP notifier");
            Ok(Arc::new(HttpNotifier::new(endpoint, config.timeout_seconds)?))
        }
    }
}

/// Mask the local part of an email address for logs
pub(crate) fn mask_contact(contact: &str) -> String {
    match contact.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
