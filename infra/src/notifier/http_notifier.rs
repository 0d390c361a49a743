//! HTTP gateway notifier
//!
//! Hands each delivery to an external mail/SMS gateway as a JSON POST:
//!
//! ```json
//! {"contact": "alice@example.com", "kind": "welcome", "content": "Welcome"}
//! ```
//!
//! Any non-2xx status is a delivery failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use ua_core::domain::entities::Message;
use ua_core::errors::DomainError;
use ua_core::services::Notifier;

use super::mask_contact;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct DeliveryRequest<'a> {
    contact: &'a str,
    kind: &'a str,
    content: &'a str,
}

/// Notifier posting to a gateway endpoint
#[derive(Clone)]
pub struct HttpNotifier {
    client: Client,
    endpoint: String,
}

impl HttpNotifier {
    /// Create a notifier for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, contact: &str, message: &Message) -> Result<(), DomainError> {
        let body = DeliveryRequest {
            contact,
            kind: message.kind.as_str(),
            content: &message.content,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, contact = %mask_contact(contact), "Notification gateway unreachable");
                DomainError::internal(format!("Notification gateway request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, contact = %mask_contact(contact), "Notification gateway rejected delivery");
            return Err(DomainError::internal(format!(
                "Notification gateway returned {}",
                status
            )));
        }

        debug!(%status, kind = %message.kind, "Notification accepted by gateway");
        Ok(())
    }
}
