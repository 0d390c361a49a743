//! Outbox notification entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{DomainError, ValidationError};

/// Kinds of account notifications the outbox carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Sent once after registration
    Welcome,
    /// Sent after the contact email changed
    ChangeEmail,
    /// Carries the current recovery code
    PassRecovery,
}

impl NotificationKind {
    /// Storage representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Welcome => "welcome",
            NotificationKind::ChangeEmail => "change email",
            NotificationKind::PassRecovery => "password recovery",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "welcome" => Ok(NotificationKind::Welcome),
            "change email" => Ok(NotificationKind::ChangeEmail),
            "password recovery" => Ok(NotificationKind::PassRecovery),
            _ => Err(ValidationError::UnknownKindTask.into()),
        }
    }
}

/// Payload handed to a notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: NotificationKind,
    pub content: String,
}

impl Message {
    pub fn new(kind: NotificationKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Outbox row awaiting, or done with, delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTask {
    pub id: i64,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    pub exec_time: Option<DateTime<Utc>>,
}

/// Outbox row to be written in the same transaction as a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    pub fn new(user_id: Uuid, kind: NotificationKind, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            kind,
            created_at,
        }
    }
}
