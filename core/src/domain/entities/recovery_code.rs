//! Password recovery code entity.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Number of characters in a recovery code
pub const CODE_LENGTH: usize = 6;

/// Characters a recovery code is drawn from
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default validity window of a recovery code
pub const DEFAULT_CODE_LIFETIME_HOURS: i64 = 24;

/// A one-time password recovery code
///
/// A user owns at most one code at a time; saving a new one replaces the
/// previous ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryCode {
    pub user_id: Uuid,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl RecoveryCode {
    pub fn new(user_id: Uuid, code: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            code: code.into(),
            created_at,
        }
    }

    /// A code is expired once strictly more than `lifetime` has elapsed
    pub fn is_expired(&self, now: DateTime<Utc>, lifetime: Duration) -> bool {
        now - self.created_at > lifetime
    }

    /// Whether `code` has the shape of a recovery code
    pub fn is_well_formed(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
    }
}
