//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

use crate::errors::{DomainError, ValidationError};

/// Largest page a listing may request
pub const MAX_PAGE_LIMIT: i64 = 100;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Lower-cased contact email, unique across users
    pub email: String,

    /// Public handle, unique across users
    pub username: String,

    /// Opaque password hash produced by the configured hasher
    #[serde(skip)]
    pub pass_hash: Vec<u8>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with a fresh id; the email is normalized
    pub fn new(email: &str, username: impl Into<String>, pass_hash: Vec<u8>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            username: username.into(),
            pass_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Canonical form of an email address as stored and compared
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Client metadata captured when a session starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Client IP address, if known
    pub ip: Option<IpAddr>,
    /// Client user agent string
    pub user_agent: String,
}

impl Origin {
    pub fn new(ip: Option<IpAddr>, user_agent: impl Into<String>) -> Self {
        Self {
            ip,
            user_agent: user_agent.into(),
        }
    }
}

/// Pagination window for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Validates `limit` in `1..=100` and `offset >= 0`
    pub fn new(limit: i64, offset: i64) -> Result<Self, DomainError> {
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) || offset < 0 {
            return Err(ValidationError::InvalidPage.into());
        }
        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_normalizes_email() {
        let user = User::new("Alice@Example.COM", "alice", b"hash".to_vec(), Utc::now());

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.username, "alice");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_pass_hash_is_not_serialized() {
        let user = User::new("a@b.c", "a", b"secret-hash".to_vec(), Utc::now());
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("pass_hash").is_none());
        assert_eq!(json["email"], "a@b.c");
    }

    #[test]
    fn test_page_bounds() {
        assert!(Page::new(1, 0).is_ok());
        assert!(Page::new(100, 500).is_ok());

        for (limit, offset) in [(0, 0), (101, 0), (10, -1), (-5, 3)] {
            match Page::new(limit, offset).unwrap_err() {
                DomainError::Validation(ValidationError::InvalidPage) => {}
                other => panic!("Expected InvalidPage, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_page_accessors() {
        let page = Page::new(25, 50).unwrap();
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 50);
    }
}
