//! Password hashing.

use crate::errors::DomainError;

/// One-way password hashing
///
/// Hashing is CPU bound and runs on the caller's task.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into an opaque, self-describing value
    fn hash(&self, password: &str) -> Result<Vec<u8>, DomainError>;

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed stored hash never matches.
    fn compare(&self, hash: &[u8], password: &str) -> bool;
}

/// bcrypt backed hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<Vec<u8>, DomainError> {
        bcrypt::hash(password, self.cost)
            .map(String::into_bytes)
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn compare(&self, hash: &[u8], password: &str) -> bool {
        match std::str::from_utf8(hash) {
            Ok(hash) => bcrypt::verify(password, hash).unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_compare() {
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hasher.compare(&hash, "correct horse"));
        assert!(!hasher.compare(&hash, "battery staple"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = BcryptHasher::new(4);
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        let hasher = BcryptHasher::new(4);
        assert!(!hasher.compare(b"not-a-bcrypt-hash", "anything"));
        assert!(!hasher.compare(&[0xff, 0xfe], "anything"));
    }
}
