//! Configuration for the token authority

/// Configuration for the token authority
#[derive(Debug, Clone)]
pub struct TokenAuthorityConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Clock skew tolerated past `exp`, in seconds
    pub leeway_seconds: u64,
}

impl TokenAuthorityConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }
}

impl Default for TokenAuthorityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            leeway_seconds: 0,
        }
    }
}
