//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env_or;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Token signing and credential settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 signing secret for auth tokens
    pub jwt_secret: String,

    /// Auth token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,

    /// Recovery code lifetime in seconds
    #[serde(default = "default_recovery_code_ttl")]
    pub recovery_code_ttl_seconds: i64,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_SECRET),
            token_ttl_seconds: default_token_ttl(),
            recovery_code_ttl_seconds: default_recovery_code_ttl(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_SECRET.to_string()),
            token_ttl_seconds: env_or("AUTH_TOKEN_TTL_SECONDS", default_token_ttl()),
            recovery_code_ttl_seconds: env_or(
                "RECOVERY_CODE_TTL_SECONDS",
                default_recovery_code_ttl(),
            ),
            bcrypt_cost: env_or("BCRYPT_COST", default_bcrypt_cost()),
        }
    }

    /// Create a configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the auth token lifetime in days
    pub fn with_token_ttl_days(mut self, days: i64) -> Self {
        self.token_ttl_seconds = days * 86400;
        self
    }

    /// Set the bcrypt cost
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_SECRET
    }
}

fn default_token_ttl() -> i64 {
    604800 // 7 days
}

fn default_recovery_code_ttl() -> i64 {
    86400 // 24 hours
}

fn default_bcrypt_cost() -> u32 {
    12
}
