//! Configuration for the user account service

use chrono::Duration;

use crate::domain::entities::recovery_code::DEFAULT_CODE_LIFETIME_HOURS;

/// Configuration for the user account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Lifetime of auth tokens issued on login
    pub token_ttl: Duration,
    /// How long a recovery code stays usable
    pub recovery_code_ttl: Duration,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::days(7),
            recovery_code_ttl: Duration::hours(DEFAULT_CODE_LIFETIME_HOURS),
        }
    }
}
