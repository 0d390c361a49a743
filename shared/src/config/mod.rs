//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing, token lifetimes and password hashing cost
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `notification` - Outbox polling and notifier delivery settings

pub mod auth;
pub mod database;
pub mod environment;
pub mod notification;

use serde::{Deserialize, Serialize};

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{NotificationConfig, NotifierProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Notification worker and delivery configuration
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            notification: NotificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// A `.env` file in the working directory is read first when present;
    /// variables already set in the process environment take precedence.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Build configuration from process environment variables only
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            notification: NotificationConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is missing or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
