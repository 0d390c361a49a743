//! # Infrastructure Layer
//!
//! Concrete adapters for the user account service:
//!
//! - **Database**: MySQL connection pool, migrations and the repository
//!   implementations backing users, sessions, recovery codes and the
//!   notification outbox
//! - **Notifier**: delivery channels consumed by the notification worker

pub mod database;
pub mod notifier;

pub use database::{DatabasePool, MySqlAccountStore, PoolStatistics};
pub use notifier::{create_notifier, HttpNotifier, LogNotifier};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP client error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
