//! Shared configuration for the user account service
//!
//! This crate provides the configuration types used across all server modules.
//! Every sub-configuration has sensible defaults and can be loaded from
//! environment variables.

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    NotificationConfig, NotifierProvider,
};
