//! Notification worker and delivery configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Which notifier adapter delivers outbox messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierProvider {
    /// Write deliveries to the log only
    #[default]
    Log,
    /// POST deliveries as JSON to an HTTP gateway
    Http,
}

impl std::str::FromStr for NotifierProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "mock" => Ok(NotifierProvider::Log),
            "http" => Ok(NotifierProvider::Http),
            _ => Err(format!("Invalid notifier provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Notifier adapter
    #[serde(default)]
    pub provider: NotifierProvider,

    /// Gateway endpoint for the HTTP notifier
    #[serde(default)]
    pub endpoint: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Outbox polling backoff when no task is pending, in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            provider: NotifierProvider::default(),
            endpoint: None,
            timeout_seconds: default_timeout(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl NotificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: env_or("NOTIFIER_PROVIDER", NotifierProvider::default()),
            endpoint: std::env::var("NOTIFIER_ENDPOINT").ok().filter(|e| !e.is_empty()),
            timeout_seconds: env_or("NOTIFIER_TIMEOUT_SECONDS", default_timeout()),
            poll_interval_ms: env_or("NOTIFICATION_POLL_INTERVAL_MS", default_poll_interval()),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("HTTP".parse::<NotifierProvider>().unwrap(), NotifierProvider::Http);
        assert_eq!("mock".parse::<NotifierProvider>().unwrap(), NotifierProvider::Log);
        assert!("smtp".parse::<NotifierProvider>().is_err());
    }

    #[test]
    fn test_default_poll_interval_is_one_second() {
        assert_eq!(NotificationConfig::default().poll_interval_ms, 1000);
    }
}
