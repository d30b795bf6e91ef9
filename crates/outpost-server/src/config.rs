//! Server Configuration
//!
//! Environment-driven configuration. Heavy infrastructure (Postgres) is
//! optional so the server can run against the in-memory store during
//! development.

use anyhow::Context;
use outpost::EventBusConfig;

/// Per-dependency outbound configuration for the AuthService system.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Base URL of the external auth service
    pub endpoint: String,
    /// Bearer token material injected on every outbound request
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub auth: AuthServiceConfig,
    pub events: EventBusConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, so tests don't touch process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let events = EventBusConfig {
            capacity: parse_or(&lookup, "EVENT_QUEUE_CAPACITY", 256)?,
            workers: parse_or(&lookup, "EVENT_WORKERS", 2)?,
        };

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            auth: AuthServiceConfig {
                endpoint: lookup("AUTH_SERVICE_ENDPOINT")
                    .unwrap_or_else(|| "http://localhost:9000".to_string()),
                token: lookup("AUTH_SERVICE_TOKEN").unwrap_or_default(),
            },
            events,
        })
    }
}

fn parse_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> anyhow::Result<usize> {
    match lookup(key) {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{key} must be a positive integer, got {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.database_url.is_none());
        assert_eq!(config.events.capacity, 256);
        assert_eq!(config.events.workers, 2);
    }

    #[test]
    fn values_override_defaults() {
        let config = AppConfig::from_lookup(|key| match key {
            "BIND_ADDR" => Some("127.0.0.1:3000".to_string()),
            "AUTH_SERVICE_ENDPOINT" => Some("https://auth.internal".to_string()),
            "AUTH_SERVICE_TOKEN" => Some("secret".to_string()),
            "EVENT_QUEUE_CAPACITY" => Some("16".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.auth.endpoint, "https://auth.internal");
        assert_eq!(config.events.capacity, 16);
    }

    #[test]
    fn invalid_numeric_is_an_error() {
        let result = AppConfig::from_lookup(|key| match key {
            "EVENT_WORKERS" => Some("many".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }
}
