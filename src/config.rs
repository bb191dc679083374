use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://attendance.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_FILTER: &str = "attendance=debug";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub log_filter: String,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to defaults
    /// for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR {:?}: {}", bind_raw, e)))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) | Err(_) => {
                    return Err(AppError::Config(format!(
                        "DB_MAX_CONNECTIONS must be a positive integer, got {:?}",
                        raw
                    )));
                }
                Ok(n) => n,
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).expect("defaults should parse");
        assert_eq!(config.database_url, "sqlite://attendance.db");
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_filter, "attendance=debug");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DB_MAX_CONNECTIONS", "1"),
        ]))
        .expect("overrides should parse");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_addr = AppConfig::from_lookup(lookup_from(&[("BIND_ADDR", "nowhere")]));
        assert!(matches!(bad_addr, Err(AppError::Config(_))));

        let zero_pool = AppConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "0")]));
        assert!(matches!(zero_pool, Err(AppError::Config(_))));
    }
}
