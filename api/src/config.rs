//! Service configuration read from the environment at startup

use crate::constants::{DEFAULT_APP_NAME, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Postgres connection string. Without one the catalog lives in memory.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: String,
    pub port: u16,
    pub app_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database_url: non_empty("DATABASE_URL"),
            max_connections: parse_or(
                non_empty("DATABASE_MAX_CONNECTIONS"),
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            ),
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(non_empty("PORT"), "PORT", DEFAULT_PORT),
            app_name: non_empty("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    value: Option<String>,
    key: &str,
    default: T,
) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {}={:?}, using default {}", key, raw, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.listen_addr(), "0.0.0.0:3000");
        assert_eq!(cfg.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://videos@localhost/videos"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("APP_NAME", "My Videos"),
        ]);
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://videos@localhost/videos"));
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.app_name, "My Videos");
    }

    #[test]
    fn test_invalid_and_blank_values_fall_back() {
        let cfg = config(&[("PORT", "not-a-port"), ("DATABASE_URL", "  ")]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.database_url, None);
    }
}
