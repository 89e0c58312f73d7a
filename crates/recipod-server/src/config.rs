//! Server configuration from environment variables.
//!
//! - `RECIPOD_STORE_URI`: store connection string (required, see
//!   [`StoreUri`])
//! - `RECIPOD_PORT`: listen port (default: 12345)
//! - `RECIPOD_STORE_TIMEOUT_SECS`: bound on each podcast store call
//!   (default: 10)

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use recipod_storage::{StorageError, StoreUri};

pub const STORE_URI_VAR: &str = "RECIPOD_STORE_URI";
pub const PORT_VAR: &str = "RECIPOD_PORT";
pub const STORE_TIMEOUT_VAR: &str = "RECIPOD_STORE_TIMEOUT_SECS";

pub const DEFAULT_PORT: u16 = 12345;
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("RECIPOD_STORE_URI is invalid: {0}")]
    InvalidStoreUri(#[source] StorageError),

    #[error("{var}='{value}' is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub store_uri: StoreUri,
    pub port: u16,
    pub store_timeout: Duration,
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through `lookup`, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_uri = lookup(STORE_URI_VAR).ok_or(ConfigError::Missing(STORE_URI_VAR))?;
        let store_uri = StoreUri::parse(&raw_uri).map_err(ConfigError::InvalidStoreUri)?;

        let port = match lookup(PORT_VAR) {
            Some(value) => value.trim().parse::<u16>().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: PORT_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        let store_timeout = match lookup(STORE_TIMEOUT_VAR) {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        var: STORE_TIMEOUT_VAR,
                        value: value.clone(),
                        reason: e.to_string(),
                    }
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: STORE_TIMEOUT_VAR,
                        value,
                        reason: "must be at least 1 second".into(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_STORE_TIMEOUT,
        };

        Ok(ServerConfig {
            store_uri,
            port,
            store_timeout,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_only_uri_is_set() {
        let config =
            ServerConfig::from_lookup(lookup(&[("RECIPOD_STORE_URI", "memory://")])).unwrap();
        assert_eq!(config.store_uri, StoreUri::Memory);
        assert_eq!(config.port, 12345);
        assert_eq!(config.store_timeout, Duration::from_secs(10));
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:12345");
    }

    #[test]
    fn missing_uri_is_fatal() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("RECIPOD_STORE_URI")));
    }

    #[test]
    fn invalid_uri_is_fatal() {
        let err = ServerConfig::from_lookup(lookup(&[("RECIPOD_STORE_URI", "postgres://db")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStoreUri(_)));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("RECIPOD_STORE_URI", "sqlite://podcasts.db"),
            ("RECIPOD_PORT", "8080"),
            ("RECIPOD_STORE_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(config.store_uri, StoreUri::SqliteFile("podcasts.db".into()));
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_timeout, Duration::from_secs(3));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        for (var, value) in [
            ("RECIPOD_PORT", "http"),
            ("RECIPOD_PORT", "70000"),
            ("RECIPOD_STORE_TIMEOUT_SECS", "0"),
            ("RECIPOD_STORE_TIMEOUT_SECS", "-1"),
        ] {
            let err = ServerConfig::from_lookup(lookup(&[
                ("RECIPOD_STORE_URI", "memory://"),
                (var, value),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{var}={value}");
        }
    }
}
