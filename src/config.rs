//! Configuration types.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::ConfigError;

/// Default upload limit for the CSV body (2 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    pub bind: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Largest request body accepted by the classify endpoint.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Numeric values that fail to parse fall back to their defaults; an
    /// unparseable bind address is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind = match lookup("COACH_CARDS_BIND") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "COACH_CARDS_BIND".into(),
                    message: format!("{raw:?}: {e}"),
                })?,
            None => defaults.bind,
        };

        let port: u16 = lookup("COACH_CARDS_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);

        let max_body_bytes: usize = lookup("COACH_CARDS_MAX_BODY_BYTES")
            .and_then(|s| s.trim().parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_body_bytes);

        Ok(Self {
            bind,
            port,
            max_body_bytes,
        })
    }

    /// Socket address the server listens on.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
