//! Service configuration loaded from environment variables

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Server configuration
///
/// Reads from environment variables:
/// - `HOST` - bind address (default: `0.0.0.0`)
/// - `PORT` - listen port (default: `8000`)
/// - `SHUTDOWN_DRAIN_SECONDS` - how long to keep serving after readiness
///   flips to `shutting_down` (default: `0`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub drain: Duration,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset keys fall back to defaults; set but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host: IpAddr = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddress(raw))?,
            None => defaults.host,
        };

        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let drain = match lookup("SHUTDOWN_DRAIN_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidDrain(raw))?,
            None => defaults.drain,
        };

        Ok(Self { host, port, drain })
    }

    /// Socket address the server binds to
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            drain: Duration::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
