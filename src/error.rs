//! Startup and serving errors

use std::net::SocketAddr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("Invalid SHUTDOWN_DRAIN_SECONDS value: {0}")]
    InvalidDrain(String),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),
}

/// Errors raised while binding or running the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}
