//! Server configuration
//!
//! Read from `MERGER_HOST`, `MERGER_PORT` and `MERGER_LOG`; anything unset
//! falls back to the defaults below.

use std::net::SocketAddr;
use thiserror::Error;

pub const HOST_ENV: &str = "MERGER_HOST";
pub const PORT_ENV: &str = "MERGER_PORT";
pub const LOG_ENV: &str = "MERGER_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be a port number between 1 and 65535, got {1:?}")]
    InvalidPort(&'static str, String),

    #[error("invalid socket address {0:?}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tracing filter directive used when RUST_LOG is unset
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(host) = lookup(HOST_ENV) {
            let host = host.trim();
            if !host.is_empty() {
                config.host = host.to_string();
            }
        }

        if let Some(raw) = lookup(PORT_ENV) {
            config.port = parse_port(&raw)?;
        }

        if let Some(level) = lookup(LOG_ENV) {
            if !level.trim().is_empty() {
                config.log_level = level.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidPort(PORT_ENV, raw.to_string())),
        Ok(port) => Ok(port),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info,merger_analysis=debug,tower_http=info".to_string()
}
