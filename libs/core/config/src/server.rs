use crate::{env_or_default, env_parse_or, file::port_from_number_or_string, ConfigError, FromEnv};
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host", alias = "address")]
    pub host: String,
    #[serde(default = "default_port", deserialize_with = "port_from_number_or_string")]
    pub port: u16,
    /// Per-request deadline, applied to reading the request and writing the response
    #[serde(default = "default_timeout_secs", alias = "timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    Ipv4Addr::UNSPECIFIED.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Get the server address as "host:port"
    ///
    /// An empty host binds every interface.
    pub fn address(&self) -> String {
        let host = if self.host.is_empty() {
            Ipv4Addr::UNSPECIFIED.to_string()
        } else {
            self.host.clone()
        };
        format!("{}:{}", host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - SRV_HOST: defaults to 0.0.0.0 (all interfaces)
    /// - SRV_PORT: defaults to 8080
    /// - SRV_TIMEOUT: seconds, defaults to 10; an unparsable value is logged
    ///   and replaced by the default
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("SRV_HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_or("SRV_PORT", DEFAULT_PORT)?;
        let timeout_secs = env_parse_or("SRV_TIMEOUT", DEFAULT_TIMEOUT_SECS).unwrap_or_else(|e| {
            tracing::error!("{}; falling back to {}s", e, DEFAULT_TIMEOUT_SECS);
            DEFAULT_TIMEOUT_SECS
        });

        Ok(Self {
            host,
            port,
            timeout_secs,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
