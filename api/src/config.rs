//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.
//! Configuration is read once at startup and passed explicitly to the server.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;
use validator::Validate;

/// Default port the translator listens on.
pub const DEFAULT_PORT: u16 = 5001;

/// Default forwarding timeout in seconds.
pub const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 10;

/// Default inbound request body limit (4 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `BACKEND_URL`: The URL flat records are forwarded to (required)
/// - `TRANSLATOR_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `TRANSLATOR_PORT`: The port to listen on (default: 5001)
/// - `TRANSLATOR_FORWARD_TIMEOUT_SECS`: Forwarding timeout in seconds (default: 10)
/// - `TRANSLATOR_MAX_BODY_BYTES`: Maximum inbound body size (default: 4 MiB)
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// The backend URL flat records are forwarded to.
    #[validate(url(message = "BACKEND_URL must be a valid URL"))]
    pub backend_url: String,
    /// Forwarding timeout in seconds.
    #[validate(range(min = 1, message = "Forward timeout must be at least one second"))]
    pub forward_timeout_secs: u64,
    /// Maximum accepted request body size in bytes.
    #[validate(range(min = 1, message = "Body limit must be positive"))]
    pub max_body_bytes: usize,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `BACKEND_URL` is not set or is not a valid URL
    /// - A numeric variable is set but cannot be parsed
    /// - A numeric variable is out of range
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a new configuration using `lookup` to resolve variables.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL").context("BACKEND_URL must be set")?;

        let host = lookup("TRANSLATOR_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("TRANSLATOR_PORT")
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("TRANSLATOR_PORT must be a valid port number")?
            .unwrap_or(DEFAULT_PORT);

        let forward_timeout_secs = lookup("TRANSLATOR_FORWARD_TIMEOUT_SECS")
            .map(|t| t.parse::<u64>())
            .transpose()
            .context("TRANSLATOR_FORWARD_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(DEFAULT_FORWARD_TIMEOUT_SECS);

        let max_body_bytes = lookup("TRANSLATOR_MAX_BODY_BYTES")
            .map(|b| b.parse::<usize>())
            .transpose()
            .context("TRANSLATOR_MAX_BODY_BYTES must be a byte count")?
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        let config = Self {
            host,
            port,
            backend_url,
            forward_timeout_secs,
            max_body_bytes,
        };
        config.validate().context("Invalid configuration")?;

        Ok(config)
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port combination is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Returns the forwarding timeout.
    #[must_use]
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_secs(self.forward_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            backend_url: "http://localhost:8000/".to_string(),
            forward_timeout_secs: DEFAULT_FORWARD_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
