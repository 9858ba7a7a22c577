//! Configuration for kvctl
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{KvError, Result};
use crate::render::OutputFormat;

/// Main configuration for a kvctl invocation
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Remote endpoint (host:port, optionally prefixed with `http://`)
    pub endpoint: String,

    /// Connection establishment timeout (milliseconds, 0 = no deadline)
    pub dial_timeout_ms: u64,

    /// Per-request deadline (milliseconds, 0 = no deadline)
    pub command_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Output Configuration
    // -------------------------------------------------------------------------
    /// How responses are rendered
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:2379".to_string(),
            dial_timeout_ms: 2000,
            command_timeout_ms: 5000,
            output: OutputFormat::Simple,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Endpoint as a URI tonic can dial. Bare `host:port` gets `http://`.
    pub fn endpoint_uri(&self) -> Result<String> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(KvError::Config("endpoint must not be empty".to_string()));
        }

        if endpoint.starts_with("http://") {
            Ok(endpoint.to_string())
        } else if endpoint.contains("://") {
            Err(KvError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: "only plaintext http endpoints are supported".to_string(),
            })
        } else {
            Ok(format!("http://{}", endpoint))
        }
    }

    pub fn dial_timeout(&self) -> Option<Duration> {
        (self.dial_timeout_ms > 0).then(|| Duration::from_millis(self.dial_timeout_ms))
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_ms > 0).then(|| Duration::from_millis(self.command_timeout_ms))
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the remote endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn dial_timeout_ms(mut self, ms: u64) -> Self {
        self.config.dial_timeout_ms = ms;
        self
    }

    /// Set the request timeout (in milliseconds)
    pub fn command_timeout_ms(mut self, ms: u64) -> Self {
        self.config.command_timeout_ms = ms;
        self
    }

    /// Set the output format
    pub fn output(mut self, output: OutputFormat) -> Self {
        self.config.output = output;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
