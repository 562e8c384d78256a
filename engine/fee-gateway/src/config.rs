//! Configuration for the FeeGateway

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Main configuration for the FeeGateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Request limits
    pub limits: LimitsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Request limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum number of prices in a single batch quote
    pub max_batch_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8082 }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_batch_size: 100 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

impl GatewayConfig {
    /// Get the server address
    pub fn server_addr(&self) -> Result<SocketAddr, GatewayError> {
        Ok(format!("{}:{}", self.server.host, self.server.port).parse()?)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let content = std::fs::read_to_string(path)?;
        let config: GatewayConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), GatewayError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create config from defaults overridden by environment variables
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `FEE_GATEWAY_*` overrides from the given lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FEE_GATEWAY_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("FEE_GATEWAY_PORT") {
            self.server.port = port.parse().map_err(|_| GatewayError::InvalidConfig {
                message: format!("Invalid FEE_GATEWAY_PORT: {}", port),
            })?;
        }

        if let Some(max_batch) = lookup("FEE_GATEWAY_MAX_BATCH") {
            self.limits.max_batch_size =
                max_batch.parse().map_err(|_| GatewayError::InvalidConfig {
                    message: format!("Invalid FEE_GATEWAY_MAX_BATCH: {}", max_batch),
                })?;
        }

        if let Some(format) = lookup("RUST_LOG_FORMAT") {
            self.logging.format = format;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject settings the gateway cannot run with
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.limits.max_batch_size == 0 {
            return Err(GatewayError::InvalidConfig {
                message: "limits.max_batch_size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
