//! # HTTP Server Configuration
//!
//! ## Environment Variables
//!
//! - `AUTOMARKETER_BIND_ADDR` - Listen address (default: `0.0.0.0:8080`)
//! - `AUTOMARKETER_ENABLE_CORS` - Permissive CORS (default: true)
//! - `AUTOMARKETER_REQUEST_TIMEOUT` - Whole-request timeout (default: `120s`)
//! - `AUTOMARKETER_MAX_BODY_SIZE` - Maximum request body in bytes (default: 1048576)

use automarketer_core::ConfigError;
use automarketer_core::env::{get_env_bool, get_env_duration, get_env_string, get_env_usize};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub bind_addr: SocketAddr,
    pub enable_cors: bool,
    pub request_timeout: Duration,
    pub max_body_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_cors: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl HttpConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        HttpConfigBuilder::from_env()?.build()
    }

    pub fn builder() -> HttpConfigBuilder {
        HttpConfigBuilder::default()
    }
}

/// Builder for `HttpConfig` with environment variable support
#[derive(Debug, Clone, Default)]
pub struct HttpConfigBuilder {
    config: HttpConfig,
}

impl HttpConfigBuilder {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Some(addr) = get_env_string("AUTOMARKETER_BIND_ADDR") {
            builder = builder.bind_addr(parse_addr("AUTOMARKETER_BIND_ADDR", &addr)?);
        }
        if let Some(cors) = get_env_bool("AUTOMARKETER_ENABLE_CORS")? {
            builder = builder.enable_cors(cors);
        }
        if let Some(timeout) = get_env_duration("AUTOMARKETER_REQUEST_TIMEOUT")? {
            builder = builder.request_timeout(timeout);
        }
        if let Some(size) = get_env_usize("AUTOMARKETER_MAX_BODY_SIZE")? {
            builder = builder.max_body_size(size);
        }

        Ok(builder)
    }

    #[must_use]
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    #[must_use]
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.config.enable_cors = enable;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    pub fn build(self) -> Result<HttpConfig, ConfigError> {
        if self.config.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "request timeout must be greater than 0".to_string(),
            ));
        }
        if self.config.max_body_size == 0 {
            return Err(ConfigError::ValidationError(
                "max body size must be greater than 0".to_string(),
            ));
        }
        Ok(self.config)
    }
}

pub fn parse_addr(key: &str, raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::InvalidEnvVar {
            key: key.to_string(),
            message: format!("invalid socket address '{raw}': {e}"),
        })
}
