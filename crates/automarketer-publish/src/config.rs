//! # Publish Configuration
//!
//! ## Environment Variables
//!
//! - `AYRSHARE_API_KEY` - Ayrshare key for social platforms
//! - `GOOGLE_API_KEY` / `BLOGGER_BLOG_ID` - Blogger credentials
//! - `BREVO_API_KEY` - Brevo key for email
//! - `AUTOMARKETER_EMAIL_SENDER_NAME` - Sender name (default: `AutoMarketer`)
//! - `AUTOMARKETER_EMAIL_SENDER_ADDRESS` - Sender address (default: `noreply@automarketer.app`)
//! - `AUTOMARKETER_PUBLISH_TIMEOUT` - Per-request timeout (default: `30s`)
//! - `AUTOMARKETER_PEAK_HOURS_PATH` - Peak-hour table location (default: `peak_hours.json`)
//! - `AUTOMARKETER_AYRSHARE_BASE_URL`, `AUTOMARKETER_BLOGGER_BASE_URL`,
//!   `AUTOMARKETER_BREVO_BASE_URL` - Endpoint overrides

use automarketer_core::env::{get_env_duration, get_env_string};
use automarketer_core::{ConfigError, SecretString};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_AYRSHARE_BASE_URL: &str = "https://api.ayrshare.com/api";
pub const DEFAULT_BLOGGER_BASE_URL: &str = "https://www.googleapis.com";
pub const DEFAULT_BREVO_BASE_URL: &str = "https://api.brevo.com/v3";
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PEAK_HOURS_PATH: &str = "peak_hours.json";

/// The `From` identity on outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSender {
    pub name: String,
    pub address: String,
}

impl Default for EmailSender {
    fn default() -> Self {
        Self {
            name: "AutoMarketer".to_string(),
            address: "noreply@automarketer.app".to_string(),
        }
    }
}

/// Credentials and endpoints for every publisher.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub request_timeout: Duration,
    pub ayrshare_api_key: Option<SecretString>,
    pub google_api_key: Option<SecretString>,
    pub blogger_blog_id: Option<String>,
    pub brevo_api_key: Option<SecretString>,
    pub sender: EmailSender,
    pub ayrshare_base_url: String,
    pub blogger_base_url: String,
    pub brevo_base_url: String,
    pub peak_hours_path: PathBuf,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_PUBLISH_TIMEOUT,
            ayrshare_api_key: None,
            google_api_key: None,
            blogger_blog_id: None,
            brevo_api_key: None,
            sender: EmailSender::default(),
            ayrshare_base_url: DEFAULT_AYRSHARE_BASE_URL.to_string(),
            blogger_base_url: DEFAULT_BLOGGER_BASE_URL.to_string(),
            brevo_base_url: DEFAULT_BREVO_BASE_URL.to_string(),
            peak_hours_path: PathBuf::from(DEFAULT_PEAK_HOURS_PATH),
        }
    }
}

impl PublishConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        PublishConfigBuilder::from_env()?.build()
    }

    pub fn builder() -> PublishConfigBuilder {
        PublishConfigBuilder::default()
    }
}

/// Builder for [`PublishConfig`] with environment variable support
#[derive(Debug, Clone, Default)]
pub struct PublishConfigBuilder {
    config: PublishConfig,
}

impl PublishConfigBuilder {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Some(timeout) = get_env_duration("AUTOMARKETER_PUBLISH_TIMEOUT")? {
            builder = builder.request_timeout(timeout);
        }
        if let Some(key) = get_env_string("AYRSHARE_API_KEY") {
            builder = builder.ayrshare_api_key(key);
        }
        if let (Some(key), Some(blog)) = (
            get_env_string("GOOGLE_API_KEY"),
            get_env_string("BLOGGER_BLOG_ID"),
        ) {
            builder = builder.blogger(key, blog);
        }
        if let Some(key) = get_env_string("BREVO_API_KEY") {
            builder = builder.brevo_api_key(key);
        }
        if let Some(name) = get_env_string("AUTOMARKETER_EMAIL_SENDER_NAME") {
            builder.config.sender.name = name;
        }
        if let Some(address) = get_env_string("AUTOMARKETER_EMAIL_SENDER_ADDRESS") {
            builder.config.sender.address = address;
        }
        if let Some(path) = get_env_string("AUTOMARKETER_PEAK_HOURS_PATH") {
            builder = builder.peak_hours_path(path);
        }
        if let Some(url) = get_env_string("AUTOMARKETER_AYRSHARE_BASE_URL") {
            builder.config.ayrshare_base_url = url;
        }
        if let Some(url) = get_env_string("AUTOMARKETER_BLOGGER_BASE_URL") {
            builder.config.blogger_base_url = url;
        }
        if let Some(url) = get_env_string("AUTOMARKETER_BREVO_BASE_URL") {
            builder.config.brevo_base_url = url;
        }

        Ok(builder)
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn ayrshare_api_key(mut self, key: impl Into<SecretString>) -> Self {
        self.config.ayrshare_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn blogger(mut self, api_key: impl Into<SecretString>, blog_id: impl Into<String>) -> Self {
        self.config.google_api_key = Some(api_key.into());
        self.config.blogger_blog_id = Some(blog_id.into());
        self
    }

    #[must_use]
    pub fn brevo_api_key(mut self, key: impl Into<SecretString>) -> Self {
        self.config.brevo_api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn sender(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.config.sender = EmailSender {
            name: name.into(),
            address: address.into(),
        };
        self
    }

    #[must_use]
    pub fn peak_hours_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.peak_hours_path = path.into();
        self
    }

    /// Point every publisher at the same server, e.g. a local mock.
    #[must_use]
    pub fn base_url_for_all(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.ayrshare_base_url = url.clone();
        self.config.blogger_base_url = url.clone();
        self.config.brevo_base_url = url;
        self
    }

    pub fn build(self) -> Result<PublishConfig, ConfigError> {
        self.validate()?;
        Ok(self.config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.config.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "publish request timeout must be greater than 0".to_string(),
            ));
        }
        if !self.config.sender.address.contains('@') {
            return Err(ConfigError::ValidationError(format!(
                "email sender address '{}' is not an email address",
                self.config.sender.address
            )));
        }
        for (name, raw) in [
            ("Ayrshare", &self.config.ayrshare_base_url),
            ("Blogger", &self.config.blogger_base_url),
            ("Brevo", &self.config.brevo_base_url),
        ] {
            let parsed = url::Url::parse(raw).map_err(|e| {
                ConfigError::ValidationError(format!("invalid {name} base URL '{raw}': {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::ValidationError(format!(
                    "{name} base URL must use http or https, got '{}'",
                    parsed.scheme()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PublishConfig::builder().build().unwrap();
        assert_eq!(config.request_timeout, DEFAULT_PUBLISH_TIMEOUT);
        assert!(config.ayrshare_api_key.is_none());
        assert_eq!(config.sender.name, "AutoMarketer");
        assert_eq!(config.brevo_base_url, DEFAULT_BREVO_BASE_URL);
    }

    #[test]
    fn test_rejects_bad_sender() {
        let result = PublishConfig::builder().sender("Acme", "not-an-email").build();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = PublishConfig::builder()
            .base_url_for_all("ftp://example.com")
            .build();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = PublishConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }
}
