//! # Provider Configuration
//!
//! ## Environment Variables
//!
//! - `AUTOMARKETER_PROVIDER_TIMEOUT` - Per-request timeout for every adapter (default: `30s`)
//! - `AUTOMARKETER_GEMINI_BASE_URL` - Gemini API base (default: `https://generativelanguage.googleapis.com`)
//! - `AUTOMARKETER_HUGGINGFACE_BASE_URL` - HuggingFace inference base (default: `https://api-inference.huggingface.co`)
//! - `AUTOMARKETER_GROQ_BASE_URL` - Groq base (default: `https://api.groq.com`)
//! - `AUTOMARKETER_COHERE_BASE_URL` - Cohere base (default: `https://api.cohere.ai`)
//! - `AUTOMARKETER_TOGETHER_BASE_URL` - Together base (default: `https://api.together.xyz`)
//! - `AUTOMARKETER_OPENROUTER_BASE_URL` - OpenRouter base (default: `https://openrouter.ai`)
//!
//! API keys are not part of this config; adapters read them through a
//! [`CredentialSource`](automarketer_core::CredentialSource).

use automarketer_core::env::{get_env_duration, get_env_string};
use automarketer_core::{ConfigError, ProviderKind};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Production base URL for `kind`.
pub fn default_base_url(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
        ProviderKind::HuggingFace => "https://api-inference.huggingface.co",
        ProviderKind::Groq => "https://api.groq.com",
        ProviderKind::Cohere => "https://api.cohere.ai",
        ProviderKind::Together => "https://api.together.xyz",
        ProviderKind::OpenRouter => "https://openrouter.ai",
    }
}

fn base_url_env_var(kind: ProviderKind) -> String {
    format!("AUTOMARKETER_{}_BASE_URL", kind.id().to_uppercase())
}

/// Validated adapter settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub request_timeout: Duration,
    base_urls: HashMap<ProviderKind, String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_PROVIDER_TIMEOUT,
            base_urls: HashMap::new(),
        }
    }
}

impl ProviderConfig {
    /// Load and validate from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        ProviderConfigBuilder::from_env()?.build()
    }

    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Base URL for `kind`, falling back to the production endpoint.
    pub fn base_url(&self, kind: ProviderKind) -> &str {
        self.base_urls
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| default_base_url(kind))
    }
}

/// Builder for [`ProviderConfig`] with environment variable support
#[derive(Debug, Clone, Default)]
pub struct ProviderConfigBuilder {
    config: ProviderConfig,
}

impl ProviderConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Some(timeout) = get_env_duration("AUTOMARKETER_PROVIDER_TIMEOUT")? {
            builder = builder.request_timeout(timeout);
        }
        for kind in ProviderKind::ALL {
            if let Some(url) = get_env_string(&base_url_env_var(kind)) {
                builder = builder.base_url(kind, url);
            }
        }

        Ok(builder)
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Point `kind` at a different server, e.g. a local mock.
    #[must_use]
    pub fn base_url(mut self, kind: ProviderKind, url: impl Into<String>) -> Self {
        self.config.base_urls.insert(kind, url.into());
        self
    }

    /// Point every provider at the same server.
    #[must_use]
    pub fn base_url_for_all(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        for kind in ProviderKind::ALL {
            self.config.base_urls.insert(kind, url.clone());
        }
        self
    }

    pub fn build(self) -> Result<ProviderConfig, ConfigError> {
        self.validate()?;
        Ok(self.config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.config.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "provider request timeout must be greater than 0".to_string(),
            ));
        }
        for (kind, raw) in &self.config.base_urls {
            let parsed = url::Url::parse(raw).map_err(|e| {
                ConfigError::ValidationError(format!("invalid base URL for {kind} '{raw}': {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::ValidationError(format!(
                    "base URL for {kind} must use http or https, got '{}'",
                    parsed.scheme()
                )));
            }
        }
        Ok(())
    }
}
