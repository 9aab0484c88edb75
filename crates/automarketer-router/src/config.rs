//! # Router Configuration
//!
//! ## Environment Variables
//!
//! - `AUTOMARKETER_FANOUT_BUDGET` - Wall-clock budget for one fan-out batch (default: `60s`)
//! - `AUTOMARKETER_MAX_CONCURRENCY` - Adapters running at once (default: 6)
//! - `AUTOMARKETER_MIN_CONTENT_LENGTH` - Characters a result must exceed (default: 20)
//! - `AUTOMARKETER_SCORING_TIMEOUT` - Bound on each virality analysis (default: `30s`)
//! - `AUTOMARKETER_DEFAULT_SCORE` - Score used when analysis fails (default: 50)

use automarketer_core::env::{get_env_duration, get_env_f64, get_env_usize};
use automarketer_core::{ConfigError, DEFAULT_SCORE, MIN_CONTENT_LENGTH, ProviderKind};
use std::time::Duration;

pub const DEFAULT_FANOUT_BUDGET: Duration = Duration::from_secs(60);
pub const DEFAULT_SCORING_TIMEOUT: Duration = Duration::from_secs(30);

/// Validated pipeline settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig {
    pub fanout_budget: Duration,
    pub max_concurrency: usize,
    pub min_content_length: usize,
    pub scoring_timeout: Duration,
    pub default_score: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            fanout_budget: DEFAULT_FANOUT_BUDGET,
            max_concurrency: ProviderKind::ALL.len(),
            min_content_length: MIN_CONTENT_LENGTH,
            scoring_timeout: DEFAULT_SCORING_TIMEOUT,
            default_score: DEFAULT_SCORE,
        }
    }
}

impl RouterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        RouterConfigBuilder::from_env()?.build()
    }

    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::new()
    }
}

/// Builder for [`RouterConfig`] with environment variable support
#[derive(Debug, Clone, Default)]
pub struct RouterConfigBuilder {
    config: RouterConfig,
}

impl RouterConfigBuilder {
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

        if let Some(budget) = get_env_duration("AUTOMARKETER_FANOUT_BUDGET")? {
            builder = builder.fanout_budget(budget);
        }
        if let Some(width) = get_env_usize("AUTOMARKETER_MAX_CONCURRENCY")? {
            builder = builder.max_concurrency(width);
        }
        if let Some(length) = get_env_usize("AUTOMARKETER_MIN_CONTENT_LENGTH")? {
            builder = builder.min_content_length(length);
        }
        if let Some(timeout) = get_env_duration("AUTOMARKETER_SCORING_TIMEOUT")? {
            builder = builder.scoring_timeout(timeout);
        }
        if let Some(score) = get_env_f64("AUTOMARKETER_DEFAULT_SCORE")? {
            builder = builder.default_score(score);
        }

        Ok(builder)
    }

    #[must_use]
    pub fn fanout_budget(mut self, budget: Duration) -> Self {
        self.config.fanout_budget = budget;
        self
    }

    #[must_use]
    pub fn max_concurrency(mut self, width: usize) -> Self {
        self.config.max_concurrency = width;
        self
    }

    #[must_use]
    pub fn min_content_length(mut self, length: usize) -> Self {
        self.config.min_content_length = length;
        self
    }

    #[must_use]
    pub fn scoring_timeout(mut self, timeout: Duration) -> Self {
        self.config.scoring_timeout = timeout;
        self
    }

    #[must_use]
    pub fn default_score(mut self, score: f64) -> Self {
        self.config.default_score = score;
        self
    }

    pub fn build(self) -> Result<RouterConfig, ConfigError> {
        self.validate()?;
        Ok(self.config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let config = &self.config;
        if config.fanout_budget.is_zero() {
            return Err(ConfigError::ValidationError(
                "fanout_budget must be greater than 0".to_string(),
            ));
        }
        if config.max_concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }
        if config.scoring_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "scoring_timeout must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&config.default_score) {
            return Err(ConfigError::ValidationError(format!(
                "default_score must be within 0-100, got {}",
                config.default_score
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder() {
        let config = RouterConfig::builder().build().unwrap();
        assert_eq!(config.fanout_budget, Duration::from_secs(60));
        assert_eq!(config.max_concurrency, 6);
        assert_eq!(config.min_content_length, 20);
        assert_eq!(config.default_score, 50.0);
    }

    #[test]
    fn test_builder_validation_budget() {
        let result = RouterConfig::builder().fanout_budget(Duration::ZERO).build();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_builder_validation_concurrency() {
        assert!(RouterConfig::builder().max_concurrency(0).build().is_err());
    }

    #[test]
    fn test_builder_validation_default_score() {
        assert!(RouterConfig::builder().default_score(101.0).build().is_err());
        assert!(RouterConfig::builder().default_score(f64::NAN).build().is_err());
        assert!(RouterConfig::builder().default_score(0.0).build().is_ok());
    }
}
