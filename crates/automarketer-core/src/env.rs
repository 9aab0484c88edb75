//! Typed environment variable helpers shared by every config builder.
//!
//! Each helper returns `Ok(None)` when the variable is unset, and
//! [`ConfigError::InvalidEnvVar`] when it is set to something unparsable.
//! Durations use `humantime` syntax (`30s`, `1m 30s`, `500ms`).

use std::{env, time::Duration};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Non-empty string value.
pub fn get_env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.trim().is_empty())
}

pub fn get_env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(val) => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!(
                    "invalid boolean value '{val}', expected true/false/1/0/yes/no/on/off"
                ),
            }),
        },
        Err(_) => Ok(None),
    }
}

pub fn get_env_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid usize value '{val}': {e}"),
            }),
        Err(_) => Ok(None),
    }
}

pub fn get_env_f64(key: &str) -> Result<Option<f64>, ConfigError> {
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid f64 value '{val}': {e}"),
            }),
        Err(_) => Ok(None),
    }
}

pub fn get_env_duration(key: &str) -> Result<Option<Duration>, ConfigError> {
    match env::var(key) {
        Ok(val) => humantime::parse_duration(val.trim())
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid duration '{val}': {e}"),
            }),
        Err(_) => Ok(None),
    }
}
