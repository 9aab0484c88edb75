//! Error types for building the router.
//!
//! Running the pipeline never fails; these errors only come from
//! configuration and adapter construction.

use automarketer_core::{ConfigError, GenerationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider setup failed: {0}")]
    ProviderSetup(#[from] GenerationError),
}

impl RouterError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RouterError::Config(_) => "CONFIG_ERROR",
            RouterError::ProviderSetup(_) => "PROVIDER_SETUP_FAILED",
        }
    }
}

pub type RouterResult<T> = Result<T, RouterError>;
