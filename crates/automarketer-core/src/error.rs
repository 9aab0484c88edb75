//! Error types for provider adapters and analyzers.
//!
//! None of these errors reach the caller of the pipeline: the fan-out stage
//! logs them and drops the failing provider, and the scoring stage replaces
//! them with the default score.

use crate::types::ProviderKind;
use thiserror::Error;

/// Errors that can occur when calling an external text-generation service.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// No API key is configured for the provider.
    #[error("No credentials configured for {0}")]
    MissingCredentials(ProviderKind),

    /// Network or transport failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The provider did not answer within its request timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The provider rejected the credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The provider is throttling requests.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Non-success status not covered by a more specific variant.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded or lacked the expected fields.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider answered with no text.
    #[error("Provider returned empty content")]
    EmptyContent,

    /// The provider answered with text too short to use.
    #[error("Content too short: {length} characters (must exceed {minimum})")]
    ContentTooShort { length: usize, minimum: usize },
}

impl GenerationError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::Connection(_)
                | GenerationError::Timeout(_)
                | GenerationError::RateLimited(_)
        ) || matches!(self, GenerationError::Api { status, .. } if *status >= 500)
    }

    /// Get the error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            GenerationError::MissingCredentials(_) => "MISSING_CREDENTIALS",
            GenerationError::Connection(_) => "CONNECTION_ERROR",
            GenerationError::Timeout(_) => "TIMEOUT",
            GenerationError::Authentication(_) => "AUTHENTICATION_FAILED",
            GenerationError::RateLimited(_) => "RATE_LIMITED",
            GenerationError::Api { .. } => "API_ERROR",
            GenerationError::InvalidResponse(_) => "INVALID_RESPONSE",
            GenerationError::EmptyContent => "EMPTY_CONTENT",
            GenerationError::ContentTooShort { .. } => "CONTENT_TOO_SHORT",
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::InvalidResponse(err.to_string())
    }
}

/// Result type for provider operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
