//! Error types for publishing and scheduling.

use automarketer_core::{ConfigError, Platform};
use thiserror::Error;

/// Errors returned by a [`Publisher`](crate::Publisher).
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// The publisher's credentials are absent.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// No publisher handles this platform.
    #[error("Publishing to '{0}' is not supported")]
    UnsupportedPlatform(Platform),

    /// Email publishing needs somebody to send to.
    #[error("Email requires a recipient")]
    MissingRecipient,

    #[error("Invalid publish request: {0}")]
    InvalidRequest(String),

    /// The publisher can only deliver immediately.
    #[error("{0} cannot schedule posts")]
    SchedulingUnsupported(&'static str),

    /// The remote service answered with a failure.
    #[error("{publisher} rejected the post ({status}): {message}")]
    Rejected {
        publisher: &'static str,
        status: u16,
        message: String,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout: {0}")]
    Timeout(String),
}

impl PublishError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, PublishError::Connection(_) | PublishError::Timeout(_))
            || matches!(self, PublishError::Rejected { status, .. } if *status == 429 || *status >= 500)
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PublishError::NotConfigured(_) => "NOT_CONFIGURED",
            PublishError::UnsupportedPlatform(_) => "UNSUPPORTED_PLATFORM",
            PublishError::MissingRecipient => "MISSING_RECIPIENT",
            PublishError::InvalidRequest(_) => "INVALID_REQUEST",
            PublishError::SchedulingUnsupported(_) => "SCHEDULING_UNSUPPORTED",
            PublishError::Rejected { .. } => "PUBLISH_REJECTED",
            PublishError::Connection(_) => "CONNECTION_ERROR",
            PublishError::Timeout(_) => "TIMEOUT",
        }
    }
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PublishError::Timeout(err.to_string())
        } else {
            PublishError::Connection(err.to_string())
        }
    }
}

pub type PublishResult<T> = Result<T, PublishError>;

/// Errors from the peak-hour table and the post scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Auto-posting is already running")]
    AlreadyRunning,

    #[error("Auto-posting is not running")]
    NotRunning,

    #[error("Invalid peak hour {0}: must be between 0 and 23")]
    InvalidHour(u32),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Failed to persist peak hours: {0}")]
    Persistence(String),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SchedulerError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SchedulerError::AlreadyRunning => "ALREADY_RUNNING",
            SchedulerError::NotRunning => "NOT_RUNNING",
            SchedulerError::InvalidHour(_) => "INVALID_HOUR",
            SchedulerError::InvalidSchedule(_) => "INVALID_SCHEDULE",
            SchedulerError::Persistence(_) => "PERSISTENCE_ERROR",
            SchedulerError::Publish(err) => err.error_code(),
            SchedulerError::Config(_) => "CONFIG_ERROR",
        }
    }
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            PublishError::NotConfigured("Ayrshare").to_string(),
            "Ayrshare is not configured"
        );
        assert_eq!(
            PublishError::UnsupportedPlatform(Platform::Other("myspace".into())).to_string(),
            "Publishing to 'myspace' is not supported"
        );
        assert_eq!(
            PublishError::SchedulingUnsupported("Brevo").to_string(),
            "Brevo cannot schedule posts"
        );
        assert_eq!(
            SchedulerError::InvalidHour(24).to_string(),
            "Invalid peak hour 24: must be between 0 and 23"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(PublishError::Timeout("slow".into()).is_retryable());
        assert!(
            PublishError::Rejected {
                publisher: "Ayrshare",
                status: 503,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(
            !PublishError::Rejected {
                publisher: "Ayrshare",
                status: 400,
                message: String::new()
            }
            .is_retryable()
        );
        assert!(!PublishError::MissingRecipient.is_retryable());
    }

    #[test]
    fn test_scheduler_code_delegates_to_publish() {
        let err = SchedulerError::from(PublishError::NotConfigured("Brevo"));
        assert_eq!(err.error_code(), "NOT_CONFIGURED");
        assert_eq!(SchedulerError::AlreadyRunning.error_code(), "ALREADY_RUNNING");
    }
}
