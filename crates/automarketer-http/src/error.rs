//! API errors and their JSON rendering.
//!
//! Every failure leaves the server as
//! `{"error": "<snake_case code>", "message": "...", "timestamp": "..."}`.

use automarketer_core::ConfigError;
use automarketer_publish::{PublishError, SchedulerError};
use automarketer_router::RouterError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Publish(err) => publish_status(err),
            ApiError::Scheduler(err) => match err {
                SchedulerError::AlreadyRunning | SchedulerError::NotRunning => StatusCode::CONFLICT,
                SchedulerError::InvalidHour(_) | SchedulerError::InvalidSchedule(_) => {
                    StatusCode::BAD_REQUEST
                }
                SchedulerError::Publish(inner) => publish_status(inner),
                SchedulerError::Persistence(_) | SchedulerError::Config(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Snake-case code for the response body.
    pub fn error_code(&self) -> String {
        match self {
            ApiError::InvalidInput(_) => "invalid_input".to_string(),
            ApiError::Publish(err) => err.error_code().to_lowercase(),
            ApiError::Scheduler(err) => err.error_code().to_lowercase(),
            ApiError::Internal(_) => "internal_error".to_string(),
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_code(),
            message: self.to_string(),
            timestamp: Utc::now(),
        }
    }
}

fn publish_status(err: &PublishError) -> StatusCode {
    match err {
        PublishError::UnsupportedPlatform(_)
        | PublishError::MissingRecipient
        | PublishError::InvalidRequest(_)
        | PublishError::SchedulingUnsupported(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error_code = %self.error_code(), status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(error_code = %self.error_code(), status = %status, error = %self, "Request rejected");
        }
        (status, Json(self.to_error_response())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while assembling or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use automarketer_core::Platform;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::invalid("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(SchedulerError::AlreadyRunning).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(SchedulerError::InvalidHour(30)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(PublishError::NotConfigured("Ayrshare")).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(PublishError::UnsupportedPlatform(Platform::Other("fax".into())))
                .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(PublishError::SchedulingUnsupported("Brevo")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(SchedulerError::Persistence("disk full".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_codes_are_snake_case() {
        assert_eq!(
            ApiError::from(SchedulerError::NotRunning).error_code(),
            "not_running"
        );
        assert_eq!(
            ApiError::from(PublishError::MissingRecipient).error_code(),
            "missing_recipient"
        );
        assert_eq!(ApiError::Internal("x".into()).error_code(), "internal_error");
    }
}
