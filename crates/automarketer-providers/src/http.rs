//! Shared HTTP plumbing for the adapters.

use automarketer_core::{GenerationError, GenerationResult};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Longest slice of an error body carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

pub(crate) fn build_client(timeout: Duration) -> GenerationResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("automarketer/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GenerationError::Connection(format!("Failed to create HTTP client: {e}")))
}

/// Send `request` and decode a JSON body of type `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> GenerationResult<T> {
    let response = request.send().await.map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(error_for_status(status, response).await);
    }

    response.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            transport_error(e)
        } else {
            GenerationError::InvalidResponse(format!("Failed to parse response: {e}"))
        }
    })
}

pub(crate) fn transport_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout(err.to_string())
    } else {
        GenerationError::Connection(err.to_string())
    }
}

async fn error_for_status(status: StatusCode, response: Response) -> GenerationError {
    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    debug!(status = status.as_u16(), body = %message, "Provider returned error status");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GenerationError::Authentication(format!("HTTP {status}: {message}"))
        }
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited(message),
        _ => GenerationError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Trim `text`, rejecting an empty result.
pub(crate) fn non_empty(text: &str) -> GenerationResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(GenerationError::EmptyContent)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("https://api.groq.com/", "/openai/v1/chat/completions"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(endpoint("http://localhost:9", "v1"), "http://localhost:9/v1");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  hello \n").unwrap(), "hello");
        assert!(matches!(non_empty(" \n "), Err(GenerationError::EmptyContent)));
    }
}
