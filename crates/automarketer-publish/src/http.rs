//! Shared HTTP plumbing for the publishers.

use crate::error::{PublishError, PublishResult};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const MAX_ERROR_BODY_CHARS: usize = 200;

pub(crate) fn build_client(timeout: Duration) -> PublishResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(format!("automarketer/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PublishError::Connection(format!("Failed to create HTTP client: {e}")))
}

/// Send `request` and return its JSON body. Only 200 and 201 count as success.
pub(crate) async fn send(request: RequestBuilder, publisher: &'static str) -> PublishResult<Value> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

    if matches!(status, StatusCode::OK | StatusCode::CREATED) {
        return Ok(body);
    }

    let message = error_message(&body);
    debug!(publisher, status = status.as_u16(), %message, "Publisher returned error status");
    Err(PublishError::Rejected {
        publisher,
        status: status.as_u16(),
        message,
    })
}

/// `message`, then `error.message`, then the raw body.
fn error_message(body: &Value) -> String {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(message) = body.pointer("/error/message").and_then(Value::as_str) {
        return message.to_string();
    }
    let raw = match body {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    raw.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Newlines to `<br>`.
pub(crate) fn to_html(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_sources() {
        assert_eq!(error_message(&json!({"message": "bad key"})), "bad key");
        assert_eq!(
            error_message(&json!({"error": {"message": "quota"}})),
            "quota"
        );
        assert_eq!(error_message(&Value::String("oops".into())), "oops");
    }

    #[test]
    fn test_to_html() {
        assert_eq!(to_html("a\nb\r\nc"), "a<br>b<br>c");
    }
}
