//! Email through Brevo's transactional API.

use crate::config::{EmailSender, PublishConfig};
use crate::error::{PublishError, PublishResult};
use crate::http::{build_client, endpoint, send, to_html};
use crate::publisher::Publisher;
use crate::types::{PublishReceipt, PublishRequest};
use async_trait::async_trait;
use automarketer_core::{Platform, SecretString};
use serde_json::{json, Value};
use tracing::info;

pub const DEFAULT_SUBJECT: &str = "Marketing Update";

const NAME: &str = "Brevo";

#[derive(Debug, Clone)]
pub struct BrevoPublisher {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
    sender: EmailSender,
}

impl BrevoPublisher {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
        sender: EmailSender,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
            sender,
        }
    }

    pub fn from_config(config: &PublishConfig) -> PublishResult<Self> {
        Ok(Self::new(
            build_client(config.request_timeout)?,
            config.brevo_base_url.clone(),
            config.brevo_api_key.clone(),
            config.sender.clone(),
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    pub fn payload(&self, recipient: &str, request: &PublishRequest) -> Value {
        let subject = request
            .subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SUBJECT);
        json!({
            "sender": { "name": self.sender.name, "email": self.sender.address },
            "to": [{ "email": recipient }],
            "subject": subject,
            "htmlContent": format!("<html><body>{}</body></html>", to_html(&request.content)),
        })
    }
}

#[async_trait]
impl Publisher for BrevoPublisher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn supports(&self, platform: &Platform) -> bool {
        *platform == Platform::Email
    }

    async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishReceipt> {
        let api_key = match &self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(PublishError::NotConfigured(NAME)),
        };
        if request.scheduled_at.is_some() {
            return Err(PublishError::SchedulingUnsupported(NAME));
        }
        let recipient = request
            .recipient
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(PublishError::MissingRecipient)?;
        if !recipient.contains('@') {
            return Err(PublishError::InvalidRequest(format!(
                "'{recipient}' is not an email address"
            )));
        }

        let http_request = self
            .client
            .post(endpoint(&self.base_url, "smtp/email"))
            .header("api-key", api_key.expose_secret())
            .json(&self.payload(recipient, request));
        let body = send(http_request, NAME).await?;

        let message_id = body
            .get("messageId")
            .and_then(Value::as_str)
            .map(str::to_string);
        info!(message_id = message_id.as_deref().unwrap_or("-"), "Sent email campaign");

        Ok(PublishReceipt {
            platform: Platform::Email,
            publisher: NAME.to_string(),
            post_id: message_id,
            url: None,
            scheduled_at: None,
            details: body,
        })
    }
}
