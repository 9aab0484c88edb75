//! Social platforms through Ayrshare.

use crate::config::PublishConfig;
use crate::error::{PublishError, PublishResult};
use crate::http::{build_client, endpoint, send};
use crate::publisher::Publisher;
use crate::types::{PublishReceipt, PublishRequest};
use async_trait::async_trait;
use automarketer_core::{Platform, SecretString};
use serde_json::{json, Map, Value};
use tracing::info;

/// Ayrshare's free plan prefixes every post, leaving this much room on Twitter.
pub const AYRSHARE_TWITTER_LIMIT: usize = 250;

const NAME: &str = "Ayrshare";

/// Cut Twitter content to fit under the free-plan prefix.
pub fn fit_for_ayrshare(content: &str, platform: &Platform) -> String {
    if *platform != Platform::Twitter || content.chars().count() <= AYRSHARE_TWITTER_LIMIT {
        return content.to_string();
    }
    let kept: String = content.chars().take(AYRSHARE_TWITTER_LIMIT - 3).collect();
    format!("{kept}...")
}

#[derive(Debug, Clone)]
pub struct AyrsharePublisher {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl AyrsharePublisher {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &PublishConfig) -> PublishResult<Self> {
        Ok(Self::new(
            build_client(config.request_timeout)?,
            config.ayrshare_base_url.clone(),
            config.ayrshare_api_key.clone(),
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// JSON body for `request`.
    pub fn payload(request: &PublishRequest) -> Value {
        let mut body = Map::new();
        body.insert(
            "post".into(),
            json!(fit_for_ayrshare(&request.content, &request.platform)),
        );
        body.insert("platforms".into(), json!([request.platform.id()]));
        if let Some((url, is_video)) = request.media.primary() {
            body.insert("mediaUrls".into(), json!([url]));
            if is_video {
                body.insert("isVideo".into(), json!(true));
            }
        }
        if let Some(at) = request.scheduled_at {
            body.insert(
                "scheduledDate".into(),
                json!(at.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            );
        }
        Value::Object(body)
    }
}

#[async_trait]
impl Publisher for AyrsharePublisher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn supports(&self, platform: &Platform) -> bool {
        matches!(
            platform,
            Platform::Twitter
                | Platform::LinkedIn
                | Platform::Instagram
                | Platform::Facebook
                | Platform::TikTok
        )
    }

    async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishReceipt> {
        let api_key = match &self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(PublishError::NotConfigured(NAME)),
        };
        if !self.supports(&request.platform) {
            return Err(PublishError::UnsupportedPlatform(request.platform.clone()));
        }

        let http_request = self
            .client
            .post(endpoint(&self.base_url, "post"))
            .bearer_auth(api_key.expose_secret())
            .json(&Self::payload(request));
        let body = send(http_request, NAME).await?;

        let post_id = body.get("id").and_then(Value::as_str).map(str::to_string);
        let url = body
            .pointer("/postIds/0/postUrl")
            .and_then(Value::as_str)
            .map(str::to_string);

        info!(
            platform = %request.platform,
            post_id = post_id.as_deref().unwrap_or("-"),
            scheduled = request.scheduled_at.is_some(),
            "Published via Ayrshare"
        );

        Ok(PublishReceipt {
            platform: request.platform.clone(),
            publisher: NAME.to_string(),
            post_id,
            url,
            scheduled_at: request.scheduled_at,
            details: body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Media;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_twitter_cut_to_250() {
        let long = "a".repeat(300);
        let fitted = fit_for_ayrshare(&long, &Platform::Twitter);
        assert_eq!(fitted.chars().count(), 250);
        assert!(fitted.ends_with("..."));

        let exact = "b".repeat(250);
        assert_eq!(fit_for_ayrshare(&exact, &Platform::Twitter), exact);
    }

    #[test]
    fn test_other_platforms_untouched() {
        let long = "a".repeat(300);
        assert_eq!(fit_for_ayrshare(&long, &Platform::LinkedIn), long);
    }

    #[test]
    fn test_payload_shape() {
        let request = PublishRequest::new(Platform::Instagram, "Sunny days ahead")
            .with_media(Media {
                image_url: Some("https://img/a.png".into()),
                video_url: Some("https://vid/a.mp4".into()),
            })
            .scheduled_at(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap());

        let payload = AyrsharePublisher::payload(&request);
        assert_eq!(payload["post"], "Sunny days ahead");
        assert_eq!(payload["platforms"], json!(["instagram"]));
        assert_eq!(payload["mediaUrls"], json!(["https://vid/a.mp4"]));
        assert_eq!(payload["isVideo"], true);
        assert_eq!(payload["scheduledDate"], "2026-03-01T09:00:00Z");
    }

    #[test]
    fn test_payload_without_media_omits_fields() {
        let payload = AyrsharePublisher::payload(&PublishRequest::new(Platform::Twitter, "hi"));
        assert!(payload.get("mediaUrls").is_none());
        assert!(payload.get("isVideo").is_none());
        assert!(payload.get("scheduledDate").is_none());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let publisher = AyrsharePublisher::new(reqwest::Client::new(), "http://localhost:1", None);
        let err = publisher
            .publish(&PublishRequest::new(Platform::Twitter, "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::NotConfigured("Ayrshare")));
    }
}
