//! Publish requests and receipts.

use automarketer_core::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media attached to a post. A video takes priority over an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl Media {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            video_url: None,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            image_url: None,
            video_url: Some(url.into()),
        }
    }

    /// The URL to attach and whether it is a video.
    pub fn primary(&self) -> Option<(&str, bool)> {
        match (&self.video_url, &self.image_url) {
            (Some(video), _) => Some((video.as_str(), true)),
            (None, Some(image)) => Some((image.as_str(), false)),
            (None, None) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image_url.is_none() && self.video_url.is_none()
    }
}

/// One piece of content bound for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub platform: Platform,
    pub content: String,
    #[serde(default)]
    pub media: Media,
    /// Blog post title.
    #[serde(default)]
    pub title: Option<String>,
    /// Email subject.
    #[serde(default)]
    pub subject: Option<String>,
    /// Email recipient address.
    #[serde(default)]
    pub recipient: Option<String>,
    /// Publish at this time instead of immediately, where supported.
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl PublishRequest {
    pub fn new(platform: Platform, content: impl Into<String>) -> Self {
        Self {
            platform,
            content: content.into(),
            media: Media::default(),
            title: None,
            subject: None,
            recipient: None,
            scheduled_at: None,
        }
    }

    #[must_use]
    pub fn with_media(mut self, media: Media) -> Self {
        self.media = media;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    #[must_use]
    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(at);
        self
    }
}

/// What a successful publish returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub platform: Platform,
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Raw response body from the service.
    #[serde(default)]
    pub details: Value,
}

/// The result of publishing to one platform as part of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformOutcome {
    pub platform: Platform,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<PublishReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated result of publishing to several platforms.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReceipt {
    /// True when every platform succeeded.
    pub success: bool,
    pub message: String,
    pub results: Vec<PlatformOutcome>,
}

impl BatchReceipt {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_takes_priority() {
        let media = Media {
            image_url: Some("https://img".into()),
            video_url: Some("https://vid".into()),
        };
        assert_eq!(media.primary(), Some(("https://vid", true)));
        assert_eq!(Media::image("https://img").primary(), Some(("https://img", false)));
        assert_eq!(Media::default().primary(), None);
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: PublishRequest =
            serde_json::from_str(r#"{"platform":"LinkedIn","content":"Hello"}"#).unwrap();
        assert_eq!(request.platform, Platform::LinkedIn);
        assert!(request.media.is_empty());
        assert!(request.recipient.is_none());
    }
}
