//! Routes each platform to the publisher that serves it.

use crate::ayrshare::AyrsharePublisher;
use crate::blogger::BloggerPublisher;
use crate::brevo::BrevoPublisher;
use crate::config::PublishConfig;
use crate::error::{PublishError, PublishResult};
use crate::publisher::Publisher;
use crate::types::{BatchReceipt, Media, PlatformOutcome, PublishReceipt, PublishRequest};
use async_trait::async_trait;
use automarketer_core::Platform;
use std::sync::Arc;
use tracing::warn;

/// Blog goes to Blogger, Email to Brevo, social platforms to Ayrshare.
///
/// Publishers are consulted in registration order; the first whose
/// [`supports`](Publisher::supports) accepts the platform handles it.
#[derive(Clone)]
pub struct PlatformPublisher {
    publishers: Vec<Arc<dyn Publisher>>,
}

impl std::fmt::Debug for PlatformPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformPublisher")
            .field(
                "publishers",
                &self.publishers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl PlatformPublisher {
    pub fn new(publishers: Vec<Arc<dyn Publisher>>) -> Self {
        Self { publishers }
    }

    pub fn from_config(config: &PublishConfig) -> PublishResult<Self> {
        Ok(Self::new(vec![
            Arc::new(BloggerPublisher::from_config(config)?),
            Arc::new(BrevoPublisher::from_config(config)?),
            Arc::new(AyrsharePublisher::from_config(config)?),
        ]))
    }

    pub fn route(&self, platform: &Platform) -> Option<&Arc<dyn Publisher>> {
        self.publishers.iter().find(|p| p.supports(platform))
    }

    /// Publish the same content to every platform in turn.
    pub async fn publish_many(
        &self,
        content: &str,
        platforms: &[Platform],
        media: &Media,
        title: Option<&str>,
    ) -> BatchReceipt {
        publish_many(self, content, platforms, media, title).await
    }
}

/// Publish `content` to each platform through `publisher`.
///
/// Each platform gets its own request; failures are recorded per platform
/// and do not stop the batch.
pub async fn publish_many(
    publisher: &dyn Publisher,
    content: &str,
    platforms: &[Platform],
    media: &Media,
    title: Option<&str>,
) -> BatchReceipt {
    let mut results = Vec::with_capacity(platforms.len());

    for platform in platforms {
        let mut request = PublishRequest::new(platform.clone(), content).with_media(media.clone());
        if let Some(title) = title {
            request = request.with_title(title);
        }

        match publisher.publish(&request).await {
            Ok(receipt) => results.push(PlatformOutcome {
                platform: platform.clone(),
                success: true,
                receipt: Some(receipt),
                error: None,
            }),
            Err(err) => {
                warn!(platform = %platform, error = %err, code = err.error_code(), "Publish failed");
                results.push(PlatformOutcome {
                    platform: platform.clone(),
                    success: false,
                    receipt: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    BatchReceipt {
        success: !results.is_empty() && succeeded == results.len(),
        message: format!("Posted to {succeeded} platforms"),
        results,
    }
}

#[async_trait]
impl Publisher for PlatformPublisher {
    fn name(&self) -> &'static str {
        "Platform"
    }

    fn supports(&self, platform: &Platform) -> bool {
        self.route(platform).is_some()
    }

    async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishReceipt> {
        if request.content.trim().is_empty() {
            return Err(PublishError::InvalidRequest("content is empty".to_string()));
        }
        let publisher = self
            .route(&request.platform)
            .ok_or_else(|| PublishError::UnsupportedPlatform(request.platform.clone()))?;
        publisher.publish(request).await
    }
}
