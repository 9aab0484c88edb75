//! Blog posts through the Blogger v3 API.

use crate::config::PublishConfig;
use crate::error::{PublishError, PublishResult};
use crate::http::{build_client, endpoint, send, to_html};
use crate::publisher::Publisher;
use crate::types::{PublishReceipt, PublishRequest};
use async_trait::async_trait;
use automarketer_core::{Platform, SecretString};
use chrono::SecondsFormat;
use serde_json::{json, Value};
use tracing::info;

pub const DEFAULT_BLOG_TITLE: &str = "AutoMarketer Post";

const NAME: &str = "Blogger";

/// Post body as HTML, with the image (if any) leading.
pub fn blog_html(content: &str, image_url: Option<&str>) -> String {
    let html = to_html(content);
    match image_url {
        Some(url) => format!(
            r#"<img src="{url}" alt="Featured Image" style="max-width:100%"><br><br>{html}"#
        ),
        None => html,
    }
}

#[derive(Debug, Clone)]
pub struct BloggerPublisher {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
    blog_id: Option<String>,
}

impl BloggerPublisher {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
        blog_id: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
            blog_id,
        }
    }

    pub fn from_config(config: &PublishConfig) -> PublishResult<Self> {
        Ok(Self::new(
            build_client(config.request_timeout)?,
            config.blogger_base_url.clone(),
            config.google_api_key.clone(),
            config.blogger_blog_id.clone(),
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    fn credentials(&self) -> Option<(&SecretString, &str)> {
        match (&self.api_key, &self.blog_id) {
            (Some(key), Some(blog)) if !key.is_empty() && !blog.trim().is_empty() => {
                Some((key, blog.as_str()))
            }
            _ => None,
        }
    }
}

#[async_trait]
impl Publisher for BloggerPublisher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn supports(&self, platform: &Platform) -> bool {
        *platform == Platform::Blog
    }

    async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishReceipt> {
        let (api_key, blog_id) = self.credentials().ok_or(PublishError::NotConfigured(NAME))?;

        // Blogger has no notion of video; fall back to the image.
        let image = request.media.image_url.as_deref();
        let title = request
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_BLOG_TITLE);

        let mut payload = json!({
            "kind": "blogger#post",
            "blog": { "id": blog_id },
            "title": title,
            "content": blog_html(&request.content, image),
        });
        // A future `published` date makes Blogger hold the post until then.
        if let Some(at) = request.scheduled_at {
            payload["published"] = Value::String(at.to_rfc3339_opts(SecondsFormat::Secs, true));
        }

        let http_request = self
            .client
            .post(endpoint(
                &self.base_url,
                &format!("blogger/v3/blogs/{blog_id}/posts/"),
            ))
            .query(&[("key", api_key.expose_secret()), ("isDraft", "false")])
            .json(&payload);
        let body = send(http_request, NAME).await?;

        let post_id = body.get("id").and_then(Value::as_str).map(str::to_string);
        let url = body.get("url").and_then(Value::as_str).map(str::to_string);
        info!(post_id = post_id.as_deref().unwrap_or("-"), title, "Published blog post");

        Ok(PublishReceipt {
            platform: Platform::Blog,
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

    #[test]
    fn test_blog_html() {
        assert_eq!(blog_html("Hello\nWorld", None), "Hello<br>World");
        assert_eq!(
            blog_html("Hi", Some("https://img/x.png")),
            r#"<img src="https://img/x.png" alt="Featured Image" style="max-width:100%"><br><br>Hi"#
        );
    }

    #[tokio::test]
    async fn test_requires_both_key_and_blog() {
        let publisher = BloggerPublisher::new(
            reqwest::Client::new(),
            "http://localhost:1",
            Some("key".into()),
            None,
        );
        assert!(!publisher.is_configured());
        let err = publisher
            .publish(&PublishRequest::new(Platform::Blog, "post"))
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::NotConfigured("Blogger")));
    }
}
