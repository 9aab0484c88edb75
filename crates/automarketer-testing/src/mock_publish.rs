//! # Mock Publisher and Content Source
//!
//! Stand-ins for the publishing side and for the whole generation pipeline,
//! used to test the scheduler and the HTTP layer.

use async_trait::async_trait;
use automarketer_core::{
    ComparisonEntry, ContentSource, GenerationRequest, ModelSource, Platform, ProviderKind,
    ProviderResult, RankedOutcome, fallback,
};
use automarketer_publish::{PublishError, PublishReceipt, PublishRequest, PublishResult, Publisher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A publisher that records every request and accepts it unless told otherwise.
#[derive(Debug, Clone, Default)]
pub struct MockPublisher {
    failures: HashMap<Platform, PublishError>,
    default_failure: Option<PublishError>,
    published: Arc<Mutex<Vec<PublishRequest>>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every request with `error`.
    pub fn with_failure(mut self, error: PublishError) -> Self {
        self.default_failure = Some(error);
        self
    }

    /// Reject requests for `platform` with `error`.
    pub fn with_platform_failure(mut self, platform: Platform, error: PublishError) -> Self {
        self.failures.insert(platform, error);
        self
    }

    /// Requests received, oldest first.
    pub fn published(&self) -> Vec<PublishRequest> {
        self.published.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn reset(&self) {
        self.published.lock().unwrap().clear();
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn supports(&self, _platform: &Platform) -> bool {
        true
    }

    async fn publish(&self, request: &PublishRequest) -> PublishResult<PublishReceipt> {
        let index = {
            let mut published = self.published.lock().unwrap();
            published.push(request.clone());
            published.len()
        };

        if let Some(error) = self
            .failures
            .get(&request.platform)
            .or(self.default_failure.as_ref())
        {
            return Err(error.clone());
        }

        Ok(PublishReceipt {
            platform: request.platform.clone(),
            publisher: self.name().to_string(),
            post_id: Some(format!("mock-{index}")),
            url: Some(format!("https://mock.test/{}/{index}", request.platform.id())),
            scheduled_at: request.scheduled_at,
            details: serde_json::json!({ "status": "success" }),
        })
    }
}

/// A content source returning fixed text, or the template fallback when none is set.
#[derive(Debug, Clone, Default)]
pub struct MockContentSource {
    content: Option<(ProviderKind, String, f64)>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `text` from `kind`, scored `score`.
    pub fn with_content(mut self, kind: ProviderKind, text: impl Into<String>, score: f64) -> Self {
        self.content = Some((kind, text.into(), score));
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ContentSource for MockContentSource {
    async fn best_content(&self, request: &GenerationRequest) -> RankedOutcome {
        self.requests.lock().unwrap().push(request.clone());

        let best = match &self.content {
            Some((kind, text, score)) => ProviderResult::new(*kind, text.clone()).with_score(*score),
            None => fallback::generate(request),
        };
        let model: ModelSource = best.source;
        let score = best.effective_score();

        RankedOutcome {
            success: true,
            best_content: best.text.clone(),
            best_model: model,
            best_score: score,
            best_analysis: best.analysis.clone(),
            comparison: vec![ComparisonEntry { model, score }],
            all_results: vec![best],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automarketer_core::BusinessContext;

    #[tokio::test]
    async fn test_mock_publisher_records_and_fails() {
        let publisher = MockPublisher::new()
            .with_platform_failure(Platform::Email, PublishError::MissingRecipient);

        let receipt = publisher
            .publish(&PublishRequest::new(Platform::Twitter, "hello"))
            .await
            .unwrap();
        assert_eq!(receipt.post_id.as_deref(), Some("mock-1"));

        let err = publisher
            .publish(&PublishRequest::new(Platform::Email, "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::MissingRecipient));
        assert_eq!(publisher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_source_falls_back_to_template() {
        let source = MockContentSource::new();
        let request = GenerationRequest::new(Platform::LinkedIn, BusinessContext::new("Acme", "tech"));
        let outcome = source.best_content(&request).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.best_score, 60.0);
        assert_eq!(source.call_count(), 1);
    }
}
