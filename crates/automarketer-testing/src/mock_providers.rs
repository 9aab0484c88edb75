//! # Mock Providers and Analyzers
//!
//! Predictable [`ContentProvider`] and [`ViralityAnalyzer`] implementations
//! for exercising the fan-out, scoring and selection stages without a network.

use async_trait::async_trait;
use automarketer_core::{GenerationError, GenerationResult, ProviderKind};
use automarketer_providers::{Analysis, ContentProvider, ViralityAnalyzer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Behavior {
    Respond(String),
    Fail(GenerationError),
    Panic(String),
    Hang,
}

/// A provider that answers every prompt the same way.
#[derive(Debug, Clone)]
pub struct MockProvider {
    kind: ProviderKind,
    behavior: Behavior,
    delay: Option<Duration>,
    call_count: Arc<Mutex<usize>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a mock for `kind` that returns a usable post.
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            behavior: Behavior::Respond(format!(
                "Mock marketing content from {kind} ready to publish"
            )),
            delay: None,
            call_count: Arc::new(Mutex::new(0)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return `text` verbatim.
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.behavior = Behavior::Respond(text.into());
        self
    }

    pub fn with_failure(mut self, error: GenerationError) -> Self {
        self.behavior = Behavior::Fail(error);
        self
    }

    /// Panic with `message` when called.
    pub fn with_panic(mut self, message: impl Into<String>) -> Self {
        self.behavior = Behavior::Panic(message.into());
        self
    }

    /// Never return.
    pub fn never_completes(mut self) -> Self {
        self.behavior = Behavior::Hang;
        self
    }

    /// Sleep on the tokio clock before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received, oldest first.
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        *self.call_count.lock().unwrap() = 0;
        self.call_history.lock().unwrap().clear();
    }

    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        *self.call_count.lock().unwrap() += 1;
        self.call_history.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Respond(text) => Ok(text.clone()),
            Behavior::Fail(error) => Err(error.clone()),
            Behavior::Panic(message) => panic!("{message}"),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

/// An analyzer with per-text scores and a default verdict.
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    verdicts: HashMap<String, Analysis>,
    default: Result<Analysis, GenerationError>,
    delay: Option<Duration>,
    call_count: Arc<Mutex<usize>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalyzer {
    /// Scores everything 50.
    pub fn new() -> Self {
        Self {
            verdicts: HashMap::new(),
            default: Ok(Analysis::new(50.0)),
            delay: None,
            call_count: Arc::new(Mutex::new(0)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Score for any text without its own verdict. Not validated.
    pub fn with_default_score(mut self, score: f64) -> Self {
        self.default = Ok(Analysis::new(score));
        self
    }

    pub fn with_score(mut self, text: impl Into<String>, score: f64) -> Self {
        self.verdicts.insert(text.into(), Analysis::new(score));
        self
    }

    pub fn with_analysis(mut self, text: impl Into<String>, analysis: Analysis) -> Self {
        self.verdicts.insert(text.into(), analysis);
        self
    }

    /// Fail for any text without its own verdict.
    pub fn with_failure(mut self, error: GenerationError) -> Self {
        self.default = Err(error);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Texts analyzed, oldest first.
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn was_called_with(&self, text: &str) -> bool {
        self.call_history.lock().unwrap().iter().any(|t| t == text)
    }
}

#[async_trait]
impl ViralityAnalyzer for MockAnalyzer {
    async fn analyze(&self, text: &str) -> GenerationResult<Analysis> {
        *self.call_count.lock().unwrap() += 1;
        self.call_history.lock().unwrap().push(text.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.verdicts.get(text) {
            Some(analysis) => Ok(analysis.clone()),
            None => self.default.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automarketer_core::{BusinessContext, GenerationRequest, Platform};

    #[tokio::test]
    async fn test_mock_provider_tracks_prompts() {
        let provider = MockProvider::new(ProviderKind::Cohere).with_response("Hello from the mock");
        let request = GenerationRequest::new(Platform::Blog, BusinessContext::new("Acme", "tech"));

        let text = provider.generate(&request).await.unwrap();
        assert_eq!(text, "Hello from the mock");
        assert_eq!(provider.call_count(), 1);
        assert!(provider.call_history()[0].contains("Acme"));

        provider.reset();
        assert!(!provider.was_called());
    }

    #[tokio::test]
    async fn test_mock_provider_failure() {
        let provider = MockProvider::new(ProviderKind::Groq).with_failure(GenerationError::EmptyContent);
        assert!(matches!(
            provider.complete("x").await,
            Err(GenerationError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_mock_analyzer_verdicts() {
        let analyzer = MockAnalyzer::new().with_score("good", 91.0);
        assert_eq!(analyzer.analyze("good").await.unwrap().score, Some(91.0));
        assert_eq!(analyzer.analyze("other").await.unwrap().score, Some(50.0));
        assert!(analyzer.was_called_with("other"));
        assert_eq!(analyzer.call_count(), 2);
    }
}
