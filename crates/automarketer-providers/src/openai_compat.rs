//! Adapter for services that speak the OpenAI chat-completions format
//! (Groq, Together, OpenRouter).

use crate::config::ProviderConfig;
use crate::http::{endpoint, non_empty, send_json};
use crate::provider::ContentProvider;
use async_trait::async_trait;
use automarketer_core::{CredentialSource, GenerationError, GenerationResult, ProviderKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    kind: ProviderKind,
    url: String,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialSource>,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        kind: ProviderKind,
        url: impl Into<String>,
        model: impl Into<String>,
        client: reqwest::Client,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            kind,
            url: url.into(),
            model: model.into(),
            max_tokens: 300,
            temperature: Some(0.7),
            client,
            credentials,
        }
    }

    /// Groq running `llama-3.1-70b-versatile`.
    pub fn groq(
        config: &ProviderConfig,
        client: reqwest::Client,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self::new(
            ProviderKind::Groq,
            endpoint(
                config.base_url(ProviderKind::Groq),
                "openai/v1/chat/completions",
            ),
            "llama-3.1-70b-versatile",
            client,
            credentials,
        )
    }

    /// Together running `Llama-3-70b-chat-hf`.
    pub fn together(
        config: &ProviderConfig,
        client: reqwest::Client,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self::new(
            ProviderKind::Together,
            endpoint(config.base_url(ProviderKind::Together), "v1/chat/completions"),
            "meta-llama/Llama-3-70b-chat-hf",
            client,
            credentials,
        )
    }

    /// OpenRouter's free Llama 3.1 8B route. Sent without a temperature.
    pub fn openrouter(
        config: &ProviderConfig,
        client: reqwest::Client,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self::new(
            ProviderKind::OpenRouter,
            endpoint(
                config.base_url(ProviderKind::OpenRouter),
                "api/v1/chat/completions",
            ),
            "meta-llama/llama-3.1-8b-instruct:free",
            client,
            credentials,
        )
        .with_temperature(None)
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ContentProvider for OpenAiCompatibleProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        let api_key = self
            .credentials
            .api_key(self.kind)
            .ok_or(GenerationError::MissingCredentials(self.kind))?;

        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(provider = %self.kind, model = %self.model, "Sending chat completion");

        let response: ChatResponse = send_json(
            self.client
                .post(&self.url)
                .bearer_auth(api_key.expose_secret())
                .json(&body),
        )
        .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::InvalidResponse("missing choices[0].message.content".into()))?;

        non_empty(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automarketer_core::StaticCredentials;

    #[test]
    fn test_constructors() {
        let config = ProviderConfig::default();
        let client = reqwest::Client::new();
        let creds: Arc<dyn CredentialSource> = Arc::new(StaticCredentials::new());

        let groq = OpenAiCompatibleProvider::groq(&config, client.clone(), creds.clone());
        assert_eq!(groq.kind(), ProviderKind::Groq);
        assert_eq!(groq.url, "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(groq.temperature, Some(0.7));

        let router = OpenAiCompatibleProvider::openrouter(&config, client, creds);
        assert_eq!(router.model(), "meta-llama/llama-3.1-8b-instruct:free");
        assert_eq!(router.temperature, None);
    }

    #[tokio::test]
    async fn test_missing_credentials_fails_without_request() {
        let provider = OpenAiCompatibleProvider::together(
            &ProviderConfig::default(),
            reqwest::Client::new(),
            Arc::new(StaticCredentials::new()),
        );
        let err = provider.complete("hi").await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::MissingCredentials(ProviderKind::Together)
        ));
    }
}
