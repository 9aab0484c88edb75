//! Google Gemini adapter (Generative Language REST API).
//!
//! Models are tried in order; the first one that returns text wins.

use crate::config::ProviderConfig;
use crate::http::{endpoint, non_empty, send_json};
use crate::provider::ContentProvider;
use async_trait::async_trait;
use automarketer_core::{CredentialSource, GenerationError, GenerationResult, ProviderKind};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_GEMINI_MODELS: [&str; 2] = ["gemini-1.5-flash", "gemini-2.0-flash"];

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    base_url: String,
    models: Vec<String>,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialSource>,
}

impl GeminiProvider {
    pub fn new(
        config: &ProviderConfig,
        client: reqwest::Client,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            base_url: config.base_url(ProviderKind::Gemini).to_string(),
            models: DEFAULT_GEMINI_MODELS.iter().map(|m| m.to_string()).collect(),
            client,
            credentials,
        }
    }

    #[must_use]
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    async fn complete_with_model(
        &self,
        model: &str,
        api_key: &str,
        prompt: &str,
    ) -> GenerationResult<String> {
        let url = endpoint(
            &self.base_url,
            &format!("v1beta/models/{model}:generateContent"),
        );
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let response: GenerateContentResponse = send_json(
            self.client
                .post(url)
                .query(&[("key", api_key)])
                .json(&body),
        )
        .await?;

        let parts = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .ok_or_else(|| GenerationError::InvalidResponse("missing candidates[0].content".into()))?
            .parts;

        let text: String = parts.into_iter().filter_map(|part| part.text).collect();
        non_empty(&text)
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        let api_key = self
            .credentials
            .api_key(ProviderKind::Gemini)
            .ok_or(GenerationError::MissingCredentials(ProviderKind::Gemini))?;

        let mut last_error = GenerationError::InvalidResponse("no Gemini models configured".into());
        for model in &self.models {
            match self
                .complete_with_model(model, api_key.expose_secret(), prompt)
                .await
            {
                Ok(text) => return Ok(text),
                Err(e) => {
                    debug!(model = %model, error = %e, "Gemini model failed, trying next");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}
