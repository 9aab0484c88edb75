//! Cohere `generate` adapter.

use crate::config::ProviderConfig;
use crate::http::{endpoint, non_empty, send_json};
use crate::provider::ContentProvider;
use async_trait::async_trait;
use automarketer_core::{CredentialSource, GenerationError, GenerationResult, ProviderKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone)]
pub struct CohereProvider {
    url: String,
    model: String,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialSource>,
}

impl CohereProvider {
    pub fn new(
        config: &ProviderConfig,
        client: reqwest::Client,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            url: endpoint(config.base_url(ProviderKind::Cohere), "v1/generate"),
            model: "command".to_string(),
            client,
            credentials,
        }
    }
}

#[async_trait]
impl ContentProvider for CohereProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Cohere
    }

    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        let api_key = self
            .credentials
            .api_key(ProviderKind::Cohere)
            .ok_or(GenerationError::MissingCredentials(ProviderKind::Cohere))?;

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            max_tokens: 300,
            temperature: 0.7,
        };

        let response: GenerateResponse = send_json(
            self.client
                .post(&self.url)
                .bearer_auth(api_key.expose_secret())
                .json(&body),
        )
        .await?;

        let text = response
            .generations
            .into_iter()
            .next()
            .map(|generation| generation.text)
            .unwrap_or_default();

        non_empty(&text)
    }
}
