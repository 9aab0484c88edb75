//! HuggingFace Inference API adapter.
//!
//! Text-generation models often echo the prompt before the completion; the
//! echo is stripped so only generated text remains.

use crate::config::ProviderConfig;
use crate::http::{endpoint, non_empty, send_json};
use crate::provider::ContentProvider;
use async_trait::async_trait;
use automarketer_core::{CredentialSource, GenerationError, GenerationResult, ProviderKind};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_HUGGINGFACE_MODELS: [&str; 2] = [
    "google/gemma-1.1-7b-it",
    "mistralai/Mistral-7B-Instruct-v0.1",
];

const MAX_NEW_TOKENS: u32 = 300;

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: String,
}

#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    base_url: String,
    models: Vec<String>,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialSource>,
}

impl HuggingFaceProvider {
    pub fn new(
        config: &ProviderConfig,
        client: reqwest::Client,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            base_url: config.base_url(ProviderKind::HuggingFace).to_string(),
            models: DEFAULT_HUGGINGFACE_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
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

    async fn complete_with_model(
        &self,
        model: &str,
        api_key: &str,
        prompt: &str,
    ) -> GenerationResult<String> {
        let url = endpoint(&self.base_url, &format!("models/{model}"));
        let body = json!({
            "inputs": prompt,
            "parameters": { "max_new_tokens": MAX_NEW_TOKENS },
        });

        let generations: Vec<Generation> =
            send_json(self.client.post(url).bearer_auth(api_key).json(&body)).await?;

        let generated = generations
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::InvalidResponse("empty generation list".into()))?
            .generated_text;

        non_empty(strip_prompt_echo(&generated, prompt))
    }
}

/// Keep only what follows the last occurrence of `prompt` in `text`.
pub fn strip_prompt_echo<'a>(text: &'a str, prompt: &str) -> &'a str {
    match text.rfind(prompt) {
        Some(index) if !prompt.is_empty() => &text[index + prompt.len()..],
        _ => text,
    }
}

#[async_trait]
impl ContentProvider for HuggingFaceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        let api_key = self
            .credentials
            .api_key(ProviderKind::HuggingFace)
            .ok_or(GenerationError::MissingCredentials(ProviderKind::HuggingFace))?;

        let mut last_error =
            GenerationError::InvalidResponse("no HuggingFace models configured".into());
        for model in &self.models {
            match self
                .complete_with_model(model, api_key.expose_secret(), prompt)
                .await
            {
                Ok(text) => return Ok(text),
                Err(e) => {
                    debug!(model = %model, error = %e, "HuggingFace model failed, trying next");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}
