//! Virality analysis: the external scoring call used to rank results.

use crate::config::ProviderConfig;
use crate::gemini::GeminiProvider;
use crate::http::build_client;
use crate::huggingface::HuggingFaceProvider;
use crate::openai_compat::OpenAiCompatibleProvider;
use crate::provider::ContentProvider;
use async_trait::async_trait;
use automarketer_core::{CredentialSource, GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Verdict returned by an analyzer.
///
/// `score` is `None` when the verdict had no numeric score; the scorer then
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub score: Option<f64>,
    pub rationale: Value,
}

impl Analysis {
    pub fn new(score: f64) -> Self {
        Self {
            score: Some(score),
            rationale: serde_json::json!({ "score": score }),
        }
    }

    /// Read the `score` field of a JSON verdict. Numeric strings are accepted.
    pub fn from_value(value: Value) -> Self {
        let score = match value.get("score") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Self {
            score,
            rationale: value,
        }
    }
}

/// Scores a piece of generated text.
#[async_trait]
pub trait ViralityAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> GenerationResult<Analysis>;
}

/// The substring between the first `{` and the last `}` inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn analysis_prompt(content: &str) -> String {
    format!(
        "Analyze this post for psychological triggers (e.g., social proof, curiosity, urgency).\n\
         Content: \"{content}\"\n\n\
         Provide a \"Virality Score\" (1-100) and 3 tips for maximum impact.\n\
         Return as JSON: {{\"score\": 85, \"triggers\": [\"...\", \"...\"], \
         \"recommendations\": [\"...\", \"...\", \"...\"], \"rewritten_content\": \"...\"}}"
    )
}

/// Asks a chain of providers for a JSON verdict; the first parsable answer wins.
pub struct LlmViralityAnalyzer {
    chain: Vec<Arc<dyn ContentProvider>>,
}

impl LlmViralityAnalyzer {
    pub fn new(chain: Vec<Arc<dyn ContentProvider>>) -> Self {
        Self { chain }
    }

    /// Groq's small instant model first, then Gemini, then HuggingFace.
    pub fn from_config(
        config: &ProviderConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> GenerationResult<Self> {
        let client = build_client(config.request_timeout)?;
        let chain: Vec<Arc<dyn ContentProvider>> = vec![
            Arc::new(
                OpenAiCompatibleProvider::groq(config, client.clone(), credentials.clone())
                    .with_model("llama-3.1-8b-instant")
                    .with_max_tokens(2000),
            ),
            Arc::new(GeminiProvider::new(config, client.clone(), credentials.clone())),
            Arc::new(HuggingFaceProvider::new(config, client, credentials)),
        ];
        Ok(Self::new(chain))
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

#[async_trait]
impl ViralityAnalyzer for LlmViralityAnalyzer {
    async fn analyze(&self, text: &str) -> GenerationResult<Analysis> {
        let prompt = analysis_prompt(text);
        let mut last_error = GenerationError::InvalidResponse("no analysis providers".into());

        for provider in &self.chain {
            let outcome = provider.complete(&prompt).await.and_then(|reply| {
                let json = extract_json_object(&reply).ok_or_else(|| {
                    GenerationError::InvalidResponse("no JSON object in reply".into())
                })?;
                Ok(serde_json::from_str::<Value>(json)?)
            });

            match outcome {
                Ok(value) => {
                    debug!(provider = %provider.kind(), "Virality analysis succeeded");
                    return Ok(Analysis::from_value(value));
                }
                Err(e) => {
                    debug!(provider = %provider.kind(), error = %e, "Virality analysis failed");
                    last_error = e;
                }
            }
        }

        warn!(error = %last_error, "All virality analysis providers failed");
        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_json_object() {
        assert_eq!(
            extract_json_object("Sure! {\"score\": 80} Hope this helps"),
            Some("{\"score\": 80}")
        );
        assert_eq!(
            extract_json_object("{\"a\": {\"b\": 1}}"),
            Some("{\"a\": {\"b\": 1}}")
        );
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_analysis_from_value() {
        assert_eq!(Analysis::from_value(json!({"score": 72})).score, Some(72.0));
        assert_eq!(Analysis::from_value(json!({"score": " 64.5"})).score, Some(64.5));
        assert_eq!(Analysis::from_value(json!({"score": "high"})).score, None);
        assert_eq!(Analysis::from_value(json!({"triggers": []})).score, None);
    }

    #[test]
    fn test_prompt_mentions_content() {
        let prompt = analysis_prompt("Buy now!");
        assert!(prompt.contains("Content: \"Buy now!\""));
        assert!(prompt.contains("\"rewritten_content\""));
    }
}
