//! Provider registry: one adapter per [`ProviderKind`], kept in declaration
//! order.

use crate::cohere::CohereProvider;
use crate::config::ProviderConfig;
use crate::gemini::GeminiProvider;
use crate::http::build_client;
use crate::huggingface::HuggingFaceProvider;
use crate::openai_compat::OpenAiCompatibleProvider;
use crate::provider::ContentProvider;
use automarketer_core::{CredentialSource, GenerationResult, ProviderKind};
use std::fmt;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ContentProvider>>,
    credentials: Arc<dyn CredentialSource>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.kinds())
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry that checks availability against `credentials`.
    pub fn new(credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            providers: Vec::new(),
            credentials,
        }
    }

    /// Build every production adapter, sharing one HTTP client.
    pub fn from_config(
        config: &ProviderConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> GenerationResult<Self> {
        let client = build_client(config.request_timeout)?;
        let mut registry = Self::new(credentials.clone());

        for kind in ProviderKind::ALL {
            let provider: Arc<dyn ContentProvider> = match kind {
                ProviderKind::Gemini => Arc::new(GeminiProvider::new(
                    config,
                    client.clone(),
                    credentials.clone(),
                )),
                ProviderKind::HuggingFace => Arc::new(HuggingFaceProvider::new(
                    config,
                    client.clone(),
                    credentials.clone(),
                )),
                ProviderKind::Groq => Arc::new(OpenAiCompatibleProvider::groq(
                    config,
                    client.clone(),
                    credentials.clone(),
                )),
                ProviderKind::Cohere => Arc::new(CohereProvider::new(
                    config,
                    client.clone(),
                    credentials.clone(),
                )),
                ProviderKind::Together => Arc::new(OpenAiCompatibleProvider::together(
                    config,
                    client.clone(),
                    credentials.clone(),
                )),
                ProviderKind::OpenRouter => Arc::new(OpenAiCompatibleProvider::openrouter(
                    config,
                    client.clone(),
                    credentials.clone(),
                )),
            };
            registry.register(provider);
        }

        Ok(registry)
    }

    /// Register an adapter, replacing any existing adapter of the same kind.
    /// Adapters stay sorted by declaration order regardless of call order.
    pub fn register(&mut self, provider: Arc<dyn ContentProvider>) {
        let kind = provider.kind();
        info!(provider = %kind, "Registering provider");

        self.providers.retain(|p| p.kind() != kind);
        let position = self
            .providers
            .partition_point(|p| p.kind().declaration_index() < kind.declaration_index());
        self.providers.insert(position, provider);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn ContentProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn ContentProvider>> {
        self.providers.iter().find(|p| p.kind() == kind).cloned()
    }

    /// All registered adapters in declaration order.
    pub fn providers(&self) -> &[Arc<dyn ContentProvider>] {
        &self.providers
    }

    pub fn kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialSource> {
        &self.credentials
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
