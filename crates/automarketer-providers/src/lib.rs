//! # AutoMarketer Providers
//!
//! Adapters that wrap external text-generation services behind the
//! [`ContentProvider`] trait, plus the [`ViralityAnalyzer`] used for scoring.
//!
//! | Kind        | Adapter                     | Wire format            |
//! |-------------|-----------------------------|------------------------|
//! | Gemini      | [`GeminiProvider`]          | `generateContent` REST |
//! | HuggingFace | [`HuggingFaceProvider`]     | inference API          |
//! | Groq        | [`OpenAiCompatibleProvider`]| OpenAI chat            |
//! | Cohere      | [`CohereProvider`]          | `/v1/generate`         |
//! | Together    | [`OpenAiCompatibleProvider`]| OpenAI chat            |
//! | OpenRouter  | [`OpenAiCompatibleProvider`]| OpenAI chat            |
//!
//! Every adapter applies its own per-request timeout, reads its API key from a
//! [`CredentialSource`](automarketer_core::CredentialSource) on each call and
//! reports failures as [`GenerationError`](automarketer_core::GenerationError).
//!
//! ## Example
//!
//! ```rust,ignore
//! use automarketer_core::{EnvCredentials, GenerationRequest, Platform, BusinessContext};
//! use automarketer_providers::{ProviderConfig, ProviderRegistry};
//! use std::sync::Arc;
//!
//! let config = ProviderConfig::from_env()?;
//! let registry = ProviderRegistry::from_config(&config, Arc::new(EnvCredentials))?;
//!
//! let request = GenerationRequest::new(Platform::Twitter, BusinessContext::new("Acme", "tech"));
//! for provider in registry.providers() {
//!     match provider.generate(&request).await {
//!         Ok(text) => println!("{}: {text}", provider.kind()),
//!         Err(e) => eprintln!("{} failed: {e}", provider.kind()),
//!     }
//! }
//! ```

pub mod analyzer;
pub mod cohere;
pub mod config;
pub mod gemini;
mod http;
pub mod huggingface;
pub mod openai_compat;
pub mod provider;
pub mod registry;

pub use analyzer::{extract_json_object, Analysis, LlmViralityAnalyzer, ViralityAnalyzer};
pub use cohere::CohereProvider;
pub use config::{ProviderConfig, ProviderConfigBuilder};
pub use gemini::GeminiProvider;
pub use huggingface::HuggingFaceProvider;
pub use openai_compat::OpenAiCompatibleProvider;
pub use provider::ContentProvider;
pub use registry::ProviderRegistry;
