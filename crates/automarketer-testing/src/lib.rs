//! # AutoMarketer Testing
//!
//! Test doubles for every seam in the AutoMarketer pipeline.
//!
//! ## Components
//!
//! - **[`MockProvider`]**: a text-generation provider with scripted answers,
//!   failures, panics, delays or hangs
//! - **[`MockAnalyzer`]**: a virality analyzer with per-text scores
//! - **[`MockPublisher`]**: records publish requests and accepts or rejects them
//! - **[`MockContentSource`]**: a whole pipeline returning a fixed outcome
//! - **Fixtures**: sample requests, credentials and frozen clocks
//!
//! ## Usage
//!
//! ```rust
//! use automarketer_core::{Platform, ProviderKind};
//! use automarketer_providers::ContentProvider;
//! use automarketer_testing::{MockProvider, fixtures};
//!
//! let provider = MockProvider::new(ProviderKind::Groq).with_response("Autumn blend is here!");
//! let request = fixtures::sample_request(Platform::Twitter);
//! let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! let text = runtime.block_on(provider.generate(&request)).unwrap();
//! assert_eq!(text, "Autumn blend is here!");
//! assert_eq!(provider.call_count(), 1);
//! ```

pub mod fixtures;
pub mod mock_providers;
pub mod mock_publish;

pub use mock_providers::{MockAnalyzer, MockProvider};
pub use mock_publish::{MockContentSource, MockPublisher};
