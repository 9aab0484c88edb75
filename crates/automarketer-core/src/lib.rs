//! # AutoMarketer Core
//!
//! Shared building blocks for the AutoMarketer content pipeline.
//!
//! ## Features
//!
//! - **Types**: platforms, business context, generation requests, provider results
//!   and the ranked outcome returned to callers
//! - **Platform Formatter**: per-platform post-processing of the winning text
//! - **Fallback Generator**: deterministic template content that never fails
//! - **Prompt Builder**: the single shared generation prompt
//! - **Credentials**: redacting secrets and pluggable credential sources
//! - **Environment Config**: typed helpers for reading `AUTOMARKETER_*` variables
//!
//! ## Example
//!
//! ```rust
//! use automarketer_core::{BusinessContext, GenerationRequest, Platform, fallback, format};
//!
//! let request = GenerationRequest::new(
//!     Platform::Instagram,
//!     BusinessContext::new("Acme Bakery", "food and drink"),
//! )
//! .with_topic("sourdough week");
//!
//! let result = fallback::generate(&request);
//! assert_eq!(result.source.id(), "template");
//!
//! let post = format::format_for_platform(&result.text, &request.platform);
//! assert!(post.contains('#'));
//! ```

pub mod credentials;
pub mod env;
pub mod error;
pub mod fallback;
pub mod format;
pub mod prompt;
pub mod secret;
pub mod source;
pub mod types;

pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use env::ConfigError;
pub use error::{GenerationError, GenerationResult};
pub use secret::SecretString;
pub use source::ContentSource;
pub use types::{
    BusinessContext, ComparisonEntry, GenerationRequest, ModelSource, Platform,
    ProviderKind, ProviderResult, RankedOutcome,
};

/// Minimum number of characters (after trimming) a generated text must exceed
/// to count as a usable result.
pub const MIN_CONTENT_LENGTH: usize = 20;

/// Score assigned when analysis is unavailable or unusable.
pub const DEFAULT_SCORE: f64 = 50.0;

/// Score carried by template fallback results.
pub const FALLBACK_SCORE: f64 = 60.0;
