//! The provider adapter interface.

use async_trait::async_trait;
use automarketer_core::prompt::build_prompt;
use automarketer_core::{GenerationRequest, GenerationResult, ProviderKind};

/// One external text-generation service.
///
/// Implementations must report every problem (missing key, transport,
/// status, parsing, empty text) as an error rather than panicking, and must
/// bound each request with their own timeout.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Which registered provider this adapter serves.
    fn kind(&self) -> ProviderKind;

    /// Send a raw prompt and return the trimmed completion.
    async fn complete(&self, prompt: &str) -> GenerationResult<String>;

    /// Generate post text for `request` using the shared prompt.
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<String> {
        self.complete(&build_prompt(request)).await
    }
}
