//! Seam between content consumers (the post scheduler) and the generation
//! pipeline.

use crate::types::{GenerationRequest, RankedOutcome};
use async_trait::async_trait;

/// Something that can produce a ranked outcome for a request.
///
/// Implementations never fail: when nothing usable is produced they return
/// the template fallback.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn best_content(&self, request: &GenerationRequest) -> RankedOutcome;
}
