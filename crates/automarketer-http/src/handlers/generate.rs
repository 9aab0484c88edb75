//! Content generation endpoint.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use automarketer_core::{GenerationRequest, RankedOutcome};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use tracing::info;

/// POST /generate-best
///
/// Runs the whole pipeline. The response always carries content: when no
/// provider produces anything usable the template fallback is returned.
pub async fn generate_best(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResult<Json<RankedOutcome>> {
    let Json(request) = payload?;
    if request.business.name.trim().is_empty() {
        return Err(ApiError::invalid("business name must not be empty"));
    }

    let outcome = state.content.best_content(&request).await;
    info!(
        platform = %request.platform,
        best_model = %outcome.best_model.id(),
        score = outcome.best_score,
        candidates = outcome.comparison.len(),
        "Generated content"
    );
    Ok(Json(outcome))
}
