//! Single-platform publishing.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use automarketer_publish::{PublishReceipt, PublishRequest};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};

/// POST /publish
pub async fn publish(
    State(state): State<AppState>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> ApiResult<Json<PublishReceipt>> {
    let Json(request) = payload?;
    if request.content.trim().is_empty() {
        return Err(ApiError::invalid("content must not be empty"));
    }

    let receipt = state.publisher.publish(&request).await?;
    Ok(Json(receipt))
}
