//! Liveness endpoint.

use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde_json::{Value, json};
use std::time::Instant;

// Track service start time for uptime calculation
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Start the uptime clock. Called once when the router is built.
pub(crate) fn mark_started() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_seconds() -> u64 {
    START_TIME.get_or_init(Instant::now).elapsed().as_secs()
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let providers: Vec<&str> = state.providers.iter().map(|kind| kind.id()).collect();

    Json(json!({
        "status": "healthy",
        "service": "automarketer",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": uptime_seconds(),
        "providers": providers,
    }))
}
