//! Route table and middleware stack.

use crate::config::HttpConfig;
use crate::handlers::{self, health};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

/// Build the application router.
pub fn app(state: AppState, config: &HttpConfig) -> Router {
    health::mark_started();

    let scheduler = Router::new()
        .route("/post-now", post(handlers::post_now))
        .route("/schedule", post(handlers::schedule_post))
        .route("/queue", get(handlers::get_queue))
        .route("/start", post(handlers::start_auto_post))
        .route("/stop", post(handlers::stop_auto_post))
        .route("/status", get(handlers::get_status))
        .route(
            "/peak-hours",
            get(handlers::get_peak_hours).put(handlers::update_peak_hours),
        );

    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/generate-best", post(handlers::generate_best))
        .route("/publish", post(handlers::publish))
        .nest("/scheduler", scheduler)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
