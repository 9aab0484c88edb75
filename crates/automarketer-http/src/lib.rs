//! # AutoMarketer HTTP
//!
//! JSON API over the content pipeline, the publishers and the post scheduler.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /health` | [`handlers::health_check`] |
//! | `POST /generate-best` | [`handlers::generate_best`] |
//! | `POST /publish` | [`handlers::publish`] |
//! | `POST /scheduler/post-now` | [`handlers::post_now`] |
//! | `POST /scheduler/schedule` | [`handlers::schedule_post`] |
//! | `GET /scheduler/queue` | [`handlers::get_queue`] |
//! | `POST /scheduler/start` | [`handlers::start_auto_post`] |
//! | `POST /scheduler/stop` | [`handlers::stop_auto_post`] |
//! | `GET /scheduler/status` | [`handlers::get_status`] |
//! | `GET`/`PUT /scheduler/peak-hours` | [`handlers::get_peak_hours`], [`handlers::update_peak_hours`] |
//!
//! Failures are rendered as [`ErrorResponse`] bodies.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod shutdown;
pub mod state;

pub use config::{HttpConfig, HttpConfigBuilder};
pub use error::{ApiError, ApiResult, ErrorResponse, ServerError};
pub use router::app;
pub use shutdown::shutdown_signal;
pub use state::AppState;

use tokio::net::TcpListener;
use tracing::info;

/// Bind `config.bind_addr` and serve until a shutdown signal arrives. A running
/// auto-posting loop is stopped before returning.
pub async fn serve(config: HttpConfig, state: AppState) -> Result<(), ServerError> {
    let scheduler = state.scheduler.clone();
    let app = app(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "AutoMarketer API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if scheduler.is_running().await {
        // Only fails if the loop stopped in the meantime.
        let _ = scheduler.stop().await;
    }
    info!("Server stopped");
    Ok(())
}
