//! Scheduler endpoints: immediate and scheduled posts, auto-posting control
//! and the peak-hour table.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use automarketer_core::{BusinessContext, Platform};
use automarketer_publish::{
    AutoPostJob, BatchReceipt, Media, PeakHours, ScheduledPost, SchedulerStatus,
};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct PostNowRequest {
    pub content: String,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub media: Media,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub content: String,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub media: Media,
    /// Omit to post at the first platform's next peak hour.
    #[serde(default)]
    pub hours_from_now: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub business: BusinessContext,
    #[serde(default)]
    pub platforms: Option<Vec<Platform>>,
    #[serde(default)]
    pub interval_hours: Option<f64>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl StartRequest {
    fn into_job(self) -> ApiResult<AutoPostJob> {
        let mut job = AutoPostJob::new(self.business);
        if let Some(platforms) = self.platforms {
            job = job.with_platforms(platforms);
        }
        if let Some(hours) = self.interval_hours {
            let interval = Duration::try_from_secs_f64(hours * 3600.0)
                .ok()
                .filter(|interval| hours > 0.0 && !interval.is_zero())
                .ok_or_else(|| {
                    ApiError::invalid("interval_hours must be a positive number within range")
                })?;
            job = job.with_interval(interval);
        }
        if let Some(topic) = self.topic {
            job = job.with_topic(topic);
        }
        if let Some(language) = self.language {
            job = job.with_language(language);
        }
        Ok(job)
    }
}

#[derive(Debug, Deserialize)]
pub struct PeakHoursUpdate {
    pub platform: Platform,
    pub hours: Vec<u32>,
}

/// POST /scheduler/post-now
pub async fn post_now(
    State(state): State<AppState>,
    payload: Result<Json<PostNowRequest>, JsonRejection>,
) -> ApiResult<Json<BatchReceipt>> {
    let Json(body) = payload?;
    if body.content.trim().is_empty() {
        return Err(ApiError::invalid("content must not be empty"));
    }

    let receipt = state
        .scheduler
        .post_now(&body.content, &body.platforms, &body.media, body.title.as_deref())
        .await?;
    Ok(Json(receipt))
}

/// POST /scheduler/schedule
pub async fn schedule_post(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> ApiResult<Json<ScheduledPost>> {
    let Json(body) = payload?;
    let post = state
        .scheduler
        .schedule_post(&body.content, &body.platforms, &body.media, body.hours_from_now)
        .await?;
    Ok(Json(post))
}

/// GET /scheduler/queue
pub async fn get_queue(State(state): State<AppState>) -> Json<Vec<ScheduledPost>> {
    Json(state.scheduler.queue().await)
}

/// POST /scheduler/start
pub async fn start_auto_post(
    State(state): State<AppState>,
    payload: Result<Json<StartRequest>, JsonRejection>,
) -> ApiResult<Json<SchedulerStatus>> {
    let Json(body) = payload?;
    let job = body.into_job()?;
    let status = state.scheduler.start(job, state.content.clone()).await?;
    Ok(Json(status))
}

/// POST /scheduler/stop
pub async fn stop_auto_post(State(state): State<AppState>) -> ApiResult<Json<SchedulerStatus>> {
    state.scheduler.stop().await?;
    Ok(Json(state.scheduler.status().await))
}

/// GET /scheduler/status
pub async fn get_status(State(state): State<AppState>) -> Json<SchedulerStatus> {
    Json(state.scheduler.status().await)
}

/// GET /scheduler/peak-hours
pub async fn get_peak_hours(State(state): State<AppState>) -> Json<PeakHours> {
    Json(state.scheduler.peak_hours().await)
}

/// PUT /scheduler/peak-hours
pub async fn update_peak_hours(
    State(state): State<AppState>,
    payload: Result<Json<PeakHoursUpdate>, JsonRejection>,
) -> ApiResult<Json<PeakHours>> {
    let Json(body) = payload?;
    let table = state
        .scheduler
        .update_peak_hours(&body.platform, body.hours)
        .await?;
    Ok(Json(table))
}
