//! The post scheduler: a queue of scheduled posts, the peak-hour table and an
//! auto-posting loop, owned by one controller.
//!
//! Auto-posting moves between two states:
//!
//! ```text
//!   Idle ──start()──▶ Running{started_at, job, handle, shutdown}
//!    ▲                        │
//!    └────────stop()──────────┘
//! ```
//!
//! `start` while running fails with [`SchedulerError::AlreadyRunning`];
//! `stop` while idle fails with [`SchedulerError::NotRunning`]. Transitions
//! are serialized by the state lock.

use crate::config::PublishConfig;
use crate::error::{SchedulerError, SchedulerResult};
use crate::peak_hours::PeakHours;
use crate::platform::{publish_many, PlatformPublisher};
use crate::publisher::Publisher;
use crate::types::{BatchReceipt, Media, PublishRequest};
use automarketer_core::{BusinessContext, ContentSource, GenerationRequest, Platform};
use chrono::{DateTime, Duration as ChronoDuration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Longest content preview kept in the queue.
pub const PREVIEW_CHARS: usize = 100;
pub const DEFAULT_AUTO_POST_INTERVAL: Duration = Duration::from_secs(4 * 60 * 60);

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledPost {
    /// Content preview.
    pub content: String,
    pub platforms: Vec<Platform>,
    pub scheduled_time: DateTime<Utc>,
    pub status: PostStatus,
}

pub fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let head: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}

/// What the auto-posting loop generates and for whom.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoPostJob {
    pub business: BusinessContext,
    pub platforms: Vec<Platform>,
    pub interval: Duration,
    pub topic: Option<String>,
    pub language: Option<String>,
}

impl AutoPostJob {
    /// Twitter and LinkedIn every four hours.
    pub fn new(business: BusinessContext) -> Self {
        Self {
            business,
            platforms: vec![Platform::Twitter, Platform::LinkedIn],
            interval: DEFAULT_AUTO_POST_INTERVAL,
            topic: None,
            language: None,
        }
    }

    #[must_use]
    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn request_for(&self, platform: &Platform) -> GenerationRequest {
        let mut request = GenerationRequest::new(platform.clone(), self.business.clone());
        if let Some(topic) = &self.topic {
            request = request.with_topic(topic.as_str());
        }
        if let Some(language) = &self.language {
            request = request.with_language(language.as_str());
        }
        request
    }

    fn validate(&self) -> SchedulerResult<()> {
        if self.platforms.is_empty() {
            return Err(SchedulerError::InvalidSchedule(
                "auto-posting needs at least one platform".to_string(),
            ));
        }
        if self.interval.is_zero() {
            return Err(SchedulerError::InvalidSchedule(
                "auto-posting interval must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerStatus {
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,
    pub platforms: Vec<Platform>,
    pub queued: usize,
}

enum AutoPostState {
    Idle,
    Running {
        started_at: DateTime<Utc>,
        job: AutoPostJob,
        handle: JoinHandle<()>,
        shutdown: watch::Sender<bool>,
    },
}

/// The parts shared with the auto-posting task.
#[derive(Clone)]
struct Poster {
    publisher: Arc<dyn Publisher>,
    peak_hours: Arc<RwLock<PeakHours>>,
    queue: Arc<Mutex<Vec<ScheduledPost>>>,
    clock: Clock,
}

impl Poster {
    async fn schedule_at(
        &self,
        content: &str,
        platforms: &[Platform],
        media: &Media,
        at: DateTime<Utc>,
    ) -> SchedulerResult<ScheduledPost> {
        if content.trim().is_empty() {
            return Err(SchedulerError::InvalidSchedule("content is empty".to_string()));
        }
        if platforms.is_empty() {
            return Err(SchedulerError::InvalidSchedule(
                "at least one platform is required".to_string(),
            ));
        }
        let now = (self.clock)();
        if at <= now {
            return Err(SchedulerError::InvalidSchedule(format!(
                "schedule time {at} is not in the future"
            )));
        }

        let mut accepted = Vec::with_capacity(platforms.len());
        let mut first_error = None;
        for platform in platforms {
            let request = PublishRequest::new(platform.clone(), content)
                .with_media(media.clone())
                .scheduled_at(at);
            match self.publisher.publish(&request).await {
                Ok(_) => accepted.push(platform.clone()),
                Err(err) => {
                    warn!(platform = %platform, error = %err, "Scheduling failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        if accepted.is_empty() {
            return Err(match first_error {
                Some(err) => err.into(),
                None => SchedulerError::InvalidSchedule("nothing was scheduled".to_string()),
            });
        }

        let post = ScheduledPost {
            content: preview(content),
            platforms: accepted,
            scheduled_time: at,
            status: PostStatus::Scheduled,
        };
        info!(
            platforms = post.platforms.len(),
            scheduled_time = %post.scheduled_time,
            "Post scheduled"
        );
        self.queue.lock().await.push(post.clone());
        Ok(post)
    }

    async fn schedule(
        &self,
        content: &str,
        platforms: &[Platform],
        media: &Media,
        hours_from_now: Option<f64>,
    ) -> SchedulerResult<ScheduledPost> {
        let now = (self.clock)();
        let at = match hours_from_now {
            Some(hours) if hours.is_finite() && hours > 0.0 => {
                let millis = (hours * 3_600_000.0).round();
                ChronoDuration::try_milliseconds(millis as i64)
                    .filter(|_| millis < i64::MAX as f64)
                    .and_then(|offset| now.checked_add_signed(offset))
                    .ok_or_else(|| {
                        SchedulerError::InvalidSchedule(format!(
                            "hours_from_now is out of range, got {hours}"
                        ))
                    })?
            }
            Some(hours) => {
                return Err(SchedulerError::InvalidSchedule(format!(
                    "hours_from_now must be positive, got {hours}"
                )));
            }
            None => {
                let first = platforms.first().ok_or_else(|| {
                    SchedulerError::InvalidSchedule("at least one platform is required".to_string())
                })?;
                self.peak_hours.read().await.next_peak_time(first, now)
            }
        };
        self.schedule_at(content, platforms, media, at).await
    }

    /// One pass of the auto-posting loop. Returns how many posts were scheduled.
    async fn auto_post(&self, job: &AutoPostJob, source: &dyn ContentSource) -> usize {
        let hour = (self.clock)().hour();
        let due: Vec<Platform> = {
            let peaks = self.peak_hours.read().await;
            job.platforms
                .iter()
                .filter(|p| peaks.is_peak(p, hour))
                .cloned()
                .collect()
        };
        if due.is_empty() {
            debug!(hour, "No platform at peak hour");
            return 0;
        }

        let mut scheduled = 0;
        for platform in due {
            let outcome = source.best_content(&job.request_for(&platform)).await;
            match self
                .schedule(
                    &outcome.best_content,
                    std::slice::from_ref(&platform),
                    &Media::default(),
                    None,
                )
                .await
            {
                Ok(_) => {
                    scheduled += 1;
                    info!(platform = %platform, model = %outcome.best_model, "Auto-post scheduled");
                }
                Err(err) => {
                    warn!(platform = %platform, error = %err, "Auto-post failed");
                }
            }
        }
        scheduled
    }
}

async fn run_loop(
    poster: Poster,
    job: AutoPostJob,
    source: Arc<dyn ContentSource>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(job.interval);
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            scheduled = poster.auto_post(&job, source.as_ref()) => {
                debug!(scheduled, "Auto-post pass finished");
            }
        }
    }
    debug!("Auto-posting loop exited");
}

/// Controller for scheduled and automatic posting.
pub struct PostScheduler {
    poster: Poster,
    peak_hours_path: Option<PathBuf>,
    state: Mutex<AutoPostState>,
}

impl std::fmt::Debug for PostScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostScheduler")
            .field("publisher", &self.poster.publisher.name())
            .field("peak_hours_path", &self.peak_hours_path)
            .finish_non_exhaustive()
    }
}

impl PostScheduler {
    /// An in-memory scheduler; peak-hour updates are not persisted.
    pub fn new(publisher: Arc<dyn Publisher>, peak_hours: PeakHours) -> Self {
        Self {
            poster: Poster {
                publisher,
                peak_hours: Arc::new(RwLock::new(peak_hours)),
                queue: Arc::new(Mutex::new(Vec::new())),
                clock: system_clock(),
            },
            peak_hours_path: None,
            state: Mutex::new(AutoPostState::Idle),
        }
    }

    /// Production scheduler: every publisher, peak hours loaded from and saved to
    /// the configured path.
    pub fn from_config(config: &PublishConfig) -> SchedulerResult<Self> {
        let publisher = PlatformPublisher::from_config(config)?;
        let peak_hours = PeakHours::load(&config.peak_hours_path);
        Ok(Self::new(Arc::new(publisher), peak_hours)
            .with_persistence(config.peak_hours_path.clone()))
    }

    #[must_use]
    pub fn with_persistence(mut self, path: impl Into<PathBuf>) -> Self {
        self.peak_hours_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.poster.clock = clock;
        self
    }

    pub fn publisher(&self) -> &Arc<dyn Publisher> {
        &self.poster.publisher
    }

    /// Schedule a post `hours_from_now`, or at the first platform's next peak hour.
    pub async fn schedule_post(
        &self,
        content: &str,
        platforms: &[Platform],
        media: &Media,
        hours_from_now: Option<f64>,
    ) -> SchedulerResult<ScheduledPost> {
        self.poster
            .schedule(content, platforms, media, hours_from_now)
            .await
    }

    pub async fn schedule_post_at(
        &self,
        content: &str,
        platforms: &[Platform],
        media: &Media,
        at: DateTime<Utc>,
    ) -> SchedulerResult<ScheduledPost> {
        self.poster.schedule_at(content, platforms, media, at).await
    }

    /// Publish immediately to every platform.
    pub async fn post_now(
        &self,
        content: &str,
        platforms: &[Platform],
        media: &Media,
        title: Option<&str>,
    ) -> SchedulerResult<BatchReceipt> {
        if platforms.is_empty() {
            return Err(SchedulerError::InvalidSchedule(
                "at least one platform is required".to_string(),
            ));
        }
        Ok(publish_many(
            self.poster.publisher.as_ref(),
            content,
            platforms,
            media,
            title,
        )
        .await)
    }

    /// Run one auto-posting pass now, outside the loop.
    pub async fn run_once(&self, job: &AutoPostJob, source: &dyn ContentSource) -> usize {
        self.poster.auto_post(job, source).await
    }

    /// Begin auto-posting. The first pass runs immediately.
    pub async fn start(
        &self,
        job: AutoPostJob,
        source: Arc<dyn ContentSource>,
    ) -> SchedulerResult<SchedulerStatus> {
        job.validate()?;
        let mut state = self.state.lock().await;
        if matches!(*state, AutoPostState::Running { .. }) {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (shutdown, receiver) = watch::channel(false);
        let handle = tokio::spawn(run_loop(
            self.poster.clone(),
            job.clone(),
            source,
            receiver,
        ));
        let started_at = (self.poster.clock)();

        info!(
            platforms = job.platforms.len(),
            interval_secs = job.interval.as_secs(),
            "Auto-posting started"
        );
        *state = AutoPostState::Running {
            started_at,
            job,
            handle,
            shutdown,
        };
        drop(state);

        Ok(self.status().await)
    }

    /// Stop auto-posting and wait for the loop to exit.
    pub async fn stop(&self) -> SchedulerResult<()> {
        let mut state = self.state.lock().await;
        let AutoPostState::Running {
            handle, shutdown, ..
        } = std::mem::replace(&mut *state, AutoPostState::Idle)
        else {
            return Err(SchedulerError::NotRunning);
        };

        // The receiver may already be gone if the task ended.
        let _ = shutdown.send(true);
        if let Err(err) = handle.await {
            error!(error = %err, "Auto-posting task ended abnormally");
        }
        info!("Auto-posting stopped");
        Ok(())
    }

    pub async fn status(&self) -> SchedulerStatus {
        let queued = self.poster.queue.lock().await.len();
        match &*self.state.lock().await {
            AutoPostState::Idle => SchedulerStatus {
                running: false,
                started_at: None,
                interval_secs: None,
                platforms: Vec::new(),
                queued,
            },
            AutoPostState::Running {
                started_at, job, ..
            } => SchedulerStatus {
                running: true,
                started_at: Some(*started_at),
                interval_secs: Some(job.interval.as_secs()),
                platforms: job.platforms.clone(),
                queued,
            },
        }
    }

    pub async fn is_running(&self) -> bool {
        matches!(*self.state.lock().await, AutoPostState::Running { .. })
    }

    pub async fn queue(&self) -> Vec<ScheduledPost> {
        self.poster.queue.lock().await.clone()
    }

    pub async fn peak_hours(&self) -> PeakHours {
        self.poster.peak_hours.read().await.clone()
    }

    /// Replace one platform's peak hours, persisting the table when a path is set.
    pub async fn update_peak_hours(
        &self,
        platform: &Platform,
        hours: Vec<u32>,
    ) -> SchedulerResult<PeakHours> {
        let mut peaks = self.poster.peak_hours.write().await;
        peaks.update(platform, hours)?;
        if let Some(path) = &self.peak_hours_path {
            peaks.save(path)?;
        }
        Ok(peaks.clone())
    }
}
