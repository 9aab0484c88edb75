//! Shared handler state.

use crate::error::ServerError;
use automarketer_core::{ContentSource, ProviderKind};
use automarketer_publish::{PeakHours, PlatformPublisher, PostScheduler, PublishConfig, Publisher};
use automarketer_router::ContentRouter;
use std::sync::Arc;

/// Everything the handlers need: the pipeline, a publisher and the scheduler.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentSource>,
    pub publisher: Arc<dyn Publisher>,
    pub scheduler: Arc<PostScheduler>,
    /// Providers with credentials, reported by `/health`.
    pub providers: Vec<ProviderKind>,
}

impl AppState {
    pub fn new(
        content: Arc<dyn ContentSource>,
        publisher: Arc<dyn Publisher>,
        scheduler: Arc<PostScheduler>,
    ) -> Self {
        Self {
            content,
            publisher,
            scheduler,
            providers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_providers(mut self, providers: Vec<ProviderKind>) -> Self {
        self.providers = providers;
        self
    }

    /// Production state from environment configuration.
    pub fn from_env() -> Result<Self, ServerError> {
        let router = ContentRouter::from_env()?;
        let publish = PublishConfig::from_env()?;
        Self::from_parts(router, &publish)
    }

    /// Wire `router` and the publishers described by `publish` together. The
    /// scheduler shares the same publisher.
    pub fn from_parts(router: ContentRouter, publish: &PublishConfig) -> Result<Self, ServerError> {
        let providers = router.available_providers();
        let publisher: Arc<dyn Publisher> = Arc::new(PlatformPublisher::from_config(publish)?);
        let scheduler = PostScheduler::new(
            publisher.clone(),
            PeakHours::load(&publish.peak_hours_path),
        )
        .with_persistence(publish.peak_hours_path.clone());

        Ok(Self::new(Arc::new(router), publisher, Arc::new(scheduler)).with_providers(providers))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("publisher", &self.publisher.name())
            .field("scheduler", &self.scheduler)
            .field("providers", &self.providers)
            .finish_non_exhaustive()
    }
}
