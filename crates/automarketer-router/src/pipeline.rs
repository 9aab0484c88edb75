//! The generation pipeline: availability, fan-out, scoring, selection and
//! platform formatting, wired together behind [`ContentRouter`].

use crate::availability::resolve_available;
use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult};
use crate::fanout::{FanOutReport, FanOutScheduler};
use crate::scoring::Scorer;
use crate::selector::rank;
use async_trait::async_trait;
use automarketer_core::format::format_for_platform;
use automarketer_core::{
    ConfigError, ContentSource, CredentialSource, EnvCredentials, GenerationRequest, ProviderKind,
    RankedOutcome,
};
use automarketer_providers::{LlmViralityAnalyzer, ProviderConfig, ProviderRegistry, ViralityAnalyzer};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// A ranked outcome together with the per-provider account of the fan-out.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub outcome: RankedOutcome,
    pub fanout: FanOutReport,
}

/// Routes one content request across every available provider and returns the
/// best result.
///
/// # Example
///
/// ```rust,ignore
/// use automarketer_router::ContentRouter;
/// use automarketer_core::{BusinessContext, GenerationRequest, Platform};
///
/// let router = ContentRouter::from_env()?;
/// let request = GenerationRequest::new(Platform::Twitter, BusinessContext::new("Acme", "tech"))
///     .with_topic("spring launch");
///
/// let outcome = router.generate_best(&request).await;
/// println!("{} ({}): {}", outcome.best_model, outcome.best_score, outcome.best_content);
/// ```
#[derive(Clone)]
pub struct ContentRouter {
    registry: ProviderRegistry,
    fanout: FanOutScheduler,
    scorer: Scorer,
    config: RouterConfig,
}

impl ContentRouter {
    /// A router over `registry` with no analyzer; every result gets the default score.
    pub fn new(registry: ProviderRegistry, config: RouterConfig) -> Self {
        Self {
            fanout: FanOutScheduler::new(
                config.fanout_budget,
                config.max_concurrency,
                config.min_content_length,
            ),
            scorer: Scorer::new(None, config.scoring_timeout, config.default_score),
            registry,
            config,
        }
    }

    #[must_use]
    pub fn with_analyzer(mut self, analyzer: Arc<dyn ViralityAnalyzer>) -> Self {
        self.scorer = Scorer::new(
            Some(analyzer),
            self.config.scoring_timeout,
            self.config.default_score,
        );
        self
    }

    /// Production router: every adapter plus the LLM analyzer, keys read from
    /// `credentials`.
    pub fn from_config(
        config: RouterConfig,
        providers: &ProviderConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> RouterResult<Self> {
        if providers.request_timeout > config.fanout_budget {
            return Err(RouterError::Config(ConfigError::ValidationError(format!(
                "provider timeout ({:?}) must not exceed the fan-out budget ({:?})",
                providers.request_timeout, config.fanout_budget
            ))));
        }

        let registry = ProviderRegistry::from_config(providers, credentials.clone())?;
        let analyzer = LlmViralityAnalyzer::from_config(providers, credentials)?;
        Ok(Self::new(registry, config).with_analyzer(Arc::new(analyzer)))
    }

    /// [`from_config`](Self::from_config) with settings and keys from the environment.
    pub fn from_env() -> RouterResult<Self> {
        let config = RouterConfig::from_env()?;
        let providers = ProviderConfig::from_env()?;
        Self::from_config(config, &providers, Arc::new(EnvCredentials))
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Providers that would run right now, in declaration order.
    pub fn available_providers(&self) -> Vec<ProviderKind> {
        resolve_available(
            self.registry.providers(),
            self.registry.credentials().as_ref(),
        )
        .iter()
        .map(|p| p.kind())
        .collect()
    }

    /// Run the pipeline. Always succeeds, falling back to template content.
    pub async fn generate_best(&self, request: &GenerationRequest) -> RankedOutcome {
        self.generate_with_report(request).await.outcome
    }

    /// Run the pipeline and keep the fan-out account for diagnostics.
    pub async fn generate_with_report(&self, request: &GenerationRequest) -> GenerationReport {
        let available = resolve_available(
            self.registry.providers(),
            self.registry.credentials().as_ref(),
        );

        info!(
            platform = %request.platform,
            providers = available.len(),
            "Generating content"
        );

        let fanout = self.fanout.run(&available, request).await;
        let scored = self.scorer.score_all(fanout.results.clone()).await;
        let selection = rank(scored, request);

        let best = selection.best();
        let best_content = format_for_platform(&best.text, &request.platform);
        let best_model = best.source;
        let best_score = best.effective_score();
        let best_analysis = best.analysis.clone();

        info!(
            platform = %request.platform,
            best_model = %best_model,
            best_score,
            candidates = selection.ranked.len(),
            "Selected best content"
        );

        GenerationReport {
            outcome: RankedOutcome {
                success: true,
                best_content,
                best_model,
                best_score,
                best_analysis,
                all_results: selection.ranked,
                comparison: selection.comparison,
            },
            fanout,
        }
    }
}

#[async_trait]
impl ContentSource for ContentRouter {
    async fn best_content(&self, request: &GenerationRequest) -> RankedOutcome {
        self.generate_best(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_from_config_rejects_timeout_above_budget() {
        let config = RouterConfig::builder()
            .fanout_budget(Duration::from_secs(10))
            .build()
            .unwrap();
        let providers = ProviderConfig::builder()
            .request_timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        let result = ContentRouter::from_config(
            config,
            &providers,
            Arc::new(automarketer_core::StaticCredentials::new()),
        );
        assert!(matches!(result, Err(RouterError::Config(_))));
    }

    #[test]
    fn test_from_config_without_keys_has_no_available_providers() {
        let router = ContentRouter::from_config(
            RouterConfig::default(),
            &ProviderConfig::default(),
            Arc::new(automarketer_core::StaticCredentials::new()),
        )
        .unwrap();
        assert_eq!(router.registry().len(), 6);
        assert!(router.available_providers().is_empty());
    }
}
