//! Fan-Out Scheduler.
//!
//! Invokes every eligible adapter concurrently under one global deadline and
//! collects whatever finishes in time.
//!
//! | Adapter outcome                         | Recorded as                       |
//! |-----------------------------------------|-----------------------------------|
//! | valid text before the deadline          | `ProviderResult` (trimmed text)   |
//! | error / empty / too-short text          | `ProviderFailure::Failed`         |
//! | panic                                   | `ProviderFailure::Panicked`       |
//! | still running at the deadline           | `ProviderFailure::Abandoned`      |
//!
//! Results leave the scheduler sorted by adapter declaration order, so
//! completion order never influences tie-breaking downstream. Abandoned tasks
//! are aborted when the deadline passes; the caller is never held past it.

use automarketer_core::{GenerationError, GenerationRequest, ProviderKind, ProviderResult};
use automarketer_providers::ContentProvider;
use futures::FutureExt;
use serde::Serialize;
use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

/// Why an adapter contributed no result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ProviderFailure {
    Failed {
        provider: ProviderKind,
        code: &'static str,
        message: String,
    },
    Panicked {
        provider: ProviderKind,
        message: String,
    },
    Abandoned {
        provider: ProviderKind,
    },
}

impl ProviderFailure {
    pub fn provider(&self) -> ProviderKind {
        match self {
            ProviderFailure::Failed { provider, .. }
            | ProviderFailure::Panicked { provider, .. }
            | ProviderFailure::Abandoned { provider } => *provider,
        }
    }

    fn from_error(provider: ProviderKind, err: &GenerationError) -> Self {
        ProviderFailure::Failed {
            provider,
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

/// Everything one fan-out batch produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FanOutReport {
    /// Valid results in declaration order.
    pub results: Vec<ProviderResult>,
    pub failures: Vec<ProviderFailure>,
    #[serde(rename = "elapsed_ms", serialize_with = "duration_ms::serialize")]
    pub elapsed: Duration,
}

impl FanOutReport {
    pub fn abandoned(&self) -> Vec<ProviderKind> {
        self.failures
            .iter()
            .filter(|f| matches!(f, ProviderFailure::Abandoned { .. }))
            .map(ProviderFailure::provider)
            .collect()
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(value.as_millis())
    }
}

type Attempt = (ProviderKind, Result<Result<String, GenerationError>, String>, Duration);

#[derive(Debug, Clone)]
pub struct FanOutScheduler {
    budget: Duration,
    max_concurrency: usize,
    min_content_length: usize,
}

impl FanOutScheduler {
    pub fn new(budget: Duration, max_concurrency: usize, min_content_length: usize) -> Self {
        Self {
            budget,
            max_concurrency: max_concurrency.max(1),
            min_content_length,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Run `providers` against `request`.
    pub async fn run(
        &self,
        providers: &[Arc<dyn ContentProvider>],
        request: &GenerationRequest,
    ) -> FanOutReport {
        let started = Instant::now();
        let deadline = started + self.budget;
        let request = Arc::new(request.clone());
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));

        let mut pending: BTreeSet<ProviderKind> = BTreeSet::new();
        let mut tasks: JoinSet<Attempt> = JoinSet::new();

        for provider in providers {
            let provider = Arc::clone(provider);
            let request = Arc::clone(&request);
            let semaphore = Arc::clone(&semaphore);
            let kind = provider.kind();
            pending.insert(kind);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let call_started = Instant::now();
                let outcome = AssertUnwindSafe(provider.generate(&request))
                    .catch_unwind()
                    .await
                    .map_err(|panic| panic_message(panic.as_ref()));
                (kind, outcome, call_started.elapsed())
            });
        }

        debug!(
            providers = pending.len(),
            budget_ms = self.budget.as_millis() as u64,
            "Fan-out started"
        );

        let mut report = FanOutReport::default();

        loop {
            match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((kind, outcome, elapsed)))) => {
                    pending.remove(&kind);
                    self.record(&mut report, kind, outcome, elapsed);
                }
                Ok(Some(Err(join_error))) => {
                    warn!(error = %join_error, "Fan-out task ended unexpectedly");
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        abandoned = pending.len(),
                        budget_ms = self.budget.as_millis() as u64,
                        "Fan-out budget exhausted, abandoning remaining providers"
                    );
                    tasks.abort_all();
                    break;
                }
            }
        }

        // Anything still pending (budget expiry or a lost task) is abandoned.
        for provider in pending {
            report.failures.push(ProviderFailure::Abandoned { provider });
        }

        report.results.sort_by_key(|r| r.declaration_index());
        report.elapsed = started.elapsed();

        info!(
            succeeded = report.results.len(),
            failed = report.failures.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Fan-out finished"
        );

        report
    }

    fn record(
        &self,
        report: &mut FanOutReport,
        kind: ProviderKind,
        outcome: Result<Result<String, GenerationError>, String>,
        elapsed: Duration,
    ) {
        let elapsed_ms = elapsed.as_millis() as u64;
        match outcome {
            Ok(Ok(text)) => match self.validate(&text) {
                Ok(text) => {
                    info!(provider = %kind, elapsed_ms, chars = text.chars().count(), "Provider succeeded");
                    report.results.push(ProviderResult::new(kind, text));
                }
                Err(e) => {
                    warn!(provider = %kind, elapsed_ms, error = %e, "Provider returned unusable content");
                    report.failures.push(ProviderFailure::from_error(kind, &e));
                }
            },
            Ok(Err(e)) => {
                warn!(
                    provider = %kind,
                    elapsed_ms,
                    error_code = e.error_code(),
                    error = %e,
                    "Provider failed"
                );
                report.failures.push(ProviderFailure::from_error(kind, &e));
            }
            Err(message) => {
                warn!(provider = %kind, elapsed_ms, panic = %message, "Provider panicked");
                report
                    .failures
                    .push(ProviderFailure::Panicked { provider: kind, message });
            }
        }
    }

    /// Trim and length-check generated text.
    fn validate(&self, text: &str) -> Result<String, GenerationError> {
        let trimmed = text.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            Err(GenerationError::EmptyContent)
        } else if length <= self.min_content_length {
            Err(GenerationError::ContentTooShort {
                length,
                minimum: self.min_content_length,
            })
        } else {
            Ok(trimmed.to_string())
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automarketer_core::{BusinessContext, ModelSource, Platform};
    use automarketer_testing::MockProvider;

    const VALID: &str = "A perfectly reasonable marketing post.";

    fn request() -> GenerationRequest {
        GenerationRequest::new(Platform::Twitter, BusinessContext::new("Acme", "tech"))
    }

    fn scheduler() -> FanOutScheduler {
        FanOutScheduler::new(Duration::from_secs(60), 6, 20)
    }

    #[tokio::test]
    async fn test_collects_valid_results_in_declaration_order() {
        let providers: Vec<Arc<dyn ContentProvider>> = vec![
            Arc::new(
                MockProvider::new(ProviderKind::Together)
                    .with_response(VALID)
                    .with_delay(Duration::from_millis(1)),
            ),
            Arc::new(
                MockProvider::new(ProviderKind::Gemini)
                    .with_response(VALID)
                    .with_delay(Duration::from_millis(30)),
            ),
        ];

        let report = scheduler().run(&providers, &request()).await;
        let sources: Vec<_> = report.results.iter().map(|r| r.source).collect();
        assert_eq!(
            sources,
            vec![
                ModelSource::Provider(ProviderKind::Gemini),
                ModelSource::Provider(ProviderKind::Together)
            ]
        );
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let providers: Vec<Arc<dyn ContentProvider>> = vec![
            Arc::new(MockProvider::new(ProviderKind::Gemini).with_failure(
                GenerationError::Authentication("bad key".into()),
            )),
            Arc::new(MockProvider::new(ProviderKind::Groq).with_response("   ")),
            Arc::new(MockProvider::new(ProviderKind::Cohere).with_response("too short")),
            Arc::new(MockProvider::new(ProviderKind::Together).with_panic("boom")),
            Arc::new(MockProvider::new(ProviderKind::OpenRouter).with_response(VALID)),
        ];

        let report = scheduler().run(&providers, &request()).await;
        assert_eq!(report.results.len(), 1);
        assert_eq!(
            report.results[0].source,
            ModelSource::Provider(ProviderKind::OpenRouter)
        );
        assert_eq!(report.failures.len(), 4);

        let codes: Vec<_> = report
            .failures
            .iter()
            .filter_map(|f| match f {
                ProviderFailure::Failed { code, .. } => Some(*code),
                _ => None,
            })
            .collect();
        assert!(codes.contains(&"AUTHENTICATION_FAILED"));
        assert!(codes.contains(&"EMPTY_CONTENT"));
        assert!(codes.contains(&"CONTENT_TOO_SHORT"));
        assert!(report.failures.iter().any(|f| matches!(
            f,
            ProviderFailure::Panicked { provider: ProviderKind::Together, message } if message == "boom"
        )));
    }

    #[tokio::test]
    async fn test_text_is_trimmed() {
        let providers: Vec<Arc<dyn ContentProvider>> = vec![Arc::new(
            MockProvider::new(ProviderKind::Groq).with_response(format!("\n  {VALID}  \n")),
        )];
        let report = scheduler().run(&providers, &request()).await;
        assert_eq!(report.results[0].text, VALID);
    }

    #[tokio::test]
    async fn test_exactly_minimum_length_is_rejected() {
        let providers: Vec<Arc<dyn ContentProvider>> = vec![Arc::new(
            MockProvider::new(ProviderKind::Groq).with_response("a".repeat(20)),
        )];
        let report = scheduler().run(&providers, &request()).await;
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn test_no_providers_returns_immediately() {
        let report = scheduler().run(&[], &request()).await;
        assert!(report.results.is_empty());
        assert!(report.failures.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_global_budget_abandons_stragglers() {
        let providers: Vec<Arc<dyn ContentProvider>> = vec![
            Arc::new(
                MockProvider::new(ProviderKind::Gemini)
                    .with_response(VALID)
                    .with_delay(Duration::from_secs(1)),
            ),
            Arc::new(MockProvider::new(ProviderKind::Groq).never_completes()),
        ];

        let started = Instant::now();
        let report = scheduler().run(&providers, &request()).await;
        let waited = started.elapsed();

        assert_eq!(report.results.len(), 1);
        assert_eq!(
            report.results[0].source,
            ModelSource::Provider(ProviderKind::Gemini)
        );
        assert_eq!(report.abandoned(), vec![ProviderKind::Groq]);
        assert!(waited >= Duration::from_secs(60));
        assert!(waited < Duration::from_secs(61));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_width_is_bounded() {
        let providers: Vec<Arc<dyn ContentProvider>> = ProviderKind::ALL
            .into_iter()
            .map(|kind| {
                Arc::new(
                    MockProvider::new(kind)
                        .with_response(VALID)
                        .with_delay(Duration::from_secs(10)),
                ) as Arc<dyn ContentProvider>
            })
            .collect();

        let started = Instant::now();
        let report = FanOutScheduler::new(Duration::from_secs(60), 2, 20)
            .run(&providers, &request())
            .await;

        assert_eq!(report.results.len(), 6);
        // Three waves of two.
        assert!(started.elapsed() >= Duration::from_secs(30));
    }
}
