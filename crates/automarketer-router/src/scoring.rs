//! Scorer: attaches a virality score to each result.
//!
//! Analysis is an external, fallible call. Errors, timeouts, missing scores,
//! non-finite scores and scores outside `[0, 100]` all fall back to the
//! default score; scoring never fails the pipeline.

use automarketer_core::ProviderResult;
use automarketer_providers::{Analysis, ViralityAnalyzer};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Whether `score` may be used for ranking.
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score)
}

#[derive(Clone)]
pub struct Scorer {
    analyzer: Option<Arc<dyn ViralityAnalyzer>>,
    timeout: Duration,
    default_score: f64,
}

impl Scorer {
    pub fn new(
        analyzer: Option<Arc<dyn ViralityAnalyzer>>,
        timeout: Duration,
        default_score: f64,
    ) -> Self {
        Self {
            analyzer,
            timeout,
            default_score,
        }
    }

    pub fn default_score(&self) -> f64 {
        self.default_score
    }

    /// Score one text, returning the score and any rationale.
    pub async fn score(&self, text: &str) -> (f64, Option<Value>) {
        let Some(analyzer) = &self.analyzer else {
            return (self.default_score, None);
        };

        match timeout(self.timeout, analyzer.analyze(text)).await {
            Ok(Ok(Analysis {
                score: Some(score),
                rationale,
            })) if is_valid_score(score) => {
                debug!(score, "Content scored");
                (score, Some(rationale))
            }
            Ok(Ok(Analysis { score, rationale })) => {
                warn!(
                    score = ?score,
                    default_score = self.default_score,
                    "Analysis returned an unusable score, using default"
                );
                (self.default_score, Some(rationale))
            }
            Ok(Err(e)) => {
                warn!(error = %e, default_score = self.default_score, "Analysis failed, using default score");
                (self.default_score, None)
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    default_score = self.default_score,
                    "Analysis timed out, using default score"
                );
                (self.default_score, None)
            }
        }
    }

    /// Score every result concurrently, preserving order.
    pub async fn score_all(&self, results: Vec<ProviderResult>) -> Vec<ProviderResult> {
        let scores = join_all(results.iter().map(|result| self.score(&result.text))).await;

        results
            .into_iter()
            .zip(scores)
            .map(|(mut result, (score, rationale))| {
                result.score = Some(score);
                result.analysis = rationale;
                result
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automarketer_core::{GenerationError, ProviderKind};
    use automarketer_testing::MockAnalyzer;

    fn scorer(analyzer: MockAnalyzer) -> Scorer {
        Scorer::new(Some(Arc::new(analyzer)), Duration::from_secs(30), 50.0)
    }

    #[test]
    fn test_is_valid_score() {
        assert!(is_valid_score(0.0));
        assert!(is_valid_score(100.0));
        assert!(!is_valid_score(100.5));
        assert!(!is_valid_score(-1.0));
        assert!(!is_valid_score(f64::NAN));
        assert!(!is_valid_score(f64::INFINITY));
    }

    #[tokio::test]
    async fn test_uses_analyzer_score() {
        let (score, rationale) = scorer(MockAnalyzer::new().with_default_score(70.0))
            .score("text")
            .await;
        assert_eq!(score, 70.0);
        assert!(rationale.is_some());
    }

    #[tokio::test]
    async fn test_out_of_range_scores_fall_back() {
        for bad in [150.0, -3.0, f64::NAN, f64::INFINITY] {
            let (score, _) = scorer(MockAnalyzer::new().with_default_score(bad))
                .score("text")
                .await;
            assert_eq!(score, 50.0, "score {bad} should fall back");
        }
    }

    #[tokio::test]
    async fn test_missing_score_falls_back() {
        let analyzer = MockAnalyzer::new().with_analysis(
            "text",
            Analysis {
                score: None,
                rationale: serde_json::json!({ "score": "viral!" }),
            },
        );
        let (score, rationale) = scorer(analyzer).score("text").await;
        assert_eq!(score, 50.0);
        assert_eq!(rationale.unwrap()["score"], "viral!");
    }

    #[tokio::test]
    async fn test_analyzer_error_falls_back() {
        let analyzer =
            MockAnalyzer::new().with_failure(GenerationError::RateLimited("slow down".into()));
        let (score, rationale) = scorer(analyzer).score("text").await;
        assert_eq!(score, 50.0);
        assert!(rationale.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyzer_timeout_falls_back() {
        let analyzer = MockAnalyzer::new()
            .with_default_score(99.0)
            .with_delay(Duration::from_secs(120));
        let (score, _) = scorer(analyzer).score("text").await;
        assert_eq!(score, 50.0);
    }

    #[tokio::test]
    async fn test_without_analyzer_everything_gets_default() {
        let scorer = Scorer::new(None, Duration::from_secs(1), 42.0);
        let scored = scorer
            .score_all(vec![
                ProviderResult::new(ProviderKind::Gemini, "one"),
                ProviderResult::new(ProviderKind::Groq, "two"),
            ])
            .await;
        assert!(scored.iter().all(|r| r.score == Some(42.0)));
    }

    #[tokio::test]
    async fn test_score_all_preserves_order() {
        let analyzer = MockAnalyzer::new()
            .with_score("first text", 10.0)
            .with_score("second text", 90.0);
        let scored = scorer(analyzer)
            .score_all(vec![
                ProviderResult::new(ProviderKind::Gemini, "first text"),
                ProviderResult::new(ProviderKind::Groq, "second text"),
            ])
            .await;
        assert_eq!(scored[0].score, Some(10.0));
        assert_eq!(scored[1].score, Some(90.0));
    }
}
