//! Selector: ranks scored results and picks the best.
//!
//! Results are first ordered by declaration index, then stable-sorted by score
//! descending, so equal scores keep the first-declared provider on top. An
//! empty input is replaced by the template fallback.

use automarketer_core::{
    fallback, ComparisonEntry, GenerationRequest, ModelSource, ProviderResult,
};
use tracing::info;

/// The ranking of one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// All results, best first. Never empty.
    pub ranked: Vec<ProviderResult>,
    pub comparison: Vec<ComparisonEntry>,
}

impl Selection {
    pub fn best(&self) -> &ProviderResult {
        // `rank` guarantees at least one entry.
        &self.ranked[0]
    }

    pub fn is_fallback(&self) -> bool {
        self.ranked.len() == 1 && self.best().source == ModelSource::Template
    }
}

/// Rank `results`, substituting the fallback for an empty batch.
pub fn rank(mut results: Vec<ProviderResult>, request: &GenerationRequest) -> Selection {
    if results.is_empty() {
        info!(platform = %request.platform, "No provider produced usable content, using template");
        results.push(fallback::generate(request));
    }

    results.sort_by_key(ProviderResult::declaration_index);
    results.sort_by(|a, b| b.effective_score().total_cmp(&a.effective_score()));

    let comparison = results
        .iter()
        .map(|r| ComparisonEntry {
            model: r.source,
            score: r.effective_score(),
        })
        .collect();

    Selection {
        ranked: results,
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automarketer_core::{BusinessContext, Platform, ProviderKind};

    fn request() -> GenerationRequest {
        GenerationRequest::new(Platform::LinkedIn, BusinessContext::new("Acme", "tech"))
    }

    fn scored(kind: ProviderKind, score: f64) -> ProviderResult {
        ProviderResult::new(kind, format!("content from {kind}")).with_score(score)
    }

    #[test]
    fn test_highest_score_wins() {
        let selection = rank(
            vec![
                scored(ProviderKind::Gemini, 40.0),
                scored(ProviderKind::Cohere, 88.0),
                scored(ProviderKind::Groq, 71.5),
            ],
            &request(),
        );
        assert_eq!(selection.best().source, ModelSource::Provider(ProviderKind::Cohere));
        let scores: Vec<_> = selection.comparison.iter().map(|c| c.score).collect();
        assert_eq!(scores, vec![88.0, 71.5, 40.0]);
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        // Input order deliberately reversed.
        let selection = rank(
            vec![
                scored(ProviderKind::OpenRouter, 75.0),
                scored(ProviderKind::Together, 60.0),
                scored(ProviderKind::HuggingFace, 75.0),
            ],
            &request(),
        );
        assert_eq!(
            selection.best().source,
            ModelSource::Provider(ProviderKind::HuggingFace)
        );
        assert_eq!(
            selection.ranked[1].source,
            ModelSource::Provider(ProviderKind::OpenRouter)
        );
    }

    #[test]
    fn test_empty_batch_uses_template() {
        let selection = rank(Vec::new(), &request());
        assert!(selection.is_fallback());
        assert_eq!(selection.best().score, Some(60.0));
        assert_eq!(selection.comparison.len(), 1);
        assert_eq!(selection.comparison[0].model, ModelSource::Template);
    }
}
