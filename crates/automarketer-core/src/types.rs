//! Domain types shared by every stage of the generation pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Target publishing platform.
///
/// Parsing is case-insensitive and never fails: unknown names become
/// [`Platform::Other`] so downstream stages can still pass the text through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Twitter,
    LinkedIn,
    Instagram,
    TikTok,
    Email,
    Blog,
    Facebook,
    Other(String),
}

impl Platform {
    /// Every named platform, excluding [`Platform::Other`].
    pub const KNOWN: [Platform; 7] = [
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::Instagram,
        Platform::TikTok,
        Platform::Email,
        Platform::Blog,
        Platform::Facebook,
    ];

    /// Parse a platform name.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "twitter" | "x" => Platform::Twitter,
            "linkedin" => Platform::LinkedIn,
            "instagram" => Platform::Instagram,
            "tiktok" => Platform::TikTok,
            "email" => Platform::Email,
            "blog" => Platform::Blog,
            "facebook" => Platform::Facebook,
            _ => Platform::Other(name.trim().to_string()),
        }
    }

    /// Stable lowercase identifier, also used by the publishing APIs.
    pub fn id(&self) -> &str {
        match self {
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::Email => "email",
            Platform::Blog => "blog",
            Platform::Facebook => "facebook",
            Platform::Other(name) => name,
        }
    }

    /// Human-readable name used in prompts.
    pub fn display_name(&self) -> &str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Email => "Email",
            Platform::Blog => "Blog",
            Platform::Facebook => "Facebook",
            Platform::Other(name) => name,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Platform::parse(s))
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        Platform::parse(&value)
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.id().to_string()
    }
}

/// The business a post is written for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessContext {
    pub name: String,
    pub industry: String,
    pub description: String,
}

impl Default for BusinessContext {
    fn default() -> Self {
        Self {
            name: "Business".to_string(),
            industry: "general".to_string(),
            description: String::new(),
        }
    }
}

impl BusinessContext {
    pub fn new(name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

fn default_language() -> String {
    "English".to_string()
}

/// A single content request, shared read-only by every provider adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub platform: Platform,
    #[serde(default)]
    pub business: BusinessContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl GenerationRequest {
    pub fn new(platform: Platform, business: BusinessContext) -> Self {
        Self {
            platform,
            business,
            topic: None,
            language: default_language(),
        }
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        self.topic = if topic.trim().is_empty() {
            None
        } else {
            Some(topic)
        };
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Topic with blank values treated as absent.
    pub fn topic(&self) -> Option<&str> {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
    }
}

/// Registered text-generation providers, in declaration order.
///
/// Declaration order is the tie-break order used when two results share the
/// highest score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini = 0,
    HuggingFace = 1,
    Groq = 2,
    Cohere = 3,
    Together = 4,
    OpenRouter = 5,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 6] = [
        ProviderKind::Gemini,
        ProviderKind::HuggingFace,
        ProviderKind::Groq,
        ProviderKind::Cohere,
        ProviderKind::Together,
        ProviderKind::OpenRouter,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::Groq => "groq",
            ProviderKind::Cohere => "cohere",
            ProviderKind::Together => "together",
            ProviderKind::OpenRouter => "openrouter",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn env_var(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GOOGLE_API_KEY",
            ProviderKind::HuggingFace => "HUGGINGFACE_API_KEY",
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::Cohere => "COHERE_API_KEY",
            ProviderKind::Together => "TOGETHER_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// Position in [`ProviderKind::ALL`].
    pub fn declaration_index(self) -> usize {
        self as usize
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id.trim()))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Where a piece of content came from. Serialized as its identifier string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ModelSource {
    Provider(ProviderKind),
    Template,
}

impl ModelSource {
    pub fn id(self) -> &'static str {
        match self {
            ModelSource::Provider(kind) => kind.id(),
            ModelSource::Template => "template",
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl From<ModelSource> for String {
    fn from(value: ModelSource) -> Self {
        value.id().to_string()
    }
}

impl TryFrom<String> for ModelSource {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("template") {
            return Ok(ModelSource::Template);
        }
        ProviderKind::from_id(&value)
            .map(ModelSource::Provider)
            .ok_or_else(|| format!("unknown content source '{value}'"))
    }
}

impl From<ProviderKind> for ModelSource {
    fn from(kind: ProviderKind) -> Self {
        ModelSource::Provider(kind)
    }
}

/// Text produced by one provider (or the template fallback) for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    #[serde(rename = "model")]
    pub source: ModelSource,
    #[serde(rename = "content")]
    pub text: String,
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
}

impl ProviderResult {
    /// An unscored result.
    pub fn new(source: impl Into<ModelSource>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            score: None,
            analysis: None,
        }
    }

    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    #[must_use]
    pub fn with_analysis(mut self, analysis: Value) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Score used for ranking; unscored results rank at the default score.
    pub fn effective_score(&self) -> f64 {
        self.score.unwrap_or(crate::DEFAULT_SCORE)
    }

    /// Sort key for tie-breaking: providers in declaration order, the template last.
    pub fn declaration_index(&self) -> usize {
        match self.source {
            ModelSource::Provider(kind) => kind.declaration_index(),
            ModelSource::Template => ProviderKind::ALL.len(),
        }
    }
}

/// One line of the transparency list returned with every outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub model: ModelSource,
    pub score: f64,
}

/// The ranked result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOutcome {
    pub success: bool,
    /// Winning text after platform formatting.
    pub best_content: String,
    pub best_model: ModelSource,
    pub best_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_analysis: Option<Value>,
    /// Every ranked result, best first, with unformatted text.
    pub all_results: Vec<ProviderResult>,
    pub comparison: Vec<ComparisonEntry>,
}

impl RankedOutcome {
    /// Whether the outcome came from the template fallback.
    pub fn is_fallback(&self) -> bool {
        self.best_model == ModelSource::Template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_platform_parse_is_case_insensitive() {
        assert_eq!(Platform::parse("Twitter"), Platform::Twitter);
        assert_eq!(Platform::parse("X"), Platform::Twitter);
        assert_eq!(Platform::parse(" LINKEDIN "), Platform::LinkedIn);
        assert_eq!(Platform::parse("tiktok"), Platform::TikTok);
        assert_eq!(
            Platform::parse("Mastodon"),
            Platform::Other("Mastodon".to_string())
        );
    }

    #[test]
    fn test_platform_serde() {
        let encoded = serde_json::to_value(Platform::LinkedIn).unwrap();
        assert_eq!(encoded, json!("linkedin"));

        let decoded: Platform = serde_json::from_value(json!("Instagram")).unwrap();
        assert_eq!(decoded, Platform::Instagram);
    }

    #[test]
    fn test_provider_kind_declaration_order() {
        let ids: Vec<_> = ProviderKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(
            ids,
            ["gemini", "huggingface", "groq", "cohere", "together", "openrouter"]
        );
        for (index, kind) in ProviderKind::ALL.iter().enumerate() {
            assert_eq!(kind.declaration_index(), index);
        }
    }

    #[test]
    fn test_provider_kind_env_vars() {
        assert_eq!(ProviderKind::Gemini.env_var(), "GOOGLE_API_KEY");
        assert_eq!(ProviderKind::OpenRouter.env_var(), "OPENROUTER_API_KEY");
        assert_eq!(ProviderKind::from_id("Groq"), Some(ProviderKind::Groq));
        assert_eq!(ProviderKind::from_id("gpt"), None);
    }

    #[test]
    fn test_content_source_serializes_as_id() {
        assert_eq!(
            serde_json::to_value(ModelSource::Template).unwrap(),
            json!("template")
        );
        assert_eq!(
            serde_json::to_value(ModelSource::Provider(ProviderKind::Cohere)).unwrap(),
            json!("cohere")
        );
        let decoded: ModelSource = serde_json::from_value(json!("together")).unwrap();
        assert_eq!(decoded, ModelSource::Provider(ProviderKind::Together));
        assert!(serde_json::from_value::<ModelSource>(json!("nope")).is_err());
    }

    #[test]
    fn test_request_defaults_from_json() {
        let request: GenerationRequest =
            serde_json::from_value(json!({ "platform": "instagram" })).unwrap();
        assert_eq!(request.platform, Platform::Instagram);
        assert_eq!(request.business.name, "Business");
        assert_eq!(request.business.industry, "general");
        assert_eq!(request.language, "English");
        assert_eq!(request.topic(), None);
    }

    #[test]
    fn test_blank_topic_is_absent() {
        let request = GenerationRequest::new(Platform::Blog, BusinessContext::default())
            .with_topic("   ");
        assert_eq!(request.topic(), None);
    }

    #[test]
    fn test_template_sorts_after_providers() {
        let template = ProviderResult::new(ModelSource::Template, "x");
        let openrouter = ProviderResult::new(ProviderKind::OpenRouter, "x");
        assert!(template.declaration_index() > openrouter.declaration_index());
        assert_eq!(template.effective_score(), crate::DEFAULT_SCORE);
    }
}
