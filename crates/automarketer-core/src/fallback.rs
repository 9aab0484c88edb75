//! Fallback Generator: template content used when no provider produced a
//! usable result. Pure, deterministic and always longer than
//! [`MIN_CONTENT_LENGTH`](crate::MIN_CONTENT_LENGTH).

use crate::types::{GenerationRequest, ModelSource, Platform, ProviderResult};
use crate::FALLBACK_SCORE;
use serde_json::json;

const DEFAULT_TOPIC: &str = "amazing products";

/// Render the template text for `request`.
pub fn render(request: &GenerationRequest) -> String {
    let name = non_blank(&request.business.name, "Business");
    let industry = non_blank(&request.business.industry, "general");
    let topic = request.topic().unwrap_or(DEFAULT_TOPIC);
    let tag = hashtag(industry);

    match request.platform {
        Platform::Twitter => format!(
            "✨ Big news from {name}! Discover our {topic}. Quality you can count on 🔥 #{tag} #MustSee"
        ),
        Platform::LinkedIn => format!(
            "At {name}, we are proud to share our latest {topic}.\n\n\
             As a trusted name in {industry}, we keep delivering value to our customers. \
             Let's connect and talk about how we can help your business grow.\n\n\
             #Business #{tag}"
        ),
        Platform::Instagram => instagram(name, industry, topic, &tag),
        Platform::TikTok => format!(
            "POV: you just found {name} 👀 Our {topic} hit different. \
             Stay till the end! #{tag} #fyp #ForYou"
        ),
        Platform::Email => format!(
            "Hello!\n\n\
             We're excited to share {topic} from {name}.\n\n\
             As your {industry} partner, we're committed to bringing you the very best.\n\n\
             Take a look today!\n\n\
             Best regards,\n{name} Team"
        ),
        Platform::Blog => format!(
            "# {} - {name}\n\n\
             {name} is proud to announce {topic}. As a leading provider in {industry}, \
             we keep innovating and delivering value.\n\n\
             ## Why Choose Us?\n\n\
             Quality, trust and customer satisfaction are at the heart of what we do.\n\n\
             ## Get Started\n\n\
             Contact us today to learn more!",
            title_case(topic)
        ),
        Platform::Facebook | Platform::Other(_) => format!(
            "{name} has something new for you: {topic}! \
             Discover what makes us a favourite in {industry}. #{tag}"
        ),
    }
}

/// The synthetic result substituted when every provider failed.
pub fn generate(request: &GenerationRequest) -> ProviderResult {
    ProviderResult::new(ModelSource::Template, render(request))
        .with_score(FALLBACK_SCORE)
        .with_analysis(json!({
            "score": FALLBACK_SCORE,
            "reason": "Template-based content",
        }))
}

fn instagram(name: &str, industry: &str, topic: &str, tag: &str) -> String {
    format!(
        "✨ {} ✨\n\n{name} brings you the best in {industry}! 🔥\n\n\
         Double tap if you agree! 👇\n\n\
         #{tag} #Quality #MustHave #Trending #Viral",
        topic.to_uppercase()
    )
}

fn non_blank<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { default } else { trimmed }
}

/// Industry hashtag: the industry with all whitespace removed.
fn hashtag(industry: &str) -> String {
    industry.split_whitespace().collect()
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
