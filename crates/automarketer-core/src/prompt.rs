//! Prompt Builder: the single shared generation prompt.

use crate::types::{GenerationRequest, Platform};

const DEFAULT_TOPIC: &str = "latest products/services";

/// Style hint appended to the prompt for each platform.
pub fn platform_hint(platform: &Platform) -> &'static str {
    match platform {
        Platform::Twitter => "Keep under 280 characters. Be punchy and use 1-2 hashtags.",
        Platform::LinkedIn => "Be professional, longer form. Add value and insights.",
        Platform::Instagram => "Be visual and trendy. Use emojis and multiple hashtags.",
        Platform::TikTok => "Be fun, Gen-Z friendly, use trending phrases.",
        Platform::Email => "Be personal and include a clear call-to-action.",
        Platform::Blog => "Write detailed, SEO-friendly content with headers.",
        Platform::Facebook | Platform::Other(_) => "Be engaging and relevant.",
    }
}

/// Render the generation prompt sent to every provider.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let business = &request.business;
    let mut prompt = format!(
        "Write a {} post for {} ({}) about {}.\nLanguage: {}\n",
        request.platform.display_name(),
        business.name,
        business.industry,
        request.topic().unwrap_or(DEFAULT_TOPIC),
        request.language,
    );

    let description = business.description.trim();
    if !description.is_empty() {
        prompt.push_str("Context: ");
        prompt.push_str(description);
        prompt.push('\n');
    }

    prompt.push_str(platform_hint(&request.platform));
    prompt.push_str("\nOnly return the post content, no explanations.");
    prompt
}
