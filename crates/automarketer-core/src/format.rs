//! Platform Formatter.
//!
//! Post-processes the winning text so it satisfies per-platform constraints.
//! Every transform is pure and lengths are measured in Unicode scalar values,
//! so multi-byte text is never split inside a character.
//!
//! | Platform  | Transform                                                      |
//! |-----------|----------------------------------------------------------------|
//! | Twitter   | cap at 280: cut at the last sentence end past 200, else `...`  |
//! | LinkedIn  | capitalize unless it opens with a professional opener          |
//! | Instagram | append default hashtags when none are present                  |
//! | others    | unchanged                                                      |

use crate::types::Platform;

/// Maximum tweet length.
pub const TWITTER_MAX_CHARS: usize = 280;

/// Length kept before appending an ellipsis.
const TWITTER_CUT_CHARS: usize = TWITTER_MAX_CHARS - 3;

/// A period must sit past this index to be used as the cut point.
const TWITTER_MIN_SENTENCE_END: usize = 200;

const LINKEDIN_OPENERS: [&str; 5] = ["We", "At", "I", "Our", "The"];

pub const INSTAGRAM_DEFAULT_HASHTAGS: &str = "\n\n#marketing #business #trending";

/// Apply the platform's formatting rules to `text`.
pub fn format_for_platform(text: &str, platform: &Platform) -> String {
    match platform {
        Platform::Twitter => truncate_for_twitter(text),
        Platform::LinkedIn => capitalize_for_linkedin(text),
        Platform::Instagram => ensure_hashtags(text),
        _ => text.to_string(),
    }
}

/// Shorten text longer than [`TWITTER_MAX_CHARS`].
///
/// The first 277 characters are kept. If the last period among them sits
/// past index 200 the text ends there (inclusive); otherwise the 277
/// characters are followed by `...`. Idempotent, since the output never
/// exceeds 280 characters.
pub fn truncate_for_twitter(text: &str) -> String {
    if text.chars().count() <= TWITTER_MAX_CHARS {
        return text.to_string();
    }

    let head: Vec<char> = text.chars().take(TWITTER_CUT_CHARS).collect();
    let last_sentence_end = head.iter().rposition(|&c| c == '.');

    match last_sentence_end {
        Some(index) if index > TWITTER_MIN_SENTENCE_END => head[..=index].iter().collect(),
        _ => {
            let mut truncated: String = head.into_iter().collect();
            truncated.push_str("...");
            truncated
        }
    }
}

/// Capitalize the first letter unless the text opens with `We`, `At`, `I`,
/// `Our` or `The`.
pub fn capitalize_for_linkedin(text: &str) -> String {
    if LINKEDIN_OPENERS
        .iter()
        .any(|opener| text.starts_with(opener))
    {
        return text.to_string();
    }

    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Append [`INSTAGRAM_DEFAULT_HASHTAGS`] when the text has no `#` at all.
pub fn ensure_hashtags(text: &str) -> String {
    if text.contains('#') {
        text.to_string()
    } else {
        format!("{text}{INSTAGRAM_DEFAULT_HASHTAGS}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn with_boundary_at(index: usize, len: usize) -> String {
        (0..len)
            .map(|i| if i == index { '.' } else { 'a' })
            .collect()
    }

    #[test]
    fn test_twitter_short_text_unchanged() {
        let text = "Fresh bread every morning. #bakery";
        assert_eq!(truncate_for_twitter(text), text);
    }

    #[test]
    fn test_twitter_exactly_280_unchanged() {
        let text = "a".repeat(280);
        assert_eq!(truncate_for_twitter(&text), text);
    }

    #[test]
    fn test_twitter_cuts_at_sentence_end_past_200() {
        let text = with_boundary_at(210, 300);
        let out = truncate_for_twitter(&text);
        assert_eq!(out.chars().count(), 211);
        assert!(out.ends_with('.'));
    }

    #[test]
    fn test_twitter_hard_cut_without_late_boundary() {
        let text = with_boundary_at(150, 300);
        let out = truncate_for_twitter(&text);
        assert_eq!(out.chars().count(), 280);
        assert!(out.ends_with("..."));
        assert!(out.starts_with(&text[..277]));
    }

    #[test]
    fn test_twitter_boundary_exactly_at_200_is_not_used() {
        let text = with_boundary_at(200, 300);
        let out = truncate_for_twitter(&text);
        assert_eq!(out.chars().count(), 280);
    }

    #[test]
    fn test_twitter_only_periods_end_a_sentence() {
        let mut chars: Vec<char> = "b".repeat(300).chars().collect();
        chars[230] = '!';
        chars[240] = '?';
        let text: String = chars.into_iter().collect();
        let out = truncate_for_twitter(&text);
        assert_eq!(out.chars().count(), 280);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_twitter_counts_characters_not_bytes() {
        let text = "é".repeat(300);
        let out = truncate_for_twitter(&text);
        assert_eq!(out.chars().count(), 280);
    }

    #[rstest]
    #[case("great things ahead", "Great things ahead")]
    #[case("We are hiring", "We are hiring")]
    #[case("The future of finance", "The future of finance")]
    #[case("Our team grew", "Our team grew")]
    #[case("", "")]
    fn test_linkedin_capitalization(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalize_for_linkedin(input), expected);
    }

    #[test]
    fn test_instagram_hashtags() {
        assert_eq!(
            ensure_hashtags("Look at this"),
            "Look at this\n\n#marketing #business #trending"
        );
        assert_eq!(ensure_hashtags("Look #wow"), "Look #wow");
    }

    #[test]
    fn test_other_platforms_pass_through() {
        let text = "plain text without changes";
        for platform in [
            Platform::Email,
            Platform::Blog,
            Platform::Facebook,
            Platform::TikTok,
            Platform::Other("mastodon".into()),
        ] {
            assert_eq!(format_for_platform(text, &platform), text);
        }
    }
}
