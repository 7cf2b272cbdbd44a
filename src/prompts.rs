//! Fixed user-visible strings, kept as data files so wording survives a
//! rewrite untouched. Both are Russian-language by product decision.

/// System preamble prepended to single-message text requests.
pub const CHAT_SYSTEM: &str = include_str!("../data/prompts/chat_system.txt");

/// Placeholder answer for video mode, which has no upstream API.
pub const VIDEO_UNAVAILABLE: &str = include_str!("../data/prompts/video_unavailable.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!CHAT_SYSTEM.is_empty());
        assert!(!VIDEO_UNAVAILABLE.is_empty());
    }

    #[test]
    fn test_prompts_have_no_trailing_whitespace() {
        assert_eq!(CHAT_SYSTEM, CHAT_SYSTEM.trim());
        assert_eq!(VIDEO_UNAVAILABLE, VIDEO_UNAVAILABLE.trim());
    }
}
