use regex::Regex;
use std::sync::OnceLock;

/// Strips presentation artifacts from language-model output.
///
/// This is a best-effort cleanup, not an HTML sanitizer: it removes emphasis
/// markers (`**`, `*`, backticks) and anything shaped like a tag (`<...>`),
/// and trims the result. It does not escape entities, and text that only
/// becomes markup after rendering is left alone. Do not treat the output as
/// safe for raw HTML injection.
pub struct ResponseCleaner {
    emphasis_pattern: Regex,
    tag_pattern: Regex,
}

impl Default for ResponseCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseCleaner {
    pub fn new() -> Self {
        Self {
            emphasis_pattern: Regex::new(r"\*\*|\*|`").unwrap(),
            tag_pattern: Regex::new(r"<[^>]+>").unwrap(),
        }
    }

    pub fn clean(&self, text: &str) -> String {
        let without_emphasis = self.emphasis_pattern.replace_all(text, "");
        let without_tags = self.tag_pattern.replace_all(&without_emphasis, "");
        without_tags.trim().to_string()
    }
}

/// Clean model output with a shared [`ResponseCleaner`]. See its docs for the limits.
pub fn clean_response(text: &str) -> String {
    static CLEANER: OnceLock<ResponseCleaner> = OnceLock::new();
    CLEANER.get_or_init(ResponseCleaner::new).clean(text)
}
