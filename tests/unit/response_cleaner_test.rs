use primal_fit::services::clean_response;
use proptest::prelude::*;

proptest! {
    #[test]
    fn cleaned_text_has_no_emphasis_markers(text in ".{0,200}") {
        let cleaned = clean_response(&text);

        prop_assert!(!cleaned.contains('*'));
        prop_assert!(!cleaned.contains('`'));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn text_without_markup_is_only_trimmed(text in "[a-zA-Z0-9 ,.:\n-]{0,200}") {
        prop_assert_eq!(clean_response(&text), text.trim());
    }

    #[test]
    fn tags_are_removed_from_surrounding_text(
        before in "[a-z ]{0,30}",
        tag in "[a-z]{1,8}",
        after in "[a-z ]{0,30}",
    ) {
        let text = format!("{}<{}>{}</{}>", before, tag, after, tag);

        let expected = format!("{}{}", before, after);
        prop_assert_eq!(clean_response(&text), expected.trim());
    }
}

#[test]
fn test_cleans_typical_model_output() {
    let raw = "\n**Day 1:** Push Ups, `Plank`\n<br>• *Squats*: Legs\n";

    assert_eq!(clean_response(raw), "Day 1: Push Ups, Plank\n• Squats: Legs");
}
