//! Property-based tests for the description sanitizer
//!
//! Tests invariants:
//! - Idempotent: sanitize(sanitize(x)) == sanitize(x)
//! - Text with no tags is never touched
//! - Plain markup without placeholders passes through unchanged

use proptest::prelude::*;

use crate::core::sheet::{sanitize, Sanitizer, SanitizerConfig};

// ============================================================================
// Strategies
// ============================================================================

/// Fragments that exercise every rewrite rule, including partial ones.
fn arb_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("@prof".to_string()),
        Just("@pr".to_string()),
        Just("of".to_string()),
        Just("format=long".to_string()),
        Just("@abilities.dex.mod".to_string()),
        Just("@skills.ste".to_string()),
        Just("&Reference[".to_string()),
        Just("&amp;Reference[".to_string()),
        Just("@UUID[".to_string()),
        Just("]".to_string()),
        Just("]{".to_string()),
        Just("}".to_string()),
        Just("=".to_string()),
        Just("<p>".to_string()),
        Just("</p>".to_string()),
        Just("<span style=\"color: red\">".to_string()),
        Just(" style=\"".to_string()),
        Just("\"".to_string()),
        "[a-zA-Z0-9 .,]{0,12}",
    ]
}

/// HTML-ish strings stitched together from fragments.
fn arb_html() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_fragment(), 0..24).prop_map(|parts| parts.concat())
}

/// Text with neither tag delimiters nor style attributes.
fn arb_tagless_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 @&\\[\\]{}=.]{0,200}"
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_sanitize_is_idempotent(html in arb_html()) {
        let once = sanitize(&html);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn prop_sanitize_with_skills_is_idempotent(html in arb_html()) {
        let sanitizer = Sanitizer::new(&SanitizerConfig {
            expand_skill_codes: true,
            strip_style_attributes: true,
        });
        let once = sanitizer.sanitize(&html);
        prop_assert_eq!(sanitizer.sanitize(&once), once);
    }

    #[test]
    fn prop_tagless_text_untouched(text in arb_tagless_text()) {
        prop_assert_eq!(sanitize(&text), text);
    }

    #[test]
    fn prop_plain_paragraphs_untouched(words in prop::collection::vec("[a-zA-Z0-9 ,.]{0,20}", 0..8)) {
        let html: String = words.iter().map(|w| format!("<p>{w}</p>")).collect();
        prop_assert_eq!(sanitize(&html), html);
    }
}
