//! Property-based tests for the section sort orders
//!
//! Tests invariants:
//! - Sorting returns a permutation of its input
//! - Adjacent output items are in comparator order
//! - Items with identical keys keep their input order
//! - Sorting is idempotent

use std::cmp::Ordering;

use proptest::prelude::*;
use serde_json::json;

use crate::core::sheet::sorters::{comparator, sorted_section};
use crate::core::sheet::{RawItem, Section};

// ============================================================================
// Strategies
// ============================================================================

fn arb_requirements() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Background".to_string()),
        Just("Feat".to_string()),
        (1u32..20).prop_map(|n| format!("Level {n}")),
        (1u32..20).prop_map(|n| format!("Level {n} (Fighter)")),
        (1u32..20).prop_map(|n| format!("Wizard {n}")),
        "[A-Za-z ]{0,10}",
    ]
}

fn arb_spell_level() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Cantrip".to_string()),
        Just("Ritual".to_string()),
        (1u32..10).prop_map(|n| {
            let suffix = match n {
                1 => "st",
                2 => "nd",
                3 => "rd",
                _ => "th",
            };
            format!("{n}{suffix} Level")
        }),
    ]
}

fn arb_word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Abjuration".to_string()),
        Just("evocation".to_string()),
        Just("Évocation".to_string()),
        Just("Ring".to_string()),
        Just("ring".to_string()),
        "[A-Za-z]{0,6}",
    ]
}

/// Items of one section, each tagged with its input position as `id`.
fn arb_items(section: Section) -> impl Strategy<Value = Vec<RawItem>> {
    let item = (arb_requirements(), arb_spell_level(), arb_word(), arb_word(), any::<bool>());
    prop::collection::vec(item, 0..30).prop_map(move |rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (requirements, level, school, name, attuned))| {
                let value = match section {
                    Section::Feature => json!({"id": id, "name": name, "requirements": requirements}),
                    Section::Spell => json!({
                        "id": id,
                        "name": name,
                        "spellLevel": level,
                        "spellSchool": school
                    }),
                    _ => json!({
                        "id": id,
                        "name": name,
                        "combinedLabel": school,
                        "attunementLabel": if attuned { "Requires Attunement" } else { "" }
                    }),
                };
                serde_json::from_value(value).unwrap()
            })
            .collect()
    })
}

fn arb_section_items() -> impl Strategy<Value = (Section, Vec<RawItem>)> {
    prop_oneof![
        Just(Section::Feature),
        Just(Section::Physical),
        Just(Section::Spell),
    ]
    .prop_flat_map(|section| (Just(section), arb_items(section)))
}

fn id(item: &RawItem) -> u64 {
    item.get("id").and_then(|v| v.as_u64()).unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_sort_is_permutation((section, items) in arb_section_items()) {
        let sorted = sorted_section(section, &items);
        let mut ids: Vec<u64> = sorted.iter().map(id).collect();
        ids.sort_unstable();
        let expected: Vec<u64> = (0..items.len() as u64).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_sorted_output_is_ordered_and_stable((section, items) in arb_section_items()) {
        let compare = comparator(section).unwrap();
        let sorted = sorted_section(section, &items);
        for pair in sorted.windows(2) {
            match compare(&pair[0], &pair[1]) {
                Ordering::Less => {}
                Ordering::Equal => prop_assert!(id(&pair[0]) < id(&pair[1])),
                Ordering::Greater => prop_assert!(false, "items out of order"),
            }
        }
    }

    #[test]
    fn prop_sort_is_idempotent((section, items) in arb_section_items()) {
        let once = sorted_section(section, &items);
        let twice = sorted_section(section, &once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_attuned_items_come_first(items in arb_items(Section::Physical)) {
        let sorted = sorted_section(Section::Physical, &items);
        let first_unattuned = sorted
            .iter()
            .position(|item| !item.requires_attunement())
            .unwrap_or(sorted.len());
        prop_assert!(sorted[first_unattuned..].iter().all(|item| !item.requires_attunement()));
    }
}
