//! Section sort orders.
//!
//! Every sort is stable: items whose keys tie keep their document order.
//! Fields that are missing or do not parse never fail a sort; they fall back
//! to an empty prefix, an absent number, the last spell rank or an empty
//! string.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use super::collation;
use super::types::{RawItem, Section};

/// `<prefix><number?> <(qualifier)?>`, e.g. "Level 2 (Fighter)".
static REQUIREMENTS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)([0-9]+)?\s*(\(.*\))?$").expect("valid requirements regex")
});

/// "1st Level", "2nd Level", "3rd Level", "4th Level", ...
static SPELL_LEVEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)(?:st|nd|rd|th) Level$").expect("valid spell level regex")
});

/// Rank for spell levels that are neither "Cantrip" nor "<N>th Level".
pub const UNRANKED_SPELL_LEVEL: u64 = u64::MAX;

// ============================================================================
// Features
// ============================================================================

/// Sort key parsed from a feature's `requirements`.
///
/// `number` keeps the ASCII digit run as written, so arbitrarily long
/// numbers still order correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequirementKey<'a> {
    pub prefix: &'a str,
    pub number: Option<&'a str>,
}

/// Numeric order of two ASCII digit strings of any length.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

pub fn parse_requirements(requirements: &str) -> RequirementKey<'_> {
    let Some(caps) = REQUIREMENTS_PATTERN.captures(requirements) else {
        return RequirementKey::default();
    };

    RequirementKey {
        prefix: caps.get(1).map_or("", |m| m.as_str().trim()),
        number: caps.get(2).map(|m| m.as_str()),
    }
}

pub fn compare_features(a: &RawItem, b: &RawItem) -> Ordering {
    let a_req = a.requirements().unwrap_or_default();
    let b_req = b.requirements().unwrap_or_default();
    let a_key = parse_requirements(a_req);
    let b_key = parse_requirements(b_req);

    // Prefixes that collate equal (e.g. NFC vs NFD spellings) are the same prefix.
    let by_prefix = collation::compare(a_key.prefix, b_key.prefix);
    if by_prefix != Ordering::Equal {
        return by_prefix;
    }

    match (a_key.number, b_key.number) {
        (Some(a_num), Some(b_num)) => compare_digits(a_num, b_num),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => collation::compare(a_req, b_req),
    }
}

// ============================================================================
// Physical Items
// ============================================================================

pub fn compare_physical(a: &RawItem, b: &RawItem) -> Ordering {
    // Attuned items first.
    b.requires_attunement()
        .cmp(&a.requires_attunement())
        .then_with(|| {
            collation::compare(
                a.combined_label().unwrap_or_default(),
                b.combined_label().unwrap_or_default(),
            )
        })
        .then_with(|| collation::compare(a.name(), b.name()))
}

// ============================================================================
// Spells
// ============================================================================

/// "Cantrip" is 0, "<N>th Level" is N, anything else sorts last.
///
/// Levels too large for `u64` rank just before the unranked ones.
pub fn spell_level_rank(level: &str) -> u64 {
    if level == "Cantrip" {
        return 0;
    }

    match SPELL_LEVEL_PATTERN.captures(level) {
        Some(caps) => caps[1].parse().unwrap_or(UNRANKED_SPELL_LEVEL - 1),
        None => UNRANKED_SPELL_LEVEL,
    }
}

pub fn compare_spells(a: &RawItem, b: &RawItem) -> Ordering {
    let a_rank = a.spell_level().map_or(UNRANKED_SPELL_LEVEL, spell_level_rank);
    let b_rank = b.spell_level().map_or(UNRANKED_SPELL_LEVEL, spell_level_rank);

    a_rank
        .cmp(&b_rank)
        .then_with(|| {
            collation::compare(
                a.spell_school().unwrap_or_default(),
                b.spell_school().unwrap_or_default(),
            )
        })
        .then_with(|| collation::compare(a.name(), b.name()))
}

// ============================================================================
// Dispatch
// ============================================================================

/// Comparator for a section, `None` for sections kept in document order.
pub fn comparator(section: Section) -> Option<fn(&RawItem, &RawItem) -> Ordering> {
    match section {
        Section::Feature => Some(compare_features),
        Section::Physical => Some(compare_physical),
        Section::Spell => Some(compare_spells),
        Section::Building | Section::Effect | Section::JournalPage => None,
    }
}

/// Stable in-place sort of one section's items.
pub fn sort_section(section: Section, items: &mut [RawItem]) {
    if let Some(compare) = comparator(section) {
        items.sort_by(compare);
    }
}

/// Sorted copy of one section's items; the input is left untouched.
pub fn sorted_section(section: Section, items: &[RawItem]) -> Vec<RawItem> {
    let mut sorted = items.to_vec();
    sort_section(section, &mut sorted);
    sorted
}
