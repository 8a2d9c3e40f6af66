//! Locale-aware string ordering for sheet sorting.
//!
//! Approximates the root-locale collation people expect from a browser's
//! `localeCompare`: comparison runs in three levels over the canonical
//! decomposition of both strings.
//!
//! 1. Primary: base characters, ignoring accents and case. Whitespace sorts
//!    before punctuation, punctuation before digits, digits before letters.
//! 2. Secondary: accents (unaccented before accented).
//! 3. Tertiary: case (lowercase before uppercase).
//!
//! Strings that are canonically equivalent compare equal; any other pair
//! that ties on all three levels is ordered by its decomposed code points so
//! the ordering stays total.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two strings with locale-aware collation.
pub fn compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let a: Vec<char> = a.nfd().collect();
    let b: Vec<char> = b.nfd().collect();

    primary_weights(&a)
        .cmp(primary_weights(&b))
        .then_with(|| secondary_weights(&a).cmp(secondary_weights(&b)))
        .then_with(|| tertiary_weights(&a).cmp(tertiary_weights(&b)))
        .then_with(|| a.cmp(&b))
}

/// Character class ordering used at the primary level.
fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn primary_weights(chars: &[char]) -> impl Iterator<Item = (u8, char)> + '_ {
    chars
        .iter()
        .copied()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn secondary_weights(chars: &[char]) -> impl Iterator<Item = char> + '_ {
    chars.iter().copied().flat_map(char::to_lowercase)
}

fn tertiary_weights(chars: &[char]) -> impl Iterator<Item = bool> + '_ {
    chars
        .iter()
        .filter(|c| !is_combining_mark(**c))
        .map(|c| c.is_uppercase())
}
