//! Description Sanitizer
//!
//! Rewrites enricher references embedded in exported rich-text descriptions
//! into plain text. Only text between tags is rewritten; tag structure and
//! attributes are left alone, except that inline `style="..."` attributes are
//! stripped everywhere.
//!
//! Replacement order within each text segment:
//!
//! 1. Static placeholders (`@prof`, `@abilities.str.mod`, optional skill codes,
//!    `format=long`) in a single left-to-right pass.
//! 2. `&Reference[...]{label}` becomes `label`.
//! 3. `&Reference[ref]` becomes `ref`, or the text after its last `=`.
//! 4. `@UUID[...]{label}` becomes `label`.
//!
//! Text segments are found with a regex over `>...<`, so a literal `<` or `>`
//! inside an attribute value will misplace segment boundaries.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

// ============================================================================
// Replacement Tables
// ============================================================================

const CORE_REPLACEMENTS: &[(&str, &str)] = &[
    ("format=long", ""),
    ("@prof", "proficiency bonus"),
    ("@abilities.str.mod", "Strength modifier"),
    ("@abilities.dex.mod", "Dexterity modifier"),
    ("@abilities.con.mod", "Constitution modifier"),
    ("@abilities.int.mod", "Intelligence modifier"),
    ("@abilities.wis.mod", "Wisdom modifier"),
    ("@abilities.cha.mod", "Charisma modifier"),
];

const SKILL_REPLACEMENTS: &[(&str, &str)] = &[
    ("@skills.acr", "Acrobatics"),
    ("@skills.ani", "Animal Handling"),
    ("@skills.arc", "Arcana"),
    ("@skills.ath", "Athletics"),
    ("@skills.dec", "Deception"),
    ("@skills.his", "History"),
    ("@skills.ins", "Insight"),
    ("@skills.itm", "Intimidation"),
    ("@skills.inv", "Investigation"),
    ("@skills.med", "Medicine"),
    ("@skills.nat", "Nature"),
    ("@skills.prc", "Perception"),
    ("@skills.prf", "Performance"),
    ("@skills.per", "Persuasion"),
    ("@skills.rel", "Religion"),
    ("@skills.slt", "Sleight of Hand"),
    ("@skills.ste", "Stealth"),
    ("@skills.sur", "Survival"),
];

// ============================================================================
// Patterns
// ============================================================================

/// Text between a `>` and the next `<`, delimiters included.
static TEXT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">[^<]*<").expect("valid text segment regex"));

/// `&Reference[...]{label}`; the ampersand may arrive HTML-escaped.
static REFERENCE_WITH_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:amp;)?Reference\[[^\]]+\]\{([^}]+)\}").expect("valid reference regex")
});

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:amp;)?Reference\[([^\]]+)\]").expect("valid reference regex")
});

static UUID_WITH_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@UUID\[[^\]]+\]\{([^}]+)\}").expect("valid uuid regex")
});

static STYLE_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s*style="[^"]*""#).expect("valid style regex"));

static DEFAULT_SANITIZER: LazyLock<Sanitizer> =
    LazyLock::new(|| Sanitizer::new(&SanitizerConfig::default()));

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Rewrite `@skills.<code>` placeholders to skill names.
    pub expand_skill_codes: bool,
    /// Remove inline `style` attributes from every tag.
    pub strip_style_attributes: bool,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            expand_skill_codes: false,
            strip_style_attributes: true,
        }
    }
}

// ============================================================================
// Sanitizer
// ============================================================================

/// Compiled description sanitizer.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    placeholders: Regex,
    replacements: HashMap<&'static str, &'static str>,
    strip_style_attributes: bool,
}

impl Sanitizer {
    pub fn new(config: &SanitizerConfig) -> Self {
        let mut table: Vec<(&'static str, &'static str)> = CORE_REPLACEMENTS.to_vec();
        if config.expand_skill_codes {
            table.extend_from_slice(SKILL_REPLACEMENTS);
        }

        let alternation = table
            .iter()
            .map(|(pattern, _)| regex::escape(pattern))
            .collect::<Vec<_>>()
            .join("|");
        let placeholders = Regex::new(&alternation).expect("escaped literals form a valid regex");

        Self {
            placeholders,
            replacements: table.into_iter().collect(),
            strip_style_attributes: config.strip_style_attributes,
        }
    }

    /// Sanitize an HTML fragment.
    ///
    /// The rewrite is repeated until nothing changes, so the result is a fixed
    /// point. Every productive pass either removes an `@`/`&` marker or
    /// shortens the text without adding one, which bounds the loop.
    pub fn sanitize(&self, html: &str) -> String {
        let mut current = self.sanitize_once(html);
        loop {
            let next = self.sanitize_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn sanitize_once(&self, html: &str) -> String {
        let rewritten = TEXT_SEGMENT.replace_all(html, |caps: &Captures| {
            let segment = &caps[0];
            let inner = &segment[1..segment.len() - 1];
            format!(">{}<", self.rewrite_text(inner))
        });

        if self.strip_style_attributes {
            STYLE_ATTRIBUTE.replace_all(&rewritten, "").into_owned()
        } else {
            rewritten.into_owned()
        }
    }

    fn rewrite_text(&self, text: &str) -> String {
        let text = self.placeholders.replace_all(text, |caps: &Captures| {
            self.replacements.get(&caps[0]).copied().unwrap_or_default()
        });

        let text = REFERENCE_WITH_LABEL.replace_all(&text, |caps: &Captures| caps[1].to_string());

        let text = REFERENCE.replace_all(&text, |caps: &Captures| {
            let reference = &caps[1];
            match reference.rsplit_once('=') {
                Some((_, last)) => last.to_string(),
                None => reference.to_string(),
            }
        });

        UUID_WITH_LABEL
            .replace_all(&text, |caps: &Captures| caps[1].to_string())
            .into_owned()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(&SanitizerConfig::default())
    }
}

/// Sanitize with the default configuration.
pub fn sanitize(html: &str) -> String {
    DEFAULT_SANITIZER.sanitize(html)
}
