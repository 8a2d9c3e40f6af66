//! Display values derived from normalized items.
//!
//! Pure helpers so the renderer can build cards without re-deriving anything:
//! header texts per section, sanitized descriptions, building/effect mechanics
//! and the settlement attribute strip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sanitizer::Sanitizer;
use super::types::{is_truthy, RawItem, Section, SettlementData, SheetData};

/// Description shown when an item has none.
pub const EMPTY_DESCRIPTION: &str = "<p></p>";

/// Text for a JSON value as it appears in a header span.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Header texts for an item card, in [`Section::header_fields`] order.
pub fn card_header(section: Section, item: &RawItem) -> Vec<String> {
    match section {
        Section::Building => {
            let constructed = item
                .get("constructionDateDisplay")
                .filter(|v| is_truthy(v));
            vec![
                format!("({})", value_text(item.get("scale"))),
                item.name().to_string(),
                value_text(constructed),
            ]
        }
        Section::Effect => {
            let end = if item.get("isTemporary").is_some_and(is_truthy) {
                format!("{} days", value_text(item.get("remainingDays")))
            } else {
                String::new()
            };
            vec![item.name().to_string(), end]
        }
        _ => section
            .header_fields()
            .iter()
            .map(|field| value_text(item.get(field)))
            .collect(),
    }
}

/// Sanitized description HTML, or an empty paragraph.
///
/// Journal pages carry their body in `content` rather than `description`.
pub fn description_html(section: Section, item: &RawItem, sanitizer: &Sanitizer) -> String {
    let key = match section {
        Section::JournalPage => "content",
        _ => "description",
    };

    match item.str_field(key).filter(|s| !s.is_empty()) {
        Some(html) => sanitizer.sanitize(html),
        None => EMPTY_DESCRIPTION.to_string(),
    }
}

/// One entry of a building's or effect's requirement list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    #[serde(default)]
    pub class_list: String,
    #[serde(default)]
    pub display_string: String,
}

/// Flavor text plus grants/requires lists for buildings and effects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Mechanics {
    pub flavor_text: String,
    pub grants: Vec<String>,
    pub requires: Vec<Requirement>,
}

pub fn mechanics(item: &RawItem) -> Mechanics {
    let grants = item
        .get("grants")
        .and_then(Value::as_array)
        .map(|grants| grants.iter().map(|g| value_text(Some(g))).collect())
        .unwrap_or_default();

    let requires = item
        .get("requires")
        .and_then(Value::as_array)
        .map(|requires| {
            requires
                .iter()
                .filter_map(|r| serde_json::from_value(r.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    Mechanics {
        flavor_text: value_text(item.get("flavorText")),
        grants,
        requires,
    }
}

/// Settlement attributes as `(label, value)` pairs, capacity included.
pub fn settlement_attributes(settlement: &SettlementData) -> Vec<(String, String)> {
    settlement
        .attributes
        .iter()
        .map(|(key, value)| (key.clone(), value_text(Some(value))))
        .collect()
}

/// Heading for the effects panel, e.g. "Effects (3)".
pub fn effects_heading(settlement: &SettlementData) -> String {
    format!("Effects ({})", settlement.effects.len())
}

pub fn ingame_date_display(sheet: &SheetData) -> String {
    value_text(sheet.ingame_date.as_ref())
}
