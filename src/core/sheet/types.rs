//! Data model for exported sheet snapshots.
//!
//! Raw records are kept untyped (`serde_json` objects) so every field the
//! exporter writes survives normalization and reaches the renderer. Typed
//! accessors on [`RawItem`] cover the fields the pipeline itself reads.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{LoadError, Result};

// ============================================================================
// Document Keys
// ============================================================================

pub const PLAYER_DATA_KEY: &str = "playerData";
pub const SETTLEMENT_DATA_KEY: &str = "settlementData";
pub const JOURNAL_DATA_KEY: &str = "journalData";
pub const INGAME_DATE_KEY: &str = "ingameDate";

// ============================================================================
// Section
// ============================================================================

/// Display category an item is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[serde(alias = "feature-items")]
    Feature,
    #[serde(alias = "physical-items")]
    Physical,
    #[serde(alias = "spell-items")]
    Spell,
    #[serde(alias = "building-items")]
    Building,
    #[serde(alias = "effect-items")]
    Effect,
    #[serde(alias = "journal-pages")]
    JournalPage,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Self::Feature,
        Self::Physical,
        Self::Spell,
        Self::Building,
        Self::Effect,
        Self::JournalPage,
    ];

    /// Sections every actor sheet carries, even when empty.
    pub const ACTOR_SECTIONS: [Section; 3] = [Self::Feature, Self::Physical, Self::Spell];

    /// Canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Physical => "physical",
            Self::Spell => "spell",
            Self::Building => "building",
            Self::Effect => "effect",
            Self::JournalPage => "journal-page",
        }
    }

    /// Element id the exporter and the viewer page use for this section.
    pub fn dom_id(&self) -> &'static str {
        match self {
            Self::Feature => "feature-items",
            Self::Physical => "physical-items",
            Self::Spell => "spell-items",
            Self::Building => "building-items",
            Self::Effect => "effect-items",
            Self::JournalPage => "journal-pages",
        }
    }

    /// Parse either the canonical tag or the element-id form.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == tag || section.dom_id() == tag)
    }

    /// Item fields shown in a card header, in display order.
    pub fn header_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Feature => &["name", "requirements"],
            Self::Physical => &["name", "combinedLabel", "quantity", "attunementLabel"],
            Self::Spell => &["name", "spellLevel", "spellSchool", "spellRange"],
            Self::Building => &["scale", "name", "constructionDateDisplay"],
            Self::Effect => &["name", "endDisplay"],
            Self::JournalPage => &["name"],
        }
    }

    /// Whether the section has a sort order. Unsorted sections keep document order.
    pub fn is_sorted(&self) -> bool {
        matches!(self, Self::Feature | Self::Physical | Self::Spell)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Raw Item
// ============================================================================

/// An untyped item record as exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawItem(Map<String, Value>);

impl RawItem {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String field, `None` when missing or not a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or_default()
    }

    pub fn item_type(&self) -> Option<&str> {
        self.str_field("itemType")
    }

    /// Pre-supplied section tag, if the exporter wrote one.
    pub fn section_tag(&self) -> Option<&str> {
        self.str_field("section")
    }

    pub fn requirements(&self) -> Option<&str> {
        self.str_field("requirements")
    }

    pub fn spell_level(&self) -> Option<&str> {
        self.str_field("spellLevel")
    }

    pub fn spell_school(&self) -> Option<&str> {
        self.str_field("spellSchool")
    }

    pub fn combined_label(&self) -> Option<&str> {
        self.str_field("combinedLabel")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// `attunementLabel` decides when present, otherwise `attunement`.
    pub fn requires_attunement(&self) -> bool {
        match self.get("attunementLabel") {
            Some(label) if !label.is_null() => is_truthy(label),
            _ => self.get("attunement").is_some_and(is_truthy),
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }
}

impl From<Map<String, Value>> for RawItem {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Truthiness as the exporter's consumers have always read flag fields:
/// empty strings, zero, `false` and `null` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// Raw Document
// ============================================================================

/// Settlement capacity; both raw numbers are kept alongside the display string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub available: f64,
    pub max: f64,
}

impl Capacity {
    /// `"<available>/<max>"`
    pub fn display(&self) -> String {
        format!("{}/{}", self.available, self.max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSettlementGeneral {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
    pub capacity: Capacity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSettlement {
    #[serde(default)]
    pub buildings: Vec<RawItem>,
    #[serde(default)]
    pub effects: Vec<RawItem>,
    pub general: RawSettlementGeneral,
}

/// A journal record, kept exactly as exported.
///
/// Usually an object with `name` and `pages`; older exports write a bare
/// page array. Fields the viewer does not read are carried through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawJournal(Value);

impl RawJournal {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Page records; entries that are not objects are skipped.
    pub fn pages(&self) -> Vec<RawItem> {
        let pages = match &self.0 {
            Value::Array(pages) => Some(pages),
            Value::Object(fields) => fields.get("pages").and_then(Value::as_array),
            _ => None,
        };

        pages
            .into_iter()
            .flatten()
            .filter_map(|page| page.as_object().cloned().map(RawItem::new))
            .collect()
    }
}

/// The whole exported snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub player_data: IndexMap<String, Vec<RawItem>>,
    pub settlement_data: RawSettlement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_data: Option<Vec<RawJournal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingame_date: Option<Value>,
}

impl RawDocument {
    /// Parse and validate a document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Validate the top-level shape before anything is built from it.
    ///
    /// Required sections must be present; optional ones may be absent or
    /// `null`. Nothing is defaulted for a missing required section.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(LoadError::InvalidShape {
                section: "<root>".to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };

        let players = root
            .remove(PLAYER_DATA_KEY)
            .ok_or(LoadError::MissingSection(PLAYER_DATA_KEY))?;
        let settlement = root
            .remove(SETTLEMENT_DATA_KEY)
            .ok_or(LoadError::MissingSection(SETTLEMENT_DATA_KEY))?;

        let player_data = section_from_value(PLAYER_DATA_KEY, players)?;
        let settlement_data = section_from_value(SETTLEMENT_DATA_KEY, settlement)?;
        let journal_data = match root.remove(JOURNAL_DATA_KEY) {
            None | Some(Value::Null) => None,
            Some(journals) => Some(section_from_value(JOURNAL_DATA_KEY, journals)?),
        };
        let ingame_date = root
            .remove(INGAME_DATE_KEY)
            .filter(|date| !date.is_null());

        Ok(Self {
            player_data,
            settlement_data,
            journal_data,
            ingame_date,
        })
    }
}

fn section_from_value<T: serde::de::DeserializeOwned>(section: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| LoadError::InvalidShape {
        section: section.to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// Normalized Model
// ============================================================================

/// One actor's items, bucketed by section and sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorSheet {
    pub sections: IndexMap<Section, Vec<RawItem>>,
}

impl ActorSheet {
    /// Items of a section; empty for sections the actor has nothing in.
    pub fn section(&self, section: Section) -> &[RawItem] {
        self.sections
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn item_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementData {
    pub name: String,
    pub buildings: Vec<RawItem>,
    pub effects: Vec<RawItem>,
    /// General attributes plus the derived `capacity` display string.
    pub attributes: IndexMap<String, Value>,
    pub capacity: Capacity,
}

impl SettlementData {
    pub fn section(&self, section: Section) -> &[RawItem] {
        match section {
            Section::Building => &self.buildings,
            Section::Effect => &self.effects,
            _ => &[],
        }
    }
}

/// Everything the renderer needs, keyed by actor name, section tag and journal id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub actors: IndexMap<String, ActorSheet>,
    pub settlement: SettlementData,
    pub journals: IndexMap<String, RawJournal>,
    pub ingame_date: Option<Value>,
}

impl SheetData {
    pub fn actor(&self, name: &str) -> Option<&ActorSheet> {
        self.actors.get(name)
    }

    pub fn journal(&self, id: &str) -> Option<&RawJournal> {
        self.journals.get(id)
    }
}
