//! Category classification for raw items.
//!
//! Two exporter generations disagree on how an item's section is conveyed,
//! so the mode is configuration: either infer it from `itemType`, or trust a
//! pre-supplied `section` tag. Anything the mode cannot place is resolved by
//! a single [`UnknownTypePolicy`].

use serde::{Deserialize, Serialize};

use super::types::{RawItem, Section};

/// Item types that belong in the physical inventory.
pub const PHYSICAL_ITEM_TYPES: &[&str] = &[
    "weapon",
    "equipment",
    "consumable",
    "tool",
    "loot",
    "container",
    "backpack",
];

/// Label for physical items that carry neither a type label nor a subtype.
pub const FALLBACK_TYPE_LABEL: &str = "Container";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMode {
    /// Derive the section from `itemType`.
    InferFromType,
    /// Read the section from the exporter's `section` field.
    #[default]
    TrustProvidedTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownTypePolicy {
    /// Route unrecognized items into the physical inventory.
    #[default]
    DefaultToPhysical,
    /// Leave unrecognized items out of the model.
    Drop,
}

/// Outcome of inspecting an item's discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Known(Section),
    Unknown { discriminator: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationPolicy {
    pub mode: ClassificationMode,
    pub unknown_types: UnknownTypePolicy,
}

impl ClassificationPolicy {
    pub fn new(mode: ClassificationMode, unknown_types: UnknownTypePolicy) -> Self {
        Self {
            mode,
            unknown_types,
        }
    }

    /// Section an item is routed to, or `None` when the policy drops it.
    pub fn classify(&self, item: &RawItem) -> Option<Section> {
        match inspect(item, self.mode) {
            Classification::Known(section) => Some(section),
            Classification::Unknown { .. } => match self.unknown_types {
                UnknownTypePolicy::DefaultToPhysical => Some(Section::Physical),
                UnknownTypePolicy::Drop => None,
            },
        }
    }
}

/// Inspect an item's discriminator under the given mode.
pub fn inspect(item: &RawItem, mode: ClassificationMode) -> Classification {
    match mode {
        ClassificationMode::InferFromType => match item.item_type() {
            Some("feat") => Classification::Known(Section::Feature),
            Some("spell") => Classification::Known(Section::Spell),
            Some(t) if PHYSICAL_ITEM_TYPES.contains(&t) => Classification::Known(Section::Physical),
            other => Classification::Unknown {
                discriminator: other.map(str::to_string),
            },
        },
        ClassificationMode::TrustProvidedTag => {
            let tag = item.section_tag();
            match tag.and_then(Section::parse) {
                Some(section) => Classification::Known(section),
                None => Classification::Unknown {
                    discriminator: tag.map(str::to_string),
                },
            }
        }
    }
}

/// `"<typeLabel> (<subtype>)"`, `typeLabel`, or `"Container"`.
pub fn combined_label(item: &RawItem) -> String {
    let type_label = item.str_field("typeLabel").filter(|s| !s.is_empty());
    let subtype = item.str_field("subtype").filter(|s| !s.is_empty());

    match (type_label, subtype) {
        (Some(label), Some(subtype)) => format!("{label} ({subtype})"),
        (Some(label), None) => label.to_string(),
        _ => FALLBACK_TYPE_LABEL.to_string(),
    }
}
