//! Data Normalizer
//!
//! Turns a validated [`RawDocument`] into the immutable [`SheetData`] the
//! renderer reads. Runs synchronously to completion; the source document is
//! never modified (items are copied before they are annotated).

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::classifier::{self, ClassificationPolicy};
use super::sorters;
use super::types::{
    ActorSheet, RawDocument, RawItem, RawJournal, RawSettlement, Section, SettlementData,
    SheetData,
};

/// Attribute key the derived capacity string is stored under.
pub const CAPACITY_ATTRIBUTE: &str = "capacity";

/// An item the classification policy left out of the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedItem {
    pub actor: String,
    pub name: String,
    pub discriminator: Option<String>,
}

/// Counts gathered while normalizing, for logging and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub actors: usize,
    pub items_routed: usize,
    pub dropped: Vec<DroppedItem>,
    pub journals: usize,
}

/// Generated id for the journal at `index`.
pub fn journal_id(index: usize) -> String {
    format!("journal-{index}")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: ClassificationPolicy,
}

impl Normalizer {
    pub fn new(policy: ClassificationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ClassificationPolicy {
        self.policy
    }

    /// Normalize a whole document.
    pub fn normalize(&self, document: &RawDocument) -> (SheetData, NormalizationReport) {
        let mut report = NormalizationReport::default();

        let actors = document
            .player_data
            .iter()
            .map(|(name, items)| (name.clone(), self.normalize_actor(name, items, &mut report)))
            .collect::<IndexMap<_, _>>();
        report.actors = actors.len();

        let settlement = normalize_settlement(&document.settlement_data);

        let journals = document
            .journal_data
            .as_deref()
            .map(normalize_journals)
            .unwrap_or_default();
        report.journals = journals.len();

        info!(
            actors = report.actors,
            items = report.items_routed,
            dropped = report.dropped.len(),
            buildings = settlement.buildings.len(),
            effects = settlement.effects.len(),
            journals = report.journals,
            "Normalized sheet data"
        );

        let sheet = SheetData {
            actors,
            settlement,
            journals,
            ingame_date: document.ingame_date.clone(),
        };
        (sheet, report)
    }

    /// Bucket and sort one actor's items.
    pub fn normalize_actor(
        &self,
        actor: &str,
        items: &[RawItem],
        report: &mut NormalizationReport,
    ) -> ActorSheet {
        let mut sections: IndexMap<Section, Vec<RawItem>> = Section::ACTOR_SECTIONS
            .into_iter()
            .map(|section| (section, Vec::new()))
            .collect();

        for raw in items {
            let Some(section) = self.policy.classify(raw) else {
                let dropped = DroppedItem {
                    actor: actor.to_string(),
                    name: raw.name().to_string(),
                    discriminator: raw
                        .section_tag()
                        .or_else(|| raw.item_type())
                        .map(str::to_string),
                };
                warn!(
                    actor,
                    item = %dropped.name,
                    discriminator = ?dropped.discriminator,
                    "Dropping item with unrecognized type"
                );
                report.dropped.push(dropped);
                continue;
            };

            sections.entry(section).or_default().push(annotate(raw, section));
            report.items_routed += 1;
        }

        for (section, bucket) in sections.iter_mut() {
            sorters::sort_section(*section, bucket);
        }

        debug!(
            actor,
            features = sections[&Section::Feature].len(),
            physical = sections[&Section::Physical].len(),
            spells = sections[&Section::Spell].len(),
            "Normalized actor"
        );

        ActorSheet { sections }
    }
}

/// Copy of `raw` tagged with its section; physical items get a display label.
fn annotate(raw: &RawItem, section: Section) -> RawItem {
    let mut item = raw.clone();
    item.set("section", section.as_str());

    if section == Section::Physical && item.combined_label().map_or(true, str::is_empty) {
        let label = classifier::combined_label(&item);
        item.set("combinedLabel", label);
    }
    item
}

/// Buildings and effects pass through in document order.
pub fn normalize_settlement(raw: &RawSettlement) -> SettlementData {
    let general = &raw.general;

    let mut attributes = general.attributes.clone();
    attributes.insert(
        CAPACITY_ATTRIBUTE.to_string(),
        general.capacity.display().into(),
    );

    SettlementData {
        name: general.name.clone(),
        buildings: raw.buildings.clone(),
        effects: raw.effects.clone(),
        attributes,
        capacity: general.capacity,
    }
}

/// Journals keyed `journal-0`, `journal-1`, ... in document order.
pub fn normalize_journals(journals: &[RawJournal]) -> IndexMap<String, RawJournal> {
    journals
        .iter()
        .enumerate()
        .map(|(index, journal)| (journal_id(index), journal.clone()))
        .collect()
}

/// Normalize with the given classification policy.
pub fn normalize(document: &RawDocument, policy: ClassificationPolicy) -> SheetData {
    Normalizer::new(policy).normalize(document).0
}
