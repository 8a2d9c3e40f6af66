//! Normalizer Unit Tests
//!
//! Runs the sample snapshot through the pipeline and checks:
//! - Section bucketing per actor
//! - Sort order of features, spells and physical items
//! - Settlement passthrough and capacity display
//! - Journal id assignment
//! - Display helpers over normalized items

use serde_json::json;

use crate::core::sheet::display::{self, card_header, description_html, mechanics};
use crate::core::sheet::normalizer::Normalizer;
use crate::core::sheet::{
    ClassificationMode, ClassificationPolicy, RawItem, Sanitizer, Section, UnknownTypePolicy,
};
use crate::tests::common::*;

fn names(items: &[RawItem]) -> Vec<&str> {
    items.iter().map(RawItem::name).collect()
}

// ============================================================================
// Actor Sections
// ============================================================================

#[test]
fn test_sample_actor_order_preserved() {
    let (sheet, report) = Normalizer::default().normalize(&sample_document());
    let actors: Vec<&str> = sheet.actors.keys().map(String::as_str).collect();
    assert_eq!(actors, vec!["Tess", "Bram"]);
    assert_eq!(report.actors, 2);
    assert_eq!(report.items_routed, 7);
    assert!(report.dropped.is_empty());
}

#[test]
fn test_sample_features_sorted() {
    let (sheet, _) = Normalizer::default().normalize(&sample_document());
    let tess = sheet.actor("Tess").unwrap();
    assert_eq!(
        names(tess.section(Section::Feature)),
        vec!["Alert", "Second Wind", "Action Surge"]
    );
}

#[test]
fn test_sample_spells_sorted() {
    let (sheet, _) = Normalizer::default().normalize(&sample_document());
    let tess = sheet.actor("Tess").unwrap();
    assert_eq!(
        names(tess.section(Section::Spell)),
        vec!["Fire Bolt", "Fireball"]
    );
}

#[test]
fn test_sample_physical_sorted_and_labelled() {
    let (sheet, _) = Normalizer::default().normalize(&sample_document());
    let physical = sheet.actor("Tess").unwrap().section(Section::Physical);
    assert_eq!(names(physical), vec!["Ring of Protection", "Rope"]);
    assert_eq!(physical[1].combined_label(), Some("Loot"));
}

#[test]
fn test_empty_actor_has_empty_buckets() {
    let (sheet, _) = Normalizer::default().normalize(&sample_document());
    let bram = sheet.actor("Bram").unwrap();
    for section in Section::ACTOR_SECTIONS {
        assert!(bram.sections.contains_key(&section));
        assert!(bram.section(section).is_empty());
    }
}

#[test]
fn test_infer_mode_routes_by_item_type() {
    let doc = document_with_items(
        "Ilse",
        vec![
            raw_item(json!({"name": "Shield", "itemType": "spell", "spellLevel": "1st Level", "spellSchool": "Abjuration"})),
            raw_item(json!({"name": "Lucky", "itemType": "feat", "requirements": "Feat"})),
            raw_item(json!({"name": "Longsword", "itemType": "weapon", "typeLabel": "Weapon", "subtype": "Martial Melee"})),
            raw_item(json!({"name": "Wizard", "itemType": "class"})),
        ],
    );
    let policy = ClassificationPolicy::new(
        ClassificationMode::InferFromType,
        UnknownTypePolicy::DefaultToPhysical,
    );
    let (sheet, report) = Normalizer::new(policy).normalize(&doc);
    let ilse = sheet.actor("Ilse").unwrap();

    assert_eq!(names(ilse.section(Section::Spell)), vec!["Shield"]);
    assert_eq!(names(ilse.section(Section::Feature)), vec!["Lucky"]);
    // "Container" sorts before "Weapon (Martial Melee)".
    assert_eq!(
        names(ilse.section(Section::Physical)),
        vec!["Wizard", "Longsword"]
    );
    assert_eq!(
        ilse.section(Section::Physical)[1].combined_label(),
        Some("Weapon (Martial Melee)")
    );
    assert_eq!(report.items_routed, 4);
}

// ============================================================================
// Settlement & Journals
// ============================================================================

#[test]
fn test_settlement_normalized() {
    let (sheet, _) = Normalizer::default().normalize(&sample_document());
    let settlement = &sheet.settlement;

    assert_eq!(settlement.name, "Brindlemark");
    assert_eq!(names(&settlement.buildings), vec!["Tavern", "Forge"]);
    assert_eq!(settlement.capacity.available, 3.0);
    assert_eq!(settlement.capacity.max, 8.0);
    assert_eq!(
        display::settlement_attributes(settlement),
        vec![
            ("morale".to_string(), "5".to_string()),
            ("defense".to_string(), "2".to_string()),
            ("capacity".to_string(), "3/8".to_string()),
        ]
    );
    assert_eq!(display::effects_heading(settlement), "Effects (1)");
    assert_eq!(settlement.section(Section::Effect).len(), 1);
}

#[test]
fn test_journals_enumerated() {
    let (sheet, report) = Normalizer::default().normalize(&sample_document());
    assert_eq!(report.journals, 2);
    assert_eq!(sheet.journal("journal-0").unwrap().name(), Some("Session 1"));
    assert_eq!(sheet.journal("journal-1").unwrap().name(), Some("Session 2"));
    assert!(sheet.journal("journal-2").is_none());
}

#[test]
fn test_missing_journals_yield_empty_map() {
    let doc = document_with_items("Tess", vec![]);
    let (sheet, report) = Normalizer::default().normalize(&doc);
    assert!(sheet.journals.is_empty());
    assert_eq!(report.journals, 0);
}

#[test]
fn test_ingame_date_passthrough() {
    let (sheet, _) = Normalizer::default().normalize(&sample_document());
    assert_eq!(display::ingame_date_display(&sheet), "14 Hammer 1492");
}

// ============================================================================
// Display Over Normalized Data
// ============================================================================

#[test]
fn test_cards_from_normalized_items() {
    let (sheet, _) = Normalizer::default().normalize(&sample_document());
    let sanitizer = Sanitizer::default();

    let building = &sheet.settlement.buildings[1];
    assert_eq!(card_header(Section::Building, building), vec!["(2)", "Forge", ""]);
    assert_eq!(mechanics(building).requires[0].display_string, "Mine");

    let effect = &sheet.settlement.effects[0];
    assert_eq!(
        card_header(Section::Effect, effect),
        vec!["Harvest Festival", "4 days"]
    );

    let pages = sheet.journal("journal-0").unwrap().pages();
    let page = &pages[0];
    assert_eq!(
        description_html(Section::JournalPage, page, &sanitizer),
        "<p>Prone</p>"
    );
}

#[test]
fn test_feature_fixture_description_sanitized() {
    let item = feature("Cunning Action", "Rogue 2");
    let html = description_html(Section::Feature, &item, &Sanitizer::default());
    assert_eq!(html, "<p>Cunning Action uses proficiency bonus.</p>");
}
