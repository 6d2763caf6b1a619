//! Taxonomy store against the bundled fixtures: two-level id resolution, treatment
//! comparison and keyword search.
//!
//! Run with: `cargo test --test taxonomy_store_test`

use std::path::PathBuf;
use swm_core::knowledge::TaxonomyStore;
use swm_core::{KnowledgeSource, SearchScope};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/knowledge")
}

fn store() -> TaxonomyStore {
    TaxonomyStore::try_open(fixture_dir()).expect("fixtures load")
}

#[test]
fn subcategory_resolves_by_its_own_id() {
    let taxonomy = store();
    let paper = taxonomy.category("paper").expect("paper nested under recyclables");
    assert_eq!(paper.name_zh.as_deref(), Some("废纸"));
    assert_eq!(taxonomy.category_path("paper").as_deref(), Some("recyclables.paper"));
    assert_eq!(taxonomy.category_path("food_waste").as_deref(), Some("food_waste"));
    assert!(taxonomy.category("recyclables.paper").is_some());
    assert_eq!(paper.extra.get("calorific_value"), Some(&serde_json::json!(16.5)));
}

#[test]
fn absent_ids_are_empty_everywhere() {
    let taxonomy = store();
    assert!(taxonomy.category("asbestos").is_none());
    assert!(taxonomy.category("recyclables.glass").is_none());
    assert!(taxonomy.category_path("asbestos").is_none());
    assert!(taxonomy.treatment("plasma_arc").is_none());
    assert!(taxonomy.suitable_treatments("asbestos").is_empty());
    assert!(taxonomy.applicable_waste_types("plasma_arc").is_empty());
    assert!(taxonomy.hierarchy_entry(42).is_none());
    assert!(taxonomy.query("asbestos").is_none());

    let comparison = taxonomy.compare_treatments("asbestos");
    assert!(comparison.suitable_treatments.is_empty());
    assert!(comparison.treatment_details.is_empty());
}

#[test]
fn compare_treatments_omits_unresolvable_details() {
    let taxonomy = store();
    let comparison = taxonomy.compare_treatments("food_waste");
    assert_eq!(comparison.suitable_treatments.len(), 3);
    assert!(comparison.suitable_treatments.len() >= comparison.treatment_details.len());

    let ids: Vec<&str> = comparison.treatment_details.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["composting", "anaerobic_digestion"]);
    assert_eq!(comparison.treatment_details[0].name, Some("好氧堆肥"));
    assert_eq!(comparison.treatment_details[0].disadvantages.len(), 2);
}

#[test]
fn hierarchy_keeps_declared_order() {
    let taxonomy = store();
    let priorities: Vec<u32> = taxonomy.hierarchy().iter().map(|e| e.priority).collect();
    assert_eq!(priorities, vec![1, 2, 3, 4, 5]);
    assert_eq!(
        taxonomy.hierarchy_entry(1).and_then(|e| e.name_en.as_deref()),
        Some("Prevention")
    );
}

#[test]
fn treatment_side_lookups() {
    let taxonomy = store();
    assert_eq!(taxonomy.applicable_waste_types("incineration"), ["residual", "paper"]);
    let incineration = taxonomy.treatment("incineration").unwrap();
    assert!(incineration.types.contains_key("grate_furnace"));
    assert_eq!(taxonomy.suitable_treatments("plastic"), ["recycling", "pyrolysis"]);
}

#[test]
fn empty_keyword_matches_every_record() {
    let taxonomy = store();
    let result = taxonomy.search_by_keyword("", SearchScope::All);
    let ids: Vec<&str> = result
        .waste_category_matches
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "recyclables",
            "recyclables.paper",
            "recyclables.plastic",
            "food_waste",
            "hazardous",
            "residual"
        ]
    );
    assert_eq!(result.treatment_method_matches.len(), 6);
}

#[test]
fn subcategory_hits_carry_parent() {
    let taxonomy = store();
    let result = taxonomy.search_by_keyword("废纸", SearchScope::Waste);
    let hits: Vec<(&str, Option<&str>)> = result
        .waste_category_matches
        .iter()
        .map(|m| (m.id.as_str(), m.parent))
        .collect();
    assert_eq!(
        hits,
        vec![("recyclables", None), ("recyclables.paper", Some("recyclables"))]
    );
    assert!(result.treatment_method_matches.is_empty());
}

#[test]
fn keyword_search_is_case_insensitive_and_scoped() {
    let taxonomy = store();
    let result = taxonomy.search_by_keyword("methane", SearchScope::Treatment);
    assert!(result.waste_category_matches.is_empty());
    let ids: Vec<&str> = result.treatment_method_matches.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["landfill"]);

    assert!(taxonomy
        .search_by_keyword("no-such-keyword", SearchScope::All)
        .is_empty());
}
