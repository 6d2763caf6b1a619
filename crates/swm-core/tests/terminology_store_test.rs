//! Terminology store against the bundled fixtures.
//!
//! Run with: `cargo test --test terminology_store_test`

use std::path::PathBuf;
use swm_core::{Language, TerminologyStore};

fn store() -> TerminologyStore {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/knowledge/terminology.json");
    TerminologyStore::try_open(path).expect("fixture loads")
}

#[test]
fn categories_keep_source_order() {
    let terms = store();
    let categories: Vec<&str> = terms.categories().collect();
    assert_eq!(
        categories,
        vec!["abbreviations", "waste_types", "treatment_methods", "emissions"]
    );
    assert_eq!(terms.term_count(), 7);
}

#[test]
fn translate_is_repeatable() {
    let terms = store();
    for (input, lang) in [
        ("MSW", Language::Zh),
        ("rdf", Language::En),
        ("温室气体", Language::En),
        ("food_waste", Language::Zh),
    ] {
        let first = terms.translate(input, lang);
        assert!(first.is_some(), "{} should translate", input);
        assert_eq!(first, terms.translate(input, lang));
    }
    assert_eq!(terms.translate("温室气体", Language::En), Some("Greenhouse Gas"));
    assert_eq!(terms.translate("food_waste", Language::En), Some("Food Waste"));
    assert_eq!(terms.translate("LCA", Language::En), Some("Life Cycle Assessment"));
}

#[test]
fn absent_terms_are_empty_everywhere() {
    let terms = store();
    assert!(terms.term("PFAS", None).is_none());
    assert!(terms.translate("PFAS", Language::Zh).is_none());
    assert!(terms.definition("PFAS").is_none());
    assert!(terms.abbreviation("Per- and polyfluoroalkyl substances").is_none());
    assert!(terms.expand_abbreviation("PFAS", Language::En).is_none());
    assert!(terms.related_terms("PFAS").is_empty());
    assert!(terms.terms_by_category("pollutants").is_empty());
    assert!(terms.waste_type_properties("MSW").is_none());
    assert!(terms.treatment_method_info("MSW").is_none());
    assert!(terms.search_terms("PFAS", None).is_empty());
}

#[test]
fn search_matches_ids_and_nested_fields() {
    let terms = store();
    let hits: Vec<(&str, &str)> = terms
        .search_terms("incineration", None)
        .iter()
        .map(|m| (m.category, m.id))
        .collect();
    assert_eq!(
        hits,
        vec![("abbreviations", "RDF"), ("treatment_methods", "incineration")]
    );

    assert_eq!(terms.search_terms("", Some("abbreviations")).len(), 3);
    assert!(terms.search_terms("", Some("unknown")).is_empty());
}

#[test]
fn projections() {
    let terms = store();
    assert_eq!(terms.related_terms("RDF"), ["MSW", "incineration"]);
    assert_eq!(terms.abbreviation("refuse derived fuel"), Some("RDF"));
    assert_eq!(terms.expand_abbreviation("LCA", Language::Zh), Some("生命周期评价"));
    assert_eq!(terms.terms_by_category("treatment_methods").len(), 2);
    assert_eq!(
        terms.waste_type_properties("food_waste").and_then(|p| p.get("含水率")),
        Some(&serde_json::json!("60-80%"))
    );
    assert!(terms
        .treatment_method_info("composting")
        .and_then(|t| t.definition.as_deref())
        .is_some_and(|d| d.contains("微生物")));
}

#[test]
fn explain_term_layout() {
    let terms = store();
    let brief = terms.explain_term("food_waste", false);
    assert_eq!(
        brief,
        "food_waste (厨余垃圾)\n定义: 家庭日常生活中丢弃的果蔬及食物残渣等易腐有机垃圾"
    );

    let detailed = terms.explain_term("food_waste", true);
    let lines: Vec<&str> = detailed.lines().collect();
    assert_eq!(
        &lines[2..],
        &[
            "特性:",
            "  - 含水率: 60-80%",
            "  - 有机质含量: 85-95%",
            "相关术语: composting, anaerobic_digestion",
            "别名: 湿垃圾",
        ]
    );

    let incineration = terms.explain_term("incineration", true);
    assert!(incineration.contains("优点:\n  - 减量化\n  - 能源回收"));
    assert!(incineration.contains("缺点:\n  - 烟气污染控制要求高"));

    assert_eq!(terms.explain_term("MSW", false).lines().next(), Some("MSW (城市生活垃圾)"));
    assert_eq!(terms.explain_term("PFAS", true), "未找到术语: PFAS");
}
