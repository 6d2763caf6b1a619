//! Missing or malformed sources leave stores empty instead of failing; mistyped fields
//! inside a record keep the record.
//!
//! Run with: `cargo test --test degraded_mode_test`

use std::fs;
use swm_core::{
    KnowledgeBase, KnowledgeConfig, KnowledgeSource, LoadError, SearchScope, StandardsStore,
    TaxonomyStore, TerminologyStore,
};

#[test]
fn missing_sources_give_empty_stores() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let kb = KnowledgeBase::open(&KnowledgeConfig::with_data_dir(dir.path()));

    assert!(kb.status().iter().all(|s| !s.loaded && s.entries == 0));
    assert!(kb.taxonomy.category("food_waste").is_none());
    assert!(kb.taxonomy.hierarchy().is_empty());
    assert!(kb.taxonomy.search_by_keyword("", SearchScope::All).is_empty());
    assert!(kb.terminology.search_terms("", None).is_empty());
    assert_eq!(kb.terminology.explain_term("MSW", true), "未找到术语: MSW");
    assert!(kb.standards.search_standards("", None, None).is_empty());
    assert_eq!(kb.standards.explain_standard("GB 18485-2014"), "未找到标准: GB 18485-2014");
    assert!(kb.lookup("MSW").is_none());
}

#[test]
fn unreadable_sources_report_through_try_open() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let broken = dir.path().join("terminology.json");
    fs::write(&broken, "{ not json").unwrap();
    let list = dir.path().join("standards.json");
    fs::write(&list, "[1, 2, 3]").unwrap();

    assert!(matches!(TerminologyStore::try_open(&broken), Err(LoadError::Json { .. })));
    assert!(matches!(StandardsStore::try_open(&list), Err(LoadError::NotAnObject { .. })));
    assert!(matches!(
        StandardsStore::try_open(dir.path().join("absent.json")),
        Err(LoadError::Io { .. })
    ));

    assert!(TerminologyStore::open(&broken).is_empty());
    assert!(StandardsStore::open(&list).is_empty());
}

#[test]
fn only_non_object_records_are_skipped() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("standards.json");
    fs::write(
        &path,
        r#"{
            "china_standards": {
                "broken": "not a record",
                "bad_requirements": { "key_requirements": "should be an object" },
                "GB 16889-2008": { "full_name_zh": "生活垃圾填埋场污染控制标准" }
            }
        }"#,
    )
    .unwrap();

    let standards = StandardsStore::open(&path);
    assert_eq!(standards.entry_count(), 2);
    assert!(standards.standard("GB 16889-2008", None).is_some());
    assert!(standards.standard("broken", None).is_none());

    let kept = standards.standard("bad_requirements", None).unwrap();
    assert!(kept.key_requirements.is_none());
    assert_eq!(kept.extra["key_requirements"], "should be an object");
}

#[test]
fn mistyped_standard_fields_keep_the_record() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("standards.json");
    fs::write(
        &path,
        r#"{
            "china_standards": {
                "GB 18485-2014": {
                    "full_name_zh": "生活垃圾焚烧污染控制标准",
                    "issue_date": 2014,
                    "category": "emission",
                    "key_requirements": { "emission_limits": { "HCl": "50 mg/m3" } }
                }
            }
        }"#,
    )
    .unwrap();

    let standards = StandardsStore::open(&path);
    let gb = standards.standard("GB 18485-2014", None).expect("record kept");
    assert!(gb.issue_date.is_none());
    assert_eq!(gb.extra["issue_date"], 2014);
    assert_eq!(gb.display_name(), Some("生活垃圾焚烧污染控制标准"));

    assert_eq!(standards.search_standards("焚烧", None, None).len(), 1);
    assert_eq!(standards.emission_standards(None).len(), 1);
    assert_eq!(standards.emission_limits("GB 18485-2014").unwrap()["HCl"], "50 mg/m3");
    assert!(standards.explain_standard("GB 18485-2014").contains("HCl"));
}

#[test]
fn mistyped_category_fields_keep_parents_and_subcategories() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("waste_classification.json"),
        r#"{
            "waste_categories": {
                "food_waste": { "name_zh": "厨余垃圾", "subcategories": [] },
                "recyclables": {
                    "name_zh": "可回收物",
                    "suitable_treatments": ["recycling", null],
                    "subcategories": {
                        "paper": { "name_zh": "废纸", "suitable_treatments": ["recycling"] }
                    }
                }
            }
        }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("treatment_methods.json"),
        r#"{ "treatment_methods": { "recycling": { "name_zh": "回收利用" } } }"#,
    )
    .unwrap();

    let taxonomy = TaxonomyStore::open(dir.path());

    let food = taxonomy.category("food_waste").expect("food_waste kept");
    assert!(food.subcategories.is_empty());
    assert_eq!(food.extra["subcategories"], serde_json::json!([]));

    let recyclables = taxonomy.category("recyclables").expect("recyclables kept");
    assert!(recyclables.suitable_treatments.is_empty());
    assert_eq!(
        recyclables.extra["suitable_treatments"],
        serde_json::json!(["recycling", null])
    );

    assert_eq!(taxonomy.category_path("paper").as_deref(), Some("recyclables.paper"));
    let comparison = taxonomy.compare_treatments("paper");
    assert_eq!(comparison.treatment_details.len(), 1);
    assert_eq!(comparison.treatment_details[0].name, Some("回收利用"));
    assert!(taxonomy.compare_treatments("recyclables").treatment_details.is_empty());
}

#[test]
fn lookup_reports_owning_store() {
    let kb = KnowledgeBase::open(&KnowledgeConfig::with_data_dir(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/knowledge"),
    ));
    assert_eq!(kb.lookup("paper").map(|(store, _)| store), Some("taxonomy"));
    assert_eq!(kb.lookup("RDF").map(|(store, _)| store), Some("terminology"));
    assert_eq!(
        kb.lookup("GB 18485-2014").map(|(store, _)| store),
        Some("standards")
    );
    assert!(kb.status().iter().all(|s| s.loaded));
}
