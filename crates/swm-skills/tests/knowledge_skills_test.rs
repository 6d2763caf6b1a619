//! Knowledge skills dispatched through the registry against swm-core's fixtures.
//!
//! Run with: `cargo test --test knowledge_skills_test`

use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use swm_core::{KnowledgeBase, KnowledgeConfig};
use swm_skills::{register_knowledge_skills, SkillRegistry};

fn registry() -> SkillRegistry {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../swm-core/tests/fixtures/knowledge");
    let kb = Arc::new(KnowledgeBase::open(&KnowledgeConfig::with_data_dir(data_dir)));
    let mut registry = SkillRegistry::new();
    register_knowledge_skills(&mut registry, kb);
    registry
}

#[tokio::test]
async fn registers_all_knowledge_skills() {
    let registry = registry();
    assert_eq!(
        registry.skill_names(),
        vec!["TaxonomyQuery", "TerminologyQuery", "StandardsQuery", "AdvisoryPrompt"]
    );
}

#[tokio::test]
async fn taxonomy_operations() {
    let registry = registry();
    let out = registry
        .dispatch("TaxonomyQuery", Some(json!({ "operation": "category", "id": "paper" })))
        .await
        .expect("category lookup");
    assert_eq!(out["status"], "ok");
    assert_eq!(out["result"]["name_zh"], "废纸");

    let out = registry
        .dispatch(
            "TaxonomyQuery",
            Some(json!({ "operation": "compare_treatments", "waste_id": "food_waste" })),
        )
        .await
        .unwrap();
    assert_eq!(out["result"]["suitable_treatments"].as_array().unwrap().len(), 3);
    assert_eq!(out["result"]["treatment_details"].as_array().unwrap().len(), 2);

    let out = registry
        .dispatch(
            "TaxonomyQuery",
            Some(json!({ "operation": "search", "keyword": "废纸", "scope": "waste" })),
        )
        .await
        .unwrap();
    assert_eq!(out["result"]["waste_category_matches"][1]["id"], "recyclables.paper");
    assert_eq!(out["result"]["waste_category_matches"][1]["parent"], "recyclables");

    let missing = registry
        .dispatch("TaxonomyQuery", Some(json!({ "operation": "category", "id": "asbestos" })))
        .await
        .unwrap();
    assert!(missing["result"].is_null());
}

#[tokio::test]
async fn terminology_operations() {
    let registry = registry();
    let out = registry
        .dispatch(
            "TerminologyQuery",
            Some(json!({ "operation": "translate", "term": "msw", "to": "zh" })),
        )
        .await
        .unwrap();
    assert_eq!(out["result"], "城市生活垃圾");

    let out = registry
        .dispatch(
            "TerminologyQuery",
            Some(json!({ "operation": "explain", "term": "PFAS" })),
        )
        .await
        .unwrap();
    assert_eq!(out["result"], "未找到术语: PFAS");

    let bad_language = registry
        .dispatch(
            "TerminologyQuery",
            Some(json!({ "operation": "translate", "term": "MSW", "to": "fr" })),
        )
        .await;
    assert!(bad_language.is_err());
}

#[tokio::test]
async fn standards_operations() {
    let registry = registry();
    let out = registry
        .dispatch(
            "StandardsQuery",
            Some(json!({ "operation": "emission_standards", "region": "china" })),
        )
        .await
        .unwrap();
    assert_eq!(out["result"].as_array().unwrap().len(), 2);

    // unrecognised region scans everything
    let out = registry
        .dispatch(
            "StandardsQuery",
            Some(json!({ "operation": "standard", "id": "2010/75/EU", "region": "mars" })),
        )
        .await
        .unwrap();
    assert_eq!(out["result"]["organization"], "EU");

    let out = registry
        .dispatch(
            "StandardsQuery",
            Some(json!({ "operation": "compare", "ids": ["GB 18485-2014", "nope", "ISO 14040"] })),
        )
        .await
        .unwrap();
    let keys: Vec<&String> = out["result"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["GB 18485-2014", "ISO 14040"]);

    let out = registry
        .dispatch(
            "StandardsQuery",
            Some(json!({ "operation": "effective", "as_of": "2020-01-01" })),
        )
        .await
        .unwrap();
    assert_eq!(out["result"].as_array().unwrap().len(), 5);

    let out = registry
        .dispatch("StandardsQuery", Some(json!({ "operation": "ipcc_guidelines" })))
        .await
        .unwrap();
    assert_eq!(out["result"].as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn advisory_prompt_tasks() {
    let registry = registry();
    let out = registry
        .dispatch(
            "AdvisoryPrompt",
            Some(json!({
                "task": "emission_calculation",
                "waste_type": "food_waste",
                "quantity": 120.0,
                "treatment_method": "anaerobic_digestion",
                "include_transport": true,
                "transport_distance_km": 30,
                "transport_mode": "压缩式垃圾车"
            })),
        )
        .await
        .unwrap();
    assert_eq!(out["task"], "emission_calculation");
    let query = out["prompt"]["query"].as_str().unwrap();
    assert!(query.contains("废物类型: 厨余垃圾 (food_waste)"));
    assert!(query.contains("运输距离: 30 公里, 运输方式: 压缩式垃圾车"));
    assert!(query.contains("所在地区: 未指定"));

    let out = registry
        .dispatch(
            "AdvisoryPrompt",
            Some(json!({ "task": "term_explanation", "term": "RDF" })),
        )
        .await
        .unwrap();
    assert!(out["prompt"]["query"].as_str().unwrap().contains("RDF (垃圾衍生燃料)"));

    let missing = registry
        .dispatch("AdvisoryPrompt", Some(json!({ "task": "policy_query" })))
        .await;
    assert!(missing.is_err());

    let unknown = registry
        .dispatch("AdvisoryPrompt", Some(json!({ "task": "poetry" })))
        .await;
    assert!(unknown.is_err());
}

#[tokio::test]
async fn payload_is_required() {
    let registry = registry();
    assert!(registry.dispatch("StandardsQuery", None).await.is_err());
    assert!(registry
        .dispatch("StandardsQuery", Some(json!({ "operation": "teleport" })))
        .await
        .is_err());
}
