//! StandardsQuery skill: standards, regulations, guidelines, policies and best practices.
//!
//! `region` is optional everywhere and unrecognised values fall back to scanning all regions.

use crate::payload::{opt_parse, opt_str, operation, require, str_field, unknown_operation};
use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use swm_core::{AgentSkill, KnowledgeBase, Region, RegulationLevel, SkillError};

const SKILL_NAME: &str = "StandardsQuery";

fn entries<'a, T: serde::Serialize + 'a>(items: impl IntoIterator<Item = (&'a str, &'a T)>) -> Value {
    let map: Map<String, Value> = items
        .into_iter()
        .map(|(id, record)| (id.to_string(), json!(record)))
        .collect();
    Value::Object(map)
}

pub struct StandardsQuery {
    kb: Arc<KnowledgeBase>,
}

impl StandardsQuery {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    fn run(&self, op: &str, payload: &Value) -> Result<Value, SkillError> {
        let standards = &self.kb.standards;
        let region: Option<Region> = opt_parse(payload, "region");
        let result = match op {
            "standard" => json!(standards.standard(str_field(payload, "id")?, region)),
            "regulation" => {
                let level = str_field(payload, "level")?.parse::<RegulationLevel>()?;
                json!(standards.regulation(str_field(payload, "id")?, level))
            }
            "search" => json!(standards.search_standards(
                opt_str(payload, "keyword").unwrap_or(""),
                opt_str(payload, "category"),
                region
            )),
            "emission_standards" => json!(standards.emission_standards(region)),
            "classification_standards" => json!(standards.waste_classification_standards(region)),
            "china_standards" => entries(standards.china_standards(opt_str(payload, "category"))),
            "international_standards" => {
                entries(standards.international_standards(opt_str(payload, "organization")))
            }
            "ipcc_guidelines" => entries(standards.ipcc_guidelines()),
            "policy" => json!(standards.policy(str_field(payload, "id")?)),
            "best_practice" => json!(standards.best_practice(str_field(payload, "id")?)),
            "best_practices" => entries(standards.all_best_practices()),
            "emission_limits" => json!(standards.emission_limits(str_field(payload, "id")?)),
            "compare" => {
                let ids: Vec<&str> = payload
                    .get("ids")
                    .and_then(Value::as_array)
                    .ok_or("ids required")?
                    .iter()
                    .filter_map(Value::as_str)
                    .collect();
                let found: Map<String, Value> = standards
                    .compare_standards(ids)
                    .into_iter()
                    .map(|(id, record)| (id, json!(record)))
                    .collect();
                Value::Object(found)
            }
            "applicable" => json!(standards.applicable_standards(str_field(payload, "method")?, region)),
            "effective" => {
                let as_of = NaiveDate::parse_from_str(str_field(payload, "as_of")?, "%Y-%m-%d")?;
                json!(standards.effective_standards(as_of, region))
            }
            "explain" => json!(standards.explain_standard(str_field(payload, "id")?)),
            other => return Err(unknown_operation(SKILL_NAME, other)),
        };
        Ok(result)
    }
}

#[async_trait::async_trait]
impl AgentSkill for StandardsQuery {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(&self, payload: Option<Value>) -> Result<Value, SkillError> {
        let payload = require(payload.as_ref(), SKILL_NAME)?;
        let op = operation(payload)?;
        let result = self.run(op, payload)?;
        tracing::debug!(target: "swm::skills", skill = SKILL_NAME, operation = op, "Standards query served");
        Ok(json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "operation": op,
            "result": result
        }))
    }
}
