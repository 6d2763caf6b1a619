//! TaxonomyQuery skill: waste categories, treatment methods and the waste hierarchy.

use crate::payload::{opt_str, operation, require, str_field, unknown_operation};
use serde_json::{json, Value};
use std::sync::Arc;
use swm_core::{AgentSkill, KnowledgeBase, SearchScope, SkillError};

const SKILL_NAME: &str = "TaxonomyQuery";

pub struct TaxonomyQuery {
    kb: Arc<KnowledgeBase>,
}

impl TaxonomyQuery {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    fn run(&self, op: &str, payload: &Value) -> Result<Value, SkillError> {
        let taxonomy = &self.kb.taxonomy;
        let result = match op {
            "category" => json!(taxonomy.category(str_field(payload, "id")?)),
            "category_path" => json!(taxonomy.category_path(str_field(payload, "id")?)),
            "treatment" => json!(taxonomy.treatment(str_field(payload, "id")?)),
            "suitable_treatments" => {
                json!(taxonomy.suitable_treatments(str_field(payload, "waste_id")?))
            }
            "applicable_waste_types" => {
                json!(taxonomy.applicable_waste_types(str_field(payload, "treatment_id")?))
            }
            "hierarchy" => json!(taxonomy.hierarchy()),
            "compare_treatments" => {
                json!(taxonomy.compare_treatments(str_field(payload, "waste_id")?))
            }
            "search" => {
                let scope = match opt_str(payload, "scope") {
                    Some(s) => s.parse::<SearchScope>()?,
                    None => SearchScope::All,
                };
                json!(taxonomy.search_by_keyword(str_field(payload, "keyword")?, scope))
            }
            other => return Err(unknown_operation(SKILL_NAME, other)),
        };
        Ok(result)
    }
}

#[async_trait::async_trait]
impl AgentSkill for TaxonomyQuery {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(&self, payload: Option<Value>) -> Result<Value, SkillError> {
        let payload = require(payload.as_ref(), SKILL_NAME)?;
        let op = operation(payload)?;
        let result = self.run(op, payload)?;
        tracing::debug!(target: "swm::skills", skill = SKILL_NAME, operation = op, "Taxonomy query served");
        Ok(json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "operation": op,
            "result": result
        }))
    }
}
