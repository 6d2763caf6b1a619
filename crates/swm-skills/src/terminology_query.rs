//! TerminologyQuery skill: bilingual term lookup, translation and explanation.

use crate::payload::{opt_bool, opt_str, operation, require, str_field, unknown_operation};
use serde_json::{json, Value};
use std::sync::Arc;
use swm_core::{AgentSkill, KnowledgeBase, Language, SkillError};

const SKILL_NAME: &str = "TerminologyQuery";

pub struct TerminologyQuery {
    kb: Arc<KnowledgeBase>,
}

impl TerminologyQuery {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    fn language(payload: &Value, field: &str) -> Result<Language, SkillError> {
        Ok(str_field(payload, field)?.parse::<Language>()?)
    }

    fn run(&self, op: &str, payload: &Value) -> Result<Value, SkillError> {
        let terms = &self.kb.terminology;
        let result = match op {
            "term" => json!(terms.term(str_field(payload, "term")?, opt_str(payload, "category"))),
            "translate" => json!(terms.translate(
                str_field(payload, "term")?,
                Self::language(payload, "to")?
            )),
            "definition" => json!(terms.definition(str_field(payload, "term")?)),
            "abbreviation" => json!(terms.abbreviation(str_field(payload, "full_name")?)),
            "expand_abbreviation" => json!(terms.expand_abbreviation(
                str_field(payload, "abbreviation")?,
                Self::language(payload, "language")?
            )),
            "search" => json!(terms.search_terms(
                str_field(payload, "keyword")?,
                opt_str(payload, "category")
            )),
            "related_terms" => json!(terms.related_terms(str_field(payload, "term")?)),
            "terms_by_category" => {
                let entries: serde_json::Map<String, Value> = terms
                    .terms_by_category(str_field(payload, "category")?)
                    .into_iter()
                    .map(|(id, t)| (id.to_string(), json!(t)))
                    .collect();
                Value::Object(entries)
            }
            "waste_type_properties" => {
                json!(terms.waste_type_properties(str_field(payload, "waste_type")?))
            }
            "treatment_method_info" => {
                json!(terms.treatment_method_info(str_field(payload, "method")?))
            }
            "explain" => json!(terms.explain_term(
                str_field(payload, "term")?,
                opt_bool(payload, "detailed").unwrap_or(false)
            )),
            other => return Err(unknown_operation(SKILL_NAME, other)),
        };
        Ok(result)
    }
}

#[async_trait::async_trait]
impl AgentSkill for TerminologyQuery {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(&self, payload: Option<Value>) -> Result<Value, SkillError> {
        let payload = require(payload.as_ref(), SKILL_NAME)?;
        let op = operation(payload)?;
        let result = self.run(op, payload)?;
        tracing::debug!(target: "swm::skills", skill = SKILL_NAME, operation = op, "Terminology query served");
        Ok(json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "operation": op,
            "result": result
        }))
    }
}
