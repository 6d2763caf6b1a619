//! AdvisoryPrompt skill: assembles an `{instruction, query}` pair for one advisory task.
//!
//! Payload: `{ "task": "<task type>", ...task fields }`. Request-shaped tasks
//! (`emission_calculation`, `lca_analysis`, `technical_consultation`) take the request's
//! fields at the top level of the payload.

use crate::payload::{opt_f64, opt_str, require, str_field};
use serde_json::{json, Value};
use std::sync::Arc;
use swm_core::prompts::{ConsultationRequest, EmissionRequest, LcaRequest};
use swm_core::{AgentSkill, KnowledgeBase, PromptComposer, PromptPair, SkillError, TaskType};

const SKILL_NAME: &str = "AdvisoryPrompt";

pub struct AdvisoryPrompt {
    kb: Arc<KnowledgeBase>,
}

impl AdvisoryPrompt {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    fn compose(&self, task: TaskType, payload: &Value) -> Result<PromptPair, SkillError> {
        let composer = PromptComposer::new(&self.kb);
        let pair = match task {
            TaskType::General => composer.general(str_field(payload, "question")?)?,
            TaskType::EmissionCalculation => {
                let req: EmissionRequest = serde_json::from_value(payload.clone())?;
                composer.emission_calculation(&req)?
            }
            TaskType::TreatmentComparison => composer.treatment_comparison(
                str_field(payload, "waste_type")?,
                opt_f64(payload, "quantity"),
                opt_str(payload, "region"),
            )?,
            TaskType::LcaAnalysis => {
                let req: LcaRequest = serde_json::from_value(payload.clone())?;
                composer.lca_analysis(&req)?
            }
            TaskType::PolicyQuery => composer.policy_query(
                str_field(payload, "topic")?,
                opt_str(payload, "region"),
                opt_str(payload, "policy_type"),
            )?,
            TaskType::TechnicalConsultation => {
                let req: ConsultationRequest = serde_json::from_value(payload.clone())?;
                composer.technical_consultation(&req)?
            }
            TaskType::TermExplanation => composer.term_explanation(str_field(payload, "term")?)?,
        };
        Ok(pair)
    }
}

#[async_trait::async_trait]
impl AgentSkill for AdvisoryPrompt {
    fn name(&self) -> &str {
        SKILL_NAME
    }

    async fn execute(&self, payload: Option<Value>) -> Result<Value, SkillError> {
        let payload = require(payload.as_ref(), SKILL_NAME)?;
        let task = opt_str(payload, "task")
            .unwrap_or("general")
            .parse::<TaskType>()?;
        let pair = self.compose(task, payload)?;
        tracing::debug!(target: "swm::skills", skill = SKILL_NAME, task = %task, "Advisory prompt assembled");
        Ok(json!({
            "status": "ok",
            "skill": SKILL_NAME,
            "task": task,
            "prompt": pair
        }))
    }
}
