//! Builders that chain store lookups into `{instruction, query}` pairs.

use super::fill::{fill_template, PromptError, PromptParams};
use super::TaskType;
use crate::knowledge::{KnowledgeBase, Region};
use serde::{Deserialize, Serialize};

/// Upper bound on standard ids listed as policy reference context.
pub const MAX_REFERENCE_STANDARDS: usize = 10;

/// Handed to the generation backend as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub instruction: String,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionRequest {
    /// Taxonomy id or free text.
    pub waste_type: String,
    /// Tonnes.
    pub quantity: f64,
    pub treatment_method: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub include_transport: bool,
    #[serde(default)]
    pub transport_distance_km: Option<f64>,
    #[serde(default)]
    pub transport_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcaRequest {
    pub waste_type: String,
    pub treatment_method: String,
    #[serde(default)]
    pub functional_unit: Option<String>,
    #[serde(default)]
    pub system_boundary: Option<String>,
    #[serde(default)]
    pub impact_categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub question: String,
    #[serde(default)]
    pub facility_type: Option<String>,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Borrows a knowledge base and assembles prompts for each task type.
#[derive(Debug, Clone, Copy)]
pub struct PromptComposer<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> PromptComposer<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    fn pair(task: TaskType, params: &PromptParams) -> Result<PromptPair, PromptError> {
        let query = fill_template(task.user_template(), params)?;
        tracing::debug!(target: "swm::prompts", task = %task, "Prompt pair assembled");
        Ok(PromptPair {
            instruction: task.instruction().to_string(),
            query,
        })
    }

    /// `name (id)` when the taxonomy knows the waste type, otherwise the input unchanged.
    fn waste_label(&self, waste_type: &str) -> String {
        match self.kb.taxonomy.category(waste_type).and_then(|c| c.display_name()) {
            Some(name) if name != waste_type => format!("{} ({})", name, waste_type),
            _ => waste_type.to_string(),
        }
    }

    fn treatment_label(&self, method: &str) -> String {
        match self.kb.taxonomy.treatment(method).and_then(|t| t.display_name()) {
            Some(name) if name != method => format!("{} ({})", name, method),
            _ => method.to_string(),
        }
    }

    pub fn general(&self, question: &str) -> Result<PromptPair, PromptError> {
        Self::pair(TaskType::General, &PromptParams::new().set("question", question))
    }

    pub fn emission_calculation(&self, req: &EmissionRequest) -> Result<PromptPair, PromptError> {
        let transport = if req.include_transport {
            let distance = req
                .transport_distance_km
                .map_or_else(|| super::UNSPECIFIED.to_string(), |d| d.to_string());
            let mode = req
                .transport_mode
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(super::UNSPECIFIED);
            format!("运输距离: {} 公里, 运输方式: {}", distance, mode)
        } else {
            "运输环节: 不计入运输环节".to_string()
        };

        let params = PromptParams::new()
            .set("waste_type", self.waste_label(&req.waste_type))
            .set("quantity", req.quantity)
            .set("treatment_method", self.treatment_label(&req.treatment_method))
            .set_opt("region", req.region.as_deref())
            .set("transport", transport);
        Self::pair(TaskType::EmissionCalculation, &params)
    }

    /// Candidate treatments come from the taxonomy's suitable-treatment list; ids without a
    /// treatment record are listed as-is.
    pub fn treatment_comparison(
        &self,
        waste_type: &str,
        quantity: Option<f64>,
        region: Option<&str>,
    ) -> Result<PromptPair, PromptError> {
        let comparison = self.kb.taxonomy.compare_treatments(waste_type);
        let options: Vec<String> = comparison
            .suitable_treatments
            .iter()
            .map(|id| self.treatment_label(id))
            .collect();

        let params = PromptParams::new()
            .set("waste_type", self.waste_label(waste_type))
            .set_opt("quantity", quantity.map(|q| format!("{} 吨", q)))
            .set_opt("region", region)
            .set_opt(
                "treatment_options",
                (!options.is_empty()).then(|| options.join("、")),
            );
        Self::pair(TaskType::TreatmentComparison, &params)
    }

    pub fn lca_analysis(&self, req: &LcaRequest) -> Result<PromptPair, PromptError> {
        let params = PromptParams::new()
            .set("waste_type", self.waste_label(&req.waste_type))
            .set("treatment_method", self.treatment_label(&req.treatment_method))
            .set_opt("functional_unit", req.functional_unit.as_deref())
            .set_opt("system_boundary", req.system_boundary.as_deref())
            .set_opt(
                "impact_categories",
                (!req.impact_categories.is_empty()).then(|| req.impact_categories.join("、")),
            );
        Self::pair(TaskType::LcaAnalysis, &params)
    }

    /// Standards matching `topic` (region-filtered when the region is recognised) are listed
    /// as reference context.
    pub fn policy_query(
        &self,
        topic: &str,
        region: Option<&str>,
        policy_type: Option<&str>,
    ) -> Result<PromptPair, PromptError> {
        let region_filter = region.and_then(|r| r.parse::<Region>().ok());
        let references: Vec<&str> = self
            .kb
            .standards
            .search_standards(topic, None, region_filter)
            .into_iter()
            .take(MAX_REFERENCE_STANDARDS)
            .map(|m| m.id)
            .collect();

        let params = PromptParams::new()
            .set("topic", topic)
            .set_opt("region", region)
            .set_opt("policy_type", policy_type)
            .set_opt(
                "reference_standards",
                (!references.is_empty()).then(|| references.join("、")),
            );
        Self::pair(TaskType::PolicyQuery, &params)
    }

    pub fn technical_consultation(&self, req: &ConsultationRequest) -> Result<PromptPair, PromptError> {
        let params = PromptParams::new()
            .set("question", &req.question)
            .set_opt("facility_type", req.facility_type.as_deref())
            .set_opt("capacity", req.capacity.as_deref())
            .set_opt("region", req.region.as_deref());
        Self::pair(TaskType::TechnicalConsultation, &params)
    }

    pub fn term_explanation(&self, term: &str) -> Result<PromptPair, PromptError> {
        let params = PromptParams::new()
            .set("term", term)
            .set("reference", self.kb.terminology.explain_term(term, true));
        Self::pair(TaskType::TermExplanation, &params)
    }
}
