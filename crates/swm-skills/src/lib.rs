//! Agent skills exposing the solid-waste knowledge stores and prompt composer.
//!
//! Every skill takes a JSON payload and answers with
//! `{ "status": "ok", "skill": ..., "result" | "prompt": ... }`.

pub use swm_core::{AgentSkill, SkillRegistry};

mod advisory_prompt;
mod payload;
mod standards_query;
mod taxonomy_query;
mod terminology_query;

pub use advisory_prompt::AdvisoryPrompt;
pub use standards_query::StandardsQuery;
pub use taxonomy_query::TaxonomyQuery;
pub use terminology_query::TerminologyQuery;

use std::sync::Arc;
use swm_core::KnowledgeBase;

/// Registers the four knowledge skills, all sharing one knowledge base.
pub fn register_knowledge_skills(registry: &mut SkillRegistry, kb: Arc<KnowledgeBase>) {
    registry.register(Arc::new(TaxonomyQuery::new(Arc::clone(&kb))));
    registry.register(Arc::new(TerminologyQuery::new(Arc::clone(&kb))));
    registry.register(Arc::new(StandardsQuery::new(Arc::clone(&kb))));
    registry.register(Arc::new(AdvisoryPrompt::new(kb)));
    tracing::info!(target: "swm::skills", skills = ?registry.skill_names(), "Knowledge skills registered");
}
