//! swm-core: solid-waste advisory core (knowledge stores, keyword search, prompt templates).
//!
//! The three read-only stores are bundled in [`KnowledgeBase`]; [`PromptComposer`] turns
//! lookups into `{instruction, query}` pairs for a generation backend.

mod config;
pub mod knowledge;
pub mod prompts;
pub mod skills;

// Configuration
pub use config::{KnowledgeConfig, DEFAULT_DATA_DIR, STANDARDS_FILE, TERMINOLOGY_FILE};

// Knowledge stores
pub use knowledge::{
    CategoryRecord, HierarchyEntry, Keyword, KnowledgeBase, KnowledgeRecord, KnowledgeSource,
    KnowledgeTree, Language, LoadError, Region, RegulationLevel, SearchScope, StandardRecord,
    StandardsStore, StoreStatus, TaxonomyStore, TermRecord, TerminologyStore, TreatmentRecord,
};

// Prompts
pub use prompts::{
    fill_template, ConsultationRequest, EmissionRequest, LcaRequest, PromptComposer, PromptError,
    PromptPair, PromptParams, TaskType, UNSPECIFIED,
};

// Skills
pub use skills::{AgentSkill, SkillError, SkillRegistry};
