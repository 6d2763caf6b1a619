//! Read-only domain knowledge stores for the solid-waste advisory layer.
//!
//! ## Stores
//!
//! | Store       | Source                                                | Contents                                   |
//! |-------------|-------------------------------------------------------|--------------------------------------------|
//! | Taxonomy    | `waste_classification.json`, `treatment_methods.json` | waste categories, treatment methods, waste hierarchy |
//! | Terminology | `terminology.json`                                    | bilingual terms grouped by category        |
//! | Standards   | `standards.json`                                      | standards, regulations, guidelines, policies, best practices |
//!
//! Every store is loaded once and never mutated afterwards. A missing or malformed source
//! leaves its store empty (logged at `warn`) so the advisory flow keeps working on partial data.

mod render;
pub mod search;
pub mod standards;
pub mod taxonomy;
pub mod terminology;
pub mod tree;

pub use search::{record_matches, value_matches, Keyword};
pub use standards::{
    method_keyword, GuidelineRecord, PolicyRecord, PracticeRecord, ReferenceRecord, Region,
    RegulationLevel, RegulationRecord, StandardMatch, StandardRecord, StandardsStore,
};
pub use taxonomy::{
    CategoryMatch, CategoryRecord, HierarchyEntry, SearchScope, TaxonomySearchResult,
    TaxonomyStore, TreatmentComparison, TreatmentDetail, TreatmentMatch, TreatmentRecord,
};
pub use terminology::{Language, TermMatch, TermRecord, TerminologyStore};
pub use tree::{load_json_document, KnowledgeRecord, KnowledgeTree, LoadError};

use crate::config::KnowledgeConfig;
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;

/// Common surface of the three stores.
pub trait KnowledgeSource: Send + Sync {
    /// Short store name (`taxonomy`, `terminology`, `standards`).
    fn name(&self) -> &'static str;

    /// Number of top-level records across all of the store's trees.
    fn entry_count(&self) -> usize;

    /// Direct id lookup, returned as JSON.
    fn query(&self, id: &str) -> Option<Value>;

    fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStatus {
    pub name: &'static str,
    pub entries: usize,
    pub loaded: bool,
}

static GLOBAL: OnceCell<KnowledgeBase> = OnceCell::new();

/// The three stores bundled together. Build one at startup and share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub taxonomy: TaxonomyStore,
    pub terminology: TerminologyStore,
    pub standards: StandardsStore,
}

impl KnowledgeBase {
    pub fn new(
        taxonomy: TaxonomyStore,
        terminology: TerminologyStore,
        standards: StandardsStore,
    ) -> Self {
        Self {
            taxonomy,
            terminology,
            standards,
        }
    }

    /// Opens all three stores from the configured paths (each degrades to empty on its own).
    pub fn open(config: &KnowledgeConfig) -> Self {
        let kb = Self::new(
            TaxonomyStore::open(config.taxonomy_dir()),
            TerminologyStore::open(config.terminology_path()),
            StandardsStore::open(config.standards_path()),
        );
        tracing::info!(
            target: "swm::knowledge",
            data_dir = %config.data_dir.display(),
            "Knowledge base opened"
        );
        kb
    }

    pub fn sources(&self) -> [&dyn KnowledgeSource; 3] {
        [&self.taxonomy, &self.terminology, &self.standards]
    }

    pub fn status(&self) -> Vec<StoreStatus> {
        self.sources()
            .iter()
            .map(|s| StoreStatus {
                name: s.name(),
                entries: s.entry_count(),
                loaded: !s.is_empty(),
            })
            .collect()
    }

    /// Looks `id` up in each store, in order, returning the first hit with its store name.
    pub fn lookup(&self, id: &str) -> Option<(&'static str, Value)> {
        self.sources()
            .iter()
            .find_map(|s| s.query(id).map(|v| (s.name(), v)))
    }

    /// Process-wide instance, loaded from [`KnowledgeConfig::load`] on first use.
    /// Prefer passing an `Arc<KnowledgeBase>` explicitly; this exists for call sites that
    /// cannot be threaded through.
    pub fn global() -> &'static KnowledgeBase {
        GLOBAL.get_or_init(|| {
            let config = KnowledgeConfig::load().unwrap_or_else(|e| {
                tracing::warn!(target: "swm::knowledge", error = %e, "Knowledge config invalid, using defaults");
                KnowledgeConfig::default()
            });
            KnowledgeBase::open(&config)
        })
    }

    /// Installs `kb` as the process-wide instance. Fails (returning `kb`) if one exists already.
    pub fn init_global(kb: KnowledgeBase) -> Result<&'static KnowledgeBase, KnowledgeBase> {
        GLOBAL.set(kb)?;
        Ok(Self::global())
    }
}
