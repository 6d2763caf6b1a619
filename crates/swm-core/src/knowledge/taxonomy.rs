//! Waste taxonomy store: categories (with one level of subcategories), treatment methods,
//! and the waste-management hierarchy.
//!
//! Source directory layout:
//!
//! | File | Top-level keys |
//! |------|----------------|
//! | `waste_classification.json` | `waste_categories` (id -> category), `waste_hierarchy` (ordered list) |
//! | `treatment_methods.json` | `treatment_methods` (id -> treatment) |

use super::search::{record_matches, Keyword};
use super::tree::{
    load_json_document, load_json_document_or_empty, KnowledgeRecord, KnowledgeTree, LoadError,
};
use super::KnowledgeSource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::str::FromStr;

pub const WASTE_CLASSIFICATION_FILE: &str = "waste_classification.json";
pub const TREATMENT_METHODS_FILE: &str = "treatment_methods.json";

/// One waste type or group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suitable_treatments: Vec<String>,
    #[serde(default, skip_serializing_if = "KnowledgeTree::is_empty")]
    pub subcategories: KnowledgeTree<CategoryRecord>,
    /// Attributes without a typed field (moisture content, calorific value, examples, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CategoryRecord {
    /// Chinese name, falling back to the English one.
    pub fn display_name(&self) -> Option<&str> {
        self.name_zh.as_deref().or(self.name_en.as_deref())
    }
}

impl KnowledgeRecord for CategoryRecord {
    fn extra_mut(&mut self) -> Option<&mut Map<String, Value>> {
        Some(&mut self.extra)
    }
}

/// One processing technology.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreatmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Technology variants (e.g. grate furnace, fluidized bed), opaque payload.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub types: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advantages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disadvantages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applicable_waste: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TreatmentRecord {
    pub fn display_name(&self) -> Option<&str> {
        self.name_zh.as_deref().or(self.name_en.as_deref())
    }
}

impl KnowledgeRecord for TreatmentRecord {
    fn extra_mut(&mut self) -> Option<&mut Map<String, Value>> {
        Some(&mut self.extra)
    }
}

/// One level of the waste-management preference ordering (1 = most preferred).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyEntry {
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which half of the taxonomy a keyword search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    Waste,
    Treatment,
    #[default]
    All,
}

impl SearchScope {
    fn includes_waste(self) -> bool {
        matches!(self, Self::Waste | Self::All)
    }

    fn includes_treatment(self) -> bool {
        matches!(self, Self::Treatment | Self::All)
    }
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "waste" => Ok(Self::Waste),
            "treatment" => Ok(Self::Treatment),
            "all" | "" => Ok(Self::All),
            other => Err(format!("unknown search scope: {}", other)),
        }
    }
}

/// A category hit. Subcategory hits carry a composite `parent.child` id.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryMatch<'a> {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'a str>,
    pub data: &'a CategoryRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreatmentMatch<'a> {
    pub id: &'a str,
    pub data: &'a TreatmentRecord,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaxonomySearchResult<'a> {
    pub waste_category_matches: Vec<CategoryMatch<'a>>,
    pub treatment_method_matches: Vec<TreatmentMatch<'a>>,
}

impl TaxonomySearchResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.waste_category_matches.is_empty() && self.treatment_method_matches.is_empty()
    }
}

/// Projection of a treatment used when comparing options for one waste type.
#[derive(Debug, Clone, Serialize)]
pub struct TreatmentDetail<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub advantages: &'a [String],
    pub disadvantages: &'a [String],
}

/// Suitable treatments for a waste type plus the details that could be resolved.
///
/// `suitable_treatments` may list ids that have no treatment record; those ids are
/// absent from `treatment_details`.
#[derive(Debug, Clone, Serialize)]
pub struct TreatmentComparison<'a> {
    pub waste_type: String,
    pub suitable_treatments: &'a [String],
    pub treatment_details: Vec<TreatmentDetail<'a>>,
}

/// Read-only taxonomy store.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyStore {
    categories: KnowledgeTree<CategoryRecord>,
    treatments: KnowledgeTree<TreatmentRecord>,
    hierarchy: Vec<HierarchyEntry>,
}

impl TaxonomyStore {
    /// Empty store (degraded mode).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads both taxonomy files from `dir`. Each missing or unreadable file leaves its half
    /// of the store empty.
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let classification = load_json_document_or_empty(&dir.join(WASTE_CLASSIFICATION_FILE));
        let treatments = load_json_document_or_empty(&dir.join(TREATMENT_METHODS_FILE));
        Self::from_documents(classification, treatments)
    }

    /// Strict variant of [`TaxonomyStore::open`]: both files must be readable.
    pub fn try_open<P: AsRef<Path>>(dir: P) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let classification = load_json_document(&dir.join(WASTE_CLASSIFICATION_FILE))?;
        let treatments = load_json_document(&dir.join(TREATMENT_METHODS_FILE))?;
        Ok(Self::from_documents(classification, treatments))
    }

    /// Builds the store from already-parsed documents.
    pub fn from_documents(
        mut classification: Map<String, Value>,
        mut treatments: Map<String, Value>,
    ) -> Self {
        let categories = KnowledgeTree::from_document_field(&mut classification, "waste_categories");
        let hierarchy = match classification.remove("waste_hierarchy") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<HierarchyEntry>(item) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        tracing::warn!(target: "swm::knowledge", error = %e, "Skipping hierarchy entry");
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };
        let treatments = KnowledgeTree::from_document_field(&mut treatments, "treatment_methods");

        tracing::info!(
            target: "swm::knowledge",
            categories = categories.len(),
            treatments = treatments.len(),
            hierarchy_levels = hierarchy.len(),
            "Taxonomy store loaded"
        );

        Self {
            categories,
            treatments,
            hierarchy,
        }
    }

    /// Resolves a category id: top level first, then the subcategories of every top-level
    /// entry in source order (first hit wins). A composite `parent.child` id, as produced by
    /// [`TaxonomyStore::search_by_keyword`], is also accepted.
    pub fn category(&self, id: &str) -> Option<&CategoryRecord> {
        if let Some(record) = self.categories.get(id) {
            return Some(record);
        }
        if let Some(record) = self
            .categories
            .iter()
            .find_map(|(_, parent)| parent.subcategories.get(id))
        {
            return Some(record);
        }
        let (parent, child) = id.split_once('.')?;
        self.categories.get(parent)?.subcategories.get(child)
    }

    /// Where `id` lives: the bare id for a top-level category, `parent.child` for a
    /// subcategory.
    pub fn category_path(&self, id: &str) -> Option<String> {
        if self.categories.contains_key(id) {
            return Some(id.to_string());
        }
        self.categories
            .iter()
            .find(|(_, parent)| parent.subcategories.contains_key(id))
            .map(|(parent_id, _)| format!("{}.{}", parent_id, id))
    }

    pub fn treatment(&self, id: &str) -> Option<&TreatmentRecord> {
        self.treatments.get(id)
    }

    /// Treatment ids listed for a waste category; empty when the category or field is absent.
    pub fn suitable_treatments(&self, waste_id: &str) -> &[String] {
        self.category(waste_id)
            .map(|c| c.suitable_treatments.as_slice())
            .unwrap_or(&[])
    }

    /// Waste ids a treatment applies to; empty when the treatment or field is absent.
    pub fn applicable_waste_types(&self, treatment_id: &str) -> &[String] {
        self.treatment(treatment_id)
            .map(|t| t.applicable_waste.as_slice())
            .unwrap_or(&[])
    }

    /// Hierarchy in declared order.
    pub fn hierarchy(&self) -> &[HierarchyEntry] {
        &self.hierarchy
    }

    pub fn hierarchy_entry(&self, priority: u32) -> Option<&HierarchyEntry> {
        self.hierarchy.iter().find(|e| e.priority == priority)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryRecord)> {
        self.categories.iter()
    }

    pub fn treatments(&self) -> impl Iterator<Item = (&str, &TreatmentRecord)> {
        self.treatments.iter()
    }

    pub fn compare_treatments(&self, waste_id: &str) -> TreatmentComparison<'_> {
        let suitable = self.suitable_treatments(waste_id);
        let treatment_details = suitable
            .iter()
            .filter_map(|id| {
                self.treatment(id).map(|t| TreatmentDetail {
                    id: id.as_str(),
                    name: t.display_name(),
                    description: t.description.as_deref(),
                    advantages: &t.advantages,
                    disadvantages: &t.disadvantages,
                })
            })
            .collect();
        TreatmentComparison {
            waste_type: waste_id.to_string(),
            suitable_treatments: suitable,
            treatment_details,
        }
    }

    /// Keyword search over categories (and their subcategories) and/or treatments.
    pub fn search_by_keyword(&self, keyword: &str, scope: SearchScope) -> TaxonomySearchResult<'_> {
        let keyword = Keyword::new(keyword);
        let mut result = TaxonomySearchResult::default();

        if scope.includes_waste() {
            for (id, category) in self.categories.iter() {
                if record_matches(category, &keyword) {
                    result.waste_category_matches.push(CategoryMatch {
                        id: id.to_string(),
                        parent: None,
                        data: category,
                    });
                }
                for (sub_id, sub) in category.subcategories.iter() {
                    if record_matches(sub, &keyword) {
                        result.waste_category_matches.push(CategoryMatch {
                            id: format!("{}.{}", id, sub_id),
                            parent: Some(id),
                            data: sub,
                        });
                    }
                }
            }
        }

        if scope.includes_treatment() {
            result.treatment_method_matches = self
                .treatments
                .iter()
                .filter(|(_, t)| record_matches(*t, &keyword))
                .map(|(id, data)| TreatmentMatch { id, data })
                .collect();
        }

        result
    }
}

impl KnowledgeSource for TaxonomyStore {
    fn name(&self) -> &'static str {
        "taxonomy"
    }

    fn entry_count(&self) -> usize {
        self.categories.len() + self.treatments.len()
    }

    fn query(&self, id: &str) -> Option<Value> {
        self.category(id)
            .map(|c| serde_json::to_value(c).ok())
            .or_else(|| self.treatment(id).map(|t| serde_json::to_value(t).ok()))
            .flatten()
    }
}
