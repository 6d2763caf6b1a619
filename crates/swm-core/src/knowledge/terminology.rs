//! Bilingual terminology store.
//!
//! Source: a single JSON file mapping category name -> { term key -> term record }. Keys are
//! usually abbreviations or English identifiers (`MSW`, `RDF`, `incineration`).

use super::render::{push_bullets, push_value_block};
use super::search::{record_matches, Keyword};
use super::tree::{
    load_json_document, load_json_document_or_empty, KnowledgeRecord, KnowledgeTree, LoadError,
};
use super::KnowledgeSource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::str::FromStr;

/// Category holding waste-type terms (used by [`TerminologyStore::waste_type_properties`]).
pub const WASTE_TYPES_CATEGORY: &str = "waste_types";
/// Category holding treatment-method terms.
pub const TREATMENT_METHODS_CATEGORY: &str = "treatment_methods";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" | "cn" | "zh-cn" | "chinese" | "中文" => Ok(Self::Zh),
            "en" | "english" => Ok(Self::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name_zh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advantages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disadvantages: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TermRecord {
    /// Chinese term, falling back to the Chinese full name.
    pub fn zh_name(&self) -> Option<&str> {
        self.term_zh.as_deref().or(self.full_name_zh.as_deref())
    }

    pub fn full_name(&self, language: Language) -> Option<&str> {
        match language {
            Language::Zh => self.full_name_zh.as_deref(),
            Language::En => self.full_name_en.as_deref(),
        }
    }

    fn has_zh(&self, text: &str) -> bool {
        self.term_zh.as_deref() == Some(text) || self.full_name_zh.as_deref() == Some(text)
    }
}

impl KnowledgeRecord for TermRecord {
    fn extra_mut(&mut self) -> Option<&mut Map<String, Value>> {
        Some(&mut self.extra)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TermMatch<'a> {
    pub id: &'a str,
    pub category: &'a str,
    pub data: &'a TermRecord,
}

#[derive(Debug, Clone, Default)]
pub struct TerminologyStore {
    categories: KnowledgeTree<KnowledgeTree<TermRecord>>,
}

impl TerminologyStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the terminology file; a missing or unreadable file gives an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::from_document(load_json_document_or_empty(path.as_ref()))
    }

    pub fn try_open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        load_json_document(path.as_ref()).map(Self::from_document)
    }

    pub fn from_document(document: Map<String, Value>) -> Self {
        let categories: KnowledgeTree<KnowledgeTree<TermRecord>> =
            KnowledgeTree::from_json_map(document);
        let store = Self { categories };
        tracing::info!(
            target: "swm::knowledge",
            categories = store.categories.len(),
            terms = store.term_count(),
            "Terminology store loaded"
        );
        store
    }

    /// Category names in source order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys()
    }

    pub fn term_count(&self) -> usize {
        self.categories.iter().map(|(_, terms)| terms.len()).sum()
    }

    fn all_terms(&self) -> impl Iterator<Item = (&str, &str, &TermRecord)> {
        self.categories
            .iter()
            .flat_map(|(cat, terms)| terms.iter().map(move |(key, rec)| (cat, key, rec)))
    }

    /// Exact, case-sensitive key lookup, scoped to one category or scanning all of them in
    /// source order.
    pub fn term(&self, term: &str, category: Option<&str>) -> Option<&TermRecord> {
        match category {
            Some(cat) => self.categories.get(cat)?.get(term),
            None => self.categories.iter().find_map(|(_, terms)| terms.get(term)),
        }
    }

    /// Translates a term key (case-insensitive). Towards English, a Chinese input is also
    /// matched against each record's Chinese term and full name.
    pub fn translate(&self, term: &str, to: Language) -> Option<&str> {
        let lowered = term.to_lowercase();
        let (key, record) = self
            .all_terms()
            .find(|(_, key, rec)| {
                key.to_lowercase() == lowered || (to == Language::En && rec.has_zh(term))
            })
            .map(|(_, key, rec)| (key, rec))?;
        match to {
            Language::Zh => record.zh_name(),
            Language::En => Some(
                record
                    .term_en
                    .as_deref()
                    .or(record.full_name_en.as_deref())
                    .unwrap_or(key),
            ),
        }
    }

    pub fn definition(&self, term: &str) -> Option<&str> {
        self.term(term, None)?.definition.as_deref()
    }

    /// Reverse lookup from a full name to its key. English names compare case-insensitively,
    /// Chinese names exactly.
    pub fn abbreviation(&self, full_name: &str) -> Option<&str> {
        let lowered = full_name.to_lowercase();
        self.all_terms()
            .find(|(_, _, rec)| {
                rec.full_name_en
                    .as_deref()
                    .is_some_and(|en| en.to_lowercase() == lowered)
                    || rec.full_name_zh.as_deref() == Some(full_name)
            })
            .map(|(_, key, _)| key)
    }

    pub fn expand_abbreviation(&self, abbr: &str, language: Language) -> Option<&str> {
        self.term(abbr, None)?.full_name(language)
    }

    /// Keyword search: a term matches on its key or on any (nested) field.
    pub fn search_terms(&self, keyword: &str, category: Option<&str>) -> Vec<TermMatch<'_>> {
        let keyword = Keyword::new(keyword);
        self.categories
            .iter()
            .filter(|(cat, _)| category.map_or(true, |c| c == *cat))
            .flat_map(|(cat, terms)| {
                terms.iter().map(move |(id, data)| TermMatch {
                    id,
                    category: cat,
                    data,
                })
            })
            .filter(|m| keyword.matches_text(m.id) || record_matches(m.data, &keyword))
            .collect()
    }

    pub fn related_terms(&self, term: &str) -> &[String] {
        self.term(term, None)
            .map(|t| t.related_terms.as_slice())
            .unwrap_or(&[])
    }

    pub fn terms_by_category(&self, category: &str) -> Vec<(&str, &TermRecord)> {
        self.categories
            .get(category)
            .map(|terms| terms.iter().collect())
            .unwrap_or_default()
    }

    pub fn waste_type_properties(&self, waste_type: &str) -> Option<&Value> {
        self.term(waste_type, Some(WASTE_TYPES_CATEGORY))?
            .properties
            .as_ref()
    }

    pub fn treatment_method_info(&self, method: &str) -> Option<&TermRecord> {
        self.term(method, Some(TREATMENT_METHODS_CATEGORY))
    }

    /// Human-readable summary. Unknown terms give a one-line message rather than an error.
    pub fn explain_term(&self, term: &str, detailed: bool) -> String {
        let Some(record) = self.term(term, None) else {
            return format!("未找到术语: {}", term);
        };

        let mut lines = Vec::new();
        lines.push(match record.zh_name() {
            Some(zh) => format!("{} ({})", term, zh),
            None => term.to_string(),
        });
        if let Some(def) = &record.definition {
            lines.push(format!("定义: {}", def));
        }

        if detailed {
            if let Some(props) = &record.properties {
                push_value_block(&mut lines, "特性", props);
            }
            push_bullets(&mut lines, "优点", &record.advantages);
            push_bullets(&mut lines, "缺点", &record.disadvantages);
            if !record.related_terms.is_empty() {
                lines.push(format!("相关术语: {}", record.related_terms.join(", ")));
            }
            if !record.aliases.is_empty() {
                lines.push(format!("别名: {}", record.aliases.join(", ")));
            }
        }

        lines.join("\n")
    }
}

impl KnowledgeSource for TerminologyStore {
    fn name(&self) -> &'static str {
        "terminology"
    }

    fn entry_count(&self) -> usize {
        self.term_count()
    }

    fn query(&self, id: &str) -> Option<Value> {
        self.term(id, None).and_then(|t| serde_json::to_value(t).ok())
    }
}
