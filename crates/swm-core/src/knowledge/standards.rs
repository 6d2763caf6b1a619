//! Standards, regulations, technical guidelines, policies and best practices.
//!
//! Source: a single JSON file with the top-level keys
//! `china_standards`, `international_standards`, `regulations` (`national` / `local`),
//! `technical_guidelines`, `policies` and `best_practices`. Each is an id -> record map.

use super::render::value_text;
use super::search::{record_matches, Keyword};
use super::tree::{
    load_json_document, load_json_document_or_empty, KnowledgeRecord, KnowledgeTree, LoadError,
};
use super::KnowledgeSource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

/// Category tag carried by emission standards.
pub const EMISSION_CATEGORY: &str = "emission";
/// Category tag carried by waste classification standards.
pub const CLASSIFICATION_CATEGORY: &str = "classification";

/// Treatment-method keywords translated before searching the (Chinese) standard texts.
const METHOD_KEYWORDS: [(&str, &str); 4] = [
    ("incineration", "焚烧"),
    ("landfill", "填埋"),
    ("composting", "堆肥"),
    ("recycling", "回收"),
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    China,
    International,
}

impl Region {
    /// Scan order used when no region is given.
    pub const ALL: [Region; 2] = [Region::China, Region::International];

    pub fn label(&self) -> &'static str {
        match self {
            Self::China => "china",
            Self::International => "international",
        }
    }

    fn document_field(&self) -> &'static str {
        match self {
            Self::China => "china_standards",
            Self::International => "international_standards",
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "china" | "cn" | "中国" => Ok(Self::China),
            "international" | "intl" | "国际" => Ok(Self::International),
            other => Err(format!("unknown region: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulationLevel {
    National,
    Local,
}

impl FromStr for RegulationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "national" | "国家" => Ok(Self::National),
            "local" | "地方" => Ok(Self::Local),
            other => Err(format!("unknown regulation level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardRecord {
    #[serde(default, alias = "name_zh", skip_serializing_if = "Option::is_none")]
    pub full_name_zh: Option<String>,
    #[serde(default, alias = "name_en", skip_serializing_if = "Option::is_none")]
    pub full_name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    /// Requirement groups; may nest limit tables one level deeper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_requirements: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StandardRecord {
    pub fn display_name(&self) -> Option<&str> {
        self.full_name_zh.as_deref().or(self.full_name_en.as_deref())
    }

    /// Parsed `effective_date`, if it is present and in a recognised date format.
    pub fn effective_on(&self) -> Option<NaiveDate> {
        let raw = self.effective_date.as_deref()?.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    /// True when the standard has a parseable effective date on or before `as_of`.
    pub fn is_effective(&self, as_of: NaiveDate) -> bool {
        self.effective_on().is_some_and(|d| d <= as_of)
    }

    fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(category))
    }
}

impl KnowledgeRecord for StandardRecord {
    fn extra_mut(&mut self) -> Option<&mut Map<String, Value>> {
        Some(&mut self.extra)
    }
}

/// Regulations, guidelines, policies and best practices share one loose shape; anything
/// beyond the common fields stays in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceRecord {
    #[serde(default, alias = "full_name_zh", skip_serializing_if = "Option::is_none")]
    pub name_zh: Option<String>,
    #[serde(default, alias = "full_name_en", skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    /// Year -> target mapping (policies).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub targets: Map<String, Value>,
    /// Strategy list (best practices).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strategies: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KnowledgeRecord for ReferenceRecord {
    fn extra_mut(&mut self) -> Option<&mut Map<String, Value>> {
        Some(&mut self.extra)
    }
}

pub type RegulationRecord = ReferenceRecord;
pub type GuidelineRecord = ReferenceRecord;
pub type PolicyRecord = ReferenceRecord;
pub type PracticeRecord = ReferenceRecord;

#[derive(Debug, Clone, Serialize)]
pub struct StandardMatch<'a> {
    pub id: &'a str,
    pub region: Region,
    pub data: &'a StandardRecord,
}

/// Maps an English treatment method to the Chinese keyword used in standard texts;
/// other inputs are returned unchanged.
pub fn method_keyword(method: &str) -> &str {
    METHOD_KEYWORDS
        .iter()
        .find(|(en, _)| en.eq_ignore_ascii_case(method))
        .map(|(_, zh)| *zh)
        .unwrap_or(method)
}

#[derive(Debug, Clone, Default)]
pub struct StandardsStore {
    china: KnowledgeTree<StandardRecord>,
    international: KnowledgeTree<StandardRecord>,
    national_regulations: KnowledgeTree<RegulationRecord>,
    local_regulations: KnowledgeTree<RegulationRecord>,
    technical_guidelines: KnowledgeTree<GuidelineRecord>,
    policies: KnowledgeTree<PolicyRecord>,
    best_practices: KnowledgeTree<PracticeRecord>,
}

impl StandardsStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the standards file; a missing or unreadable file gives an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::from_document(load_json_document_or_empty(path.as_ref()))
    }

    pub fn try_open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        load_json_document(path.as_ref()).map(Self::from_document)
    }

    pub fn from_document(mut document: Map<String, Value>) -> Self {
        let mut regulations = match document.remove("regulations") {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let store = Self {
            china: KnowledgeTree::from_document_field(&mut document, Region::China.document_field()),
            international: KnowledgeTree::from_document_field(
                &mut document,
                Region::International.document_field(),
            ),
            national_regulations: KnowledgeTree::from_document_field(&mut regulations, "national"),
            local_regulations: KnowledgeTree::from_document_field(&mut regulations, "local"),
            technical_guidelines: KnowledgeTree::from_document_field(&mut document, "technical_guidelines"),
            policies: KnowledgeTree::from_document_field(&mut document, "policies"),
            best_practices: KnowledgeTree::from_document_field(&mut document, "best_practices"),
        };
        tracing::info!(
            target: "swm::knowledge",
            china = store.china.len(),
            international = store.international.len(),
            regulations = store.national_regulations.len() + store.local_regulations.len(),
            guidelines = store.technical_guidelines.len(),
            policies = store.policies.len(),
            best_practices = store.best_practices.len(),
            "Standards store loaded"
        );
        store
    }

    fn region_tree(&self, region: Region) -> &KnowledgeTree<StandardRecord> {
        match region {
            Region::China => &self.china,
            Region::International => &self.international,
        }
    }

    fn regions(region: Option<Region>) -> Vec<Region> {
        region.map_or_else(|| Region::ALL.to_vec(), |r| vec![r])
    }

    /// Looks up a standard in one region, or in every region (China first) when `region`
    /// is `None`.
    pub fn standard(&self, id: &str, region: Option<Region>) -> Option<&StandardRecord> {
        Self::regions(region)
            .into_iter()
            .find_map(|r| self.region_tree(r).get(id))
    }

    pub fn regulation(&self, id: &str, level: RegulationLevel) -> Option<&RegulationRecord> {
        match level {
            RegulationLevel::National => self.national_regulations.get(id),
            RegulationLevel::Local => self.local_regulations.get(id),
        }
    }

    /// Keyword search with optional category and region filters. An empty keyword matches
    /// every record that passes the filters.
    pub fn search_standards(
        &self,
        keyword: &str,
        category: Option<&str>,
        region: Option<Region>,
    ) -> Vec<StandardMatch<'_>> {
        let keyword = Keyword::new(keyword);
        let mut matches = Vec::new();
        for r in Self::regions(region) {
            for (id, record) in self.region_tree(r).iter() {
                if category.is_some_and(|c| !record.in_category(c)) {
                    continue;
                }
                if keyword.is_empty()
                    || keyword.matches_text(id)
                    || record_matches(record, &keyword)
                {
                    matches.push(StandardMatch {
                        id,
                        region: r,
                        data: record,
                    });
                }
            }
        }
        matches
    }

    pub fn emission_standards(&self, region: Option<Region>) -> Vec<StandardMatch<'_>> {
        self.search_standards("", Some(EMISSION_CATEGORY), region)
    }

    pub fn waste_classification_standards(&self, region: Option<Region>) -> Vec<StandardMatch<'_>> {
        self.search_standards("", Some(CLASSIFICATION_CATEGORY), region)
    }

    pub fn china_standards(&self, category: Option<&str>) -> Vec<(&str, &StandardRecord)> {
        self.china
            .iter()
            .filter(|(_, s)| category.map_or(true, |c| s.in_category(c)))
            .collect()
    }

    pub fn international_standards(&self, organization: Option<&str>) -> Vec<(&str, &StandardRecord)> {
        self.international
            .iter()
            .filter(|(_, s)| {
                organization.map_or(true, |org| {
                    s.organization
                        .as_deref()
                        .is_some_and(|o| o.eq_ignore_ascii_case(org))
                })
            })
            .collect()
    }

    /// Technical guidelines whose id contains `IPCC` (case-sensitive).
    pub fn ipcc_guidelines(&self) -> Vec<(&str, &GuidelineRecord)> {
        self.technical_guidelines
            .iter()
            .filter(|(id, _)| id.contains("IPCC"))
            .collect()
    }

    pub fn technical_guideline(&self, id: &str) -> Option<&GuidelineRecord> {
        self.technical_guidelines.get(id)
    }

    pub fn policy(&self, id: &str) -> Option<&PolicyRecord> {
        self.policies.get(id)
    }

    pub fn best_practice(&self, id: &str) -> Option<&PracticeRecord> {
        self.best_practices.get(id)
    }

    pub fn all_best_practices(&self) -> Vec<(&str, &PracticeRecord)> {
        self.best_practices.iter().collect()
    }

    /// `key_requirements.emission_limits` of a standard found in any region.
    pub fn emission_limits(&self, id: &str) -> Option<&Value> {
        self.standard(id, None)?
            .key_requirements
            .as_ref()?
            .get("emission_limits")
    }

    /// Resolves each id (any region) in request order. Unknown ids are skipped and a
    /// repeated id is listed once, at its first position.
    pub fn compare_standards<I, S>(&self, ids: I) -> Vec<(String, &StandardRecord)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        ids.into_iter()
            .filter_map(|id| {
                let id = id.as_ref();
                if !seen.insert(id.to_string()) {
                    return None;
                }
                self.standard(id, None).map(|s| (id.to_string(), s))
            })
            .collect()
    }

    /// Standards mentioning a treatment method (English method names are translated first).
    pub fn applicable_standards(&self, treatment_method: &str, region: Option<Region>) -> Vec<StandardMatch<'_>> {
        self.search_standards(method_keyword(treatment_method), None, region)
    }

    /// Standards already in force on `as_of`.
    pub fn effective_standards(&self, as_of: NaiveDate, region: Option<Region>) -> Vec<StandardMatch<'_>> {
        self.search_standards("", None, region)
            .into_iter()
            .filter(|m| m.data.is_effective(as_of))
            .collect()
    }

    /// Multi-line summary of a standard. Unknown ids give a one-line message.
    pub fn explain_standard(&self, id: &str) -> String {
        let Some(standard) = self.standard(id, None) else {
            return format!("未找到标准: {}", id);
        };

        let mut lines = Vec::new();
        lines.push(match standard.display_name() {
            Some(name) => format!("{} {}", id, name),
            None => id.to_string(),
        });
        if let (Some(_), Some(en)) = (&standard.full_name_zh, &standard.full_name_en) {
            lines.push(format!("英文名称: {}", en));
        }
        if let Some(org) = &standard.organization {
            lines.push(format!("发布机构: {}", org));
        }
        if let Some(date) = &standard.issue_date {
            lines.push(format!("发布日期: {}", date));
        }
        if let Some(date) = &standard.effective_date {
            lines.push(format!("实施日期: {}", date));
        }
        if let Some(scope) = &standard.scope {
            lines.push(format!("适用范围: {}", scope));
        }

        if let Some(requirements) = standard.key_requirements.as_ref().filter(|r| !r.is_empty()) {
            lines.push("主要要求:".to_string());
            for (name, value) in requirements {
                match value {
                    Value::Object(group) => {
                        lines.push(format!("  {}:", name));
                        lines.extend(
                            group
                                .iter()
                                .map(|(k, v)| format!("    - {}: {}", k, value_text(v))),
                        );
                    }
                    other => lines.push(format!("  - {}: {}", name, value_text(other))),
                }
            }
        }

        lines.join("\n")
    }
}

impl KnowledgeSource for StandardsStore {
    fn name(&self) -> &'static str {
        "standards"
    }

    fn entry_count(&self) -> usize {
        self.china.len()
            + self.international.len()
            + self.national_regulations.len()
            + self.local_regulations.len()
            + self.technical_guidelines.len()
            + self.policies.len()
            + self.best_practices.len()
    }

    fn query(&self, id: &str) -> Option<Value> {
        self.standard(id, None).and_then(|s| serde_json::to_value(s).ok())
    }
}
