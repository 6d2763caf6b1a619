//! User-message templates. `{name}` marks a placeholder; `{{` and `}}` are literal braces.

use super::TaskType;

/// One declared template parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    /// Required parameters have no default; optional ones fall back to the sentinel.
    pub required: bool,
}

impl ParamSpec {
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self { name, required: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTemplate {
    pub name: &'static str,
    pub task: TaskType,
    pub text: &'static str,
    pub params: &'static [ParamSpec],
}

impl UserTemplate {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn optional_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter().filter(|p| !p.required)
    }
}

pub static GENERAL: UserTemplate = UserTemplate {
    name: "general",
    task: TaskType::General,
    text: "{question}",
    params: &[ParamSpec::required("question")],
};

pub static EMISSION_CALCULATION: UserTemplate = UserTemplate {
    name: "emission_calculation",
    task: TaskType::EmissionCalculation,
    text: r#"请计算以下固体废物处理方案的温室气体排放量：

废物类型: {waste_type}
处理量: {quantity} 吨
处理方式: {treatment_method}
所在地区: {region}
{transport}

请给出计算依据、排放因子来源以及计算结果。"#,
    params: &[
        ParamSpec::required("waste_type"),
        ParamSpec::required("quantity"),
        ParamSpec::required("treatment_method"),
        ParamSpec::optional("region"),
        ParamSpec::required("transport"),
    ],
};

pub static TREATMENT_COMPARISON: UserTemplate = UserTemplate {
    name: "treatment_comparison",
    task: TaskType::TreatmentComparison,
    text: r#"请对比以下处理方式在处理{waste_type}时的优劣：

废物类型: {waste_type}
处理量: {quantity}
所在地区: {region}
候选处理方式: {treatment_options}

请从环境影响、经济成本、技术成熟度和温室气体排放等方面进行比较，并给出推荐方案。"#,
    params: &[
        ParamSpec::required("waste_type"),
        ParamSpec::optional("quantity"),
        ParamSpec::optional("region"),
        ParamSpec::optional("treatment_options"),
    ],
};

pub static LCA_ANALYSIS: UserTemplate = UserTemplate {
    name: "lca_analysis",
    task: TaskType::LcaAnalysis,
    text: r#"请对以下固体废物处理系统进行生命周期评价(LCA)分析：

废物类型: {waste_type}
处理方式: {treatment_method}
功能单位: {functional_unit}
系统边界: {system_boundary}
影响类别: {impact_categories}

请说明分析框架、关键数据需求和主要结论。"#,
    params: &[
        ParamSpec::required("waste_type"),
        ParamSpec::required("treatment_method"),
        ParamSpec::optional("functional_unit"),
        ParamSpec::optional("system_boundary"),
        ParamSpec::optional("impact_categories"),
    ],
};

pub static POLICY_QUERY: UserTemplate = UserTemplate {
    name: "policy_query",
    task: TaskType::PolicyQuery,
    text: r#"请解读与以下主题相关的固体废物管理政策与标准：

主题: {topic}
地区: {region}
政策类型: {policy_type}
参考标准: {reference_standards}"#,
    params: &[
        ParamSpec::required("topic"),
        ParamSpec::optional("region"),
        ParamSpec::optional("policy_type"),
        ParamSpec::optional("reference_standards"),
    ],
};

pub static TECHNICAL_CONSULTATION: UserTemplate = UserTemplate {
    name: "technical_consultation",
    task: TaskType::TechnicalConsultation,
    text: r#"请就以下技术问题提供专业建议：

问题: {question}
设施类型: {facility_type}
处理规模: {capacity}
所在地区: {region}"#,
    params: &[
        ParamSpec::required("question"),
        ParamSpec::optional("facility_type"),
        ParamSpec::optional("capacity"),
        ParamSpec::optional("region"),
    ],
};

pub static TERM_EXPLANATION: UserTemplate = UserTemplate {
    name: "term_explanation",
    task: TaskType::TermExplanation,
    text: r#"请解释以下固体废物管理术语：

术语: {term}
知识库参考:
{reference}

请用通俗易懂的语言说明其含义、应用场景和相关概念。"#,
    params: &[
        ParamSpec::required("term"),
        ParamSpec::optional("reference"),
    ],
};
