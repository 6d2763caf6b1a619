//! Prompt templates for the advisory assistant.
//!
//! Each [`TaskType`] pairs a fixed system instruction with a parameterized user template
//! ([`templates`]). Filling is two-phase ([`fill`]): parameters are resolved first (omitted
//! optional ones become [`UNSPECIFIED`]), then a single strict substitution pass renders the
//! text. [`compose::PromptComposer`] chains store lookups into ready-to-send pairs.

pub mod compose;
pub mod fill;
pub mod templates;

pub use compose::{ConsultationRequest, EmissionRequest, LcaRequest, PromptComposer, PromptPair};
pub use fill::{
    fill_template, placeholders, render, resolve_params, PromptError, PromptParams,
    ResolvedParams, UNSPECIFIED,
};
pub use templates::{ParamSpec, UserTemplate};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base persona shared by every task.
pub const GENERAL_INSTRUCTION: &str = r#"你是一名固体废物管理领域的专业顾问，熟悉垃圾分类、收运、处理处置技术、温室气体核算以及国内外相关标准和政策。

要求：
- 回答准确、专业，必要时引用相关标准或政策的编号
- 数据和参数需注明来源或假设条件
- 对不确定的信息明确说明，不编造数据
- 使用简洁、结构化的中文表达"#;

pub const EMISSION_CALCULATION_INSTRUCTION: &str = r#"你是一名固体废物处理温室气体排放核算专家，熟悉IPCC国家温室气体清单指南及国内相关核算方法。

任务：根据用户提供的废物类型、处理量、处理方式和运输信息，估算处理过程的温室气体排放量。

要求：
- 说明采用的核算方法（如IPCC缺省方法、一阶衰减模型等）
- 列出所用排放因子及其来源
- 分环节给出计算过程（收运、处理、处置、资源化抵扣）
- 结果以 tCO2e 表示，并说明主要不确定性来源"#;

pub const TREATMENT_COMPARISON_INSTRUCTION: &str = r#"你是一名固体废物处理技术评估专家。

任务：针对指定的废物类型，对比候选处理方式的适用性。

要求：
- 从环境影响、经济成本、技术成熟度、资源回收率和温室气体排放等维度比较
- 结合废物特性（含水率、热值、有机质含量等）分析适用条件
- 考虑所在地区的政策要求和基础设施条件
- 最后给出推荐方案及理由"#;

pub const LCA_ANALYSIS_INSTRUCTION: &str = r#"你是一名生命周期评价(LCA)专家，熟悉ISO 14040/14044标准。

任务：对用户描述的固体废物处理系统开展生命周期评价分析。

要求：
- 明确目标与范围、功能单位和系统边界
- 说明清单分析所需的主要输入输出数据
- 按影响类别给出影响评价思路和关键贡献环节
- 提出改进建议并说明结果的局限性"#;

pub const POLICY_QUERY_INSTRUCTION: &str = r#"你是一名固体废物管理政策与标准研究专家，熟悉中国及国际主要法规、标准和技术规范。

任务：解读与用户主题相关的政策、法规和标准。

要求：
- 列出相关政策或标准的名称、编号、发布机构和实施日期
- 概括主要要求和限值
- 说明适用范围以及对企业或地方政府的影响
- 如有参考标准列表，优先围绕其展开"#;

pub const TECHNICAL_CONSULTATION_INSTRUCTION: &str = r#"你是一名固体废物处理设施的技术顾问，具有工程设计和运营经验。

任务：针对用户的技术问题提供可操作的建议。

要求：
- 结合设施类型、处理规模和所在地区给出具体方案
- 涉及工艺参数时给出典型取值范围
- 指出需遵守的相关标准和污染控制要求
- 说明实施风险和注意事项"#;

pub const TERM_EXPLANATION_INSTRUCTION: &str = r#"你是一名固体废物管理领域的科普专家。

任务：解释用户提出的专业术语。

要求：
- 给出中英文名称和准确定义
- 说明典型应用场景
- 列举相关术语并说明区别与联系
- 语言通俗易懂，避免不必要的术语堆砌"#;

/// Advisory task kinds; each maps to one instruction and one user template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    General,
    EmissionCalculation,
    TreatmentComparison,
    LcaAnalysis,
    PolicyQuery,
    TechnicalConsultation,
    TermExplanation,
}

impl TaskType {
    pub const ALL: [TaskType; 7] = [
        TaskType::General,
        TaskType::EmissionCalculation,
        TaskType::TreatmentComparison,
        TaskType::LcaAnalysis,
        TaskType::PolicyQuery,
        TaskType::TechnicalConsultation,
        TaskType::TermExplanation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::EmissionCalculation => "emission_calculation",
            Self::TreatmentComparison => "treatment_comparison",
            Self::LcaAnalysis => "lca_analysis",
            Self::PolicyQuery => "policy_query",
            Self::TechnicalConsultation => "technical_consultation",
            Self::TermExplanation => "term_explanation",
        }
    }

    /// System instruction for this task.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::General => GENERAL_INSTRUCTION,
            Self::EmissionCalculation => EMISSION_CALCULATION_INSTRUCTION,
            Self::TreatmentComparison => TREATMENT_COMPARISON_INSTRUCTION,
            Self::LcaAnalysis => LCA_ANALYSIS_INSTRUCTION,
            Self::PolicyQuery => POLICY_QUERY_INSTRUCTION,
            Self::TechnicalConsultation => TECHNICAL_CONSULTATION_INSTRUCTION,
            Self::TermExplanation => TERM_EXPLANATION_INSTRUCTION,
        }
    }

    pub fn user_template(&self) -> &'static UserTemplate {
        match self {
            Self::General => &templates::GENERAL,
            Self::EmissionCalculation => &templates::EMISSION_CALCULATION,
            Self::TreatmentComparison => &templates::TREATMENT_COMPARISON,
            Self::LcaAnalysis => &templates::LCA_ANALYSIS,
            Self::PolicyQuery => &templates::POLICY_QUERY,
            Self::TechnicalConsultation => &templates::TECHNICAL_CONSULTATION,
            Self::TermExplanation => &templates::TERM_EXPLANATION,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown task type: {}", s))
    }
}
