use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 执行摘要中约定的五个要点
pub const EXECUTIVE_SUMMARY_POINTS: [&str; 5] = [
    "Business Overview",
    "Market Opportunity",
    "Competitive Positioning",
    "Financial Viability & Outlook",
    "Strategic Recommendations",
];

/// 综合分析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CombinedResult {
    /// A short, focused paragraph condensing the market analysis.
    pub market_analysis: String,
    /// A short, focused paragraph condensing the competitive analysis.
    pub competitive_analysis: String,
    /// A short, focused paragraph condensing the financial analysis.
    pub financial_analysis: String,
    /// A five-point executive narrative cross-referencing all three analyses.
    pub executive_summary: String,
}

/// 综合阶段的产出
///
/// 与分析报告不同，综合失败时不会补齐字段，而是原样透传模型输出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SynthesisOutcome {
    Combined(CombinedResult),
    Unstructured { raw_output: String, cause: String },
}

impl SynthesisOutcome {
    pub fn combined(&self) -> Option<&CombinedResult> {
        match self {
            SynthesisOutcome::Combined(result) => Some(result),
            SynthesisOutcome::Unstructured { .. } => None,
        }
    }
}
