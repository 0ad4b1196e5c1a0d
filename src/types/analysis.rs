use serde::{Deserialize, Serialize};

use crate::types::combined::SynthesisOutcome;
use crate::types::intent::IntentRecord;
use crate::types::report::{CompetitiveReport, FinancialReport, MarketReport};

/// 调用方选择的分析类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisKind {
    #[serde(rename = "overall")]
    #[default]
    Overall,
    #[serde(rename = "market")]
    Market,
    #[serde(rename = "competitive")]
    Competitive,
    #[serde(rename = "financial")]
    Financial,
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisKind::Overall => write!(f, "overall"),
            AnalysisKind::Market => write!(f, "market"),
            AnalysisKind::Competitive => write!(f, "competitive"),
            AnalysisKind::Financial => write!(f, "financial"),
        }
    }
}

impl std::str::FromStr for AnalysisKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overall" | "all" => Ok(AnalysisKind::Overall),
            "market" => Ok(AnalysisKind::Market),
            "competitive" | "competition" => Ok(AnalysisKind::Competitive),
            "financial" | "finance" => Ok(AnalysisKind::Financial),
            _ => Err(format!("Unknown analysis kind: {}", s)),
        }
    }
}

impl AnalysisKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            AnalysisKind::Overall => "Overall Business Analysis",
            AnalysisKind::Market => "Market Research Analysis",
            AnalysisKind::Competitive => "Competitive Analysis",
            AnalysisKind::Financial => "Financial Analysis",
        }
    }
}

/// 按分析类型返回的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Overall(SynthesisOutcome),
    Market(MarketReport),
    Competitive(CompetitiveReport),
    Financial(FinancialReport),
}

impl AnalysisOutcome {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisOutcome::Overall(_) => AnalysisKind::Overall,
            AnalysisOutcome::Market(_) => AnalysisKind::Market,
            AnalysisOutcome::Competitive(_) => AnalysisKind::Competitive,
            AnalysisOutcome::Financial(_) => AnalysisKind::Financial,
        }
    }
}

/// 一次完整分析运行的产出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub intent: IntentRecord,
    pub outcome: AnalysisOutcome,
}
