use std::fmt::Display;

/// 章节分析Agent的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentType {
    MarketAnalyst,
    CompetitiveAnalyst,
    FinancialAnalyst,
}

impl Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            AgentType::MarketAnalyst => "Market Analyst",
            AgentType::CompetitiveAnalyst => "Competitive Analyst",
            AgentType::FinancialAnalyst => "Financial Analyst",
        };
        write!(f, "{}", str)
    }
}
