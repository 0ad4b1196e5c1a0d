//! 三个相互独立的章节分析：市场、竞争、财务

use crate::generator::context::AnalysisContext;
use crate::generator::section_agent::SectionAgent;
use crate::types::intent::IntentRecord;
use crate::types::report::{CompetitiveReport, FinancialReport, MarketReport};

pub mod agents;
pub mod types;

use agents::competitive_analyst::CompetitiveAnalyst;
use agents::financial_analyst::FinancialAnalyst;
use agents::market_analyst::MarketAnalyst;

pub async fn run_market_analysis(
    context: &AnalysisContext,
    business: &str,
    location: &str,
    description: &str,
) -> MarketReport {
    MarketAnalyst
        .execute(context, &IntentRecord::new(business, location, description))
        .await
}

pub async fn run_competitive_analysis(
    context: &AnalysisContext,
    business: &str,
    location: &str,
    description: &str,
) -> CompetitiveReport {
    CompetitiveAnalyst
        .execute(context, &IntentRecord::new(business, location, description))
        .await
}

pub async fn run_financial_analysis(
    context: &AnalysisContext,
    business: &str,
    location: &str,
    description: &str,
) -> FinancialReport {
    FinancialAnalyst
        .execute(context, &IntentRecord::new(business, location, description))
        .await
}
