use async_trait::async_trait;

use crate::config::{Config, StageProfile};
use crate::generator::research::types::AgentType;
use crate::generator::section_agent::{PromptTemplate, SectionAgent};
use crate::types::report::MarketReport;

/// 市场调研分析师 - 负责市场规模、目标客户、监管环境、SWOT与新兴趋势
#[derive(Default)]
pub struct MarketAnalyst;

#[async_trait]
impl SectionAgent for MarketAnalyst {
    type Output = MarketReport;

    fn agent_type(&self) -> AgentType {
        AgentType::MarketAnalyst
    }

    fn stage_profile<'a>(&self, config: &'a Config) -> &'a StageProfile {
        &config.stages.market
    }

    fn uses_trend(&self) -> bool {
        true
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are an elite market research analyst, renowned for delivering in-depth, data-driven and actionable reports for new business ventures. Your mission is to provide a comprehensive market analysis for a proposed startup, using the latest available data and strategic insight.

Use the `search` tool to collect the most relevant, up-to-date and credible information for each aspect of the market. When the `trend` tool is available, use it to check whether interest in the business category is rising.

Your report must cover:
- Market Overview: current size, projected growth and key drivers, with statistics, reports and forecasts.
- Competitive Landscape: the main players and how crowded the market is.
- Target Customers: ideal customer profile, needs, preferences, pain points and purchasing habits.
- Regulatory Environment: relevant laws, licenses, permits and industry-specific regulations.
- SWOT Analysis: strengths, weaknesses, opportunities and threats specific to this startup.
- Emerging Trends: new technologies, consumer shifts or innovations that could impact the market.
- Key Recommendations: clear, strategic recommendations for the entrepreneur.

Steps:
1. Understand the business type, location and the unique aspects of its description.
2. Formulate precise, targeted search queries for each market aspect.
3. Execute the searches and critically evaluate the reliability and currency of the results.
4. Synthesize the findings into patterns, opportunities and challenges.
5. Write the report with a professional, objective and data-driven tone. Base it on your search results, not on assumptions."#
                .to_string(),

            opening_instruction: "Do an in-depth market analysis for the following startup:".to_string(),

            closing_instruction: r#"## Requirements
- Include relevant statistics, figures and data points for every section
- Interpret what the data means for this specific business idea and location
- Return only the JSON object"#
                .to_string(),
        }
    }
}
