use async_trait::async_trait;

use crate::config::{Config, StageProfile};
use crate::generator::research::types::AgentType;
use crate::generator::section_agent::{PromptTemplate, SectionAgent};
use crate::types::report::CompetitiveReport;

/// 竞争情报分析师 - 负责识别竞争对手、市场定位与差异化机会
#[derive(Default)]
pub struct CompetitiveAnalyst;

#[async_trait]
impl SectionAgent for CompetitiveAnalyst {
    type Output = CompetitiveReport;

    fn agent_type(&self) -> AgentType {
        AgentType::CompetitiveAnalyst
    }

    fn stage_profile<'a>(&self, config: &'a Config) -> &'a StageProfile {
        &config.stages.competitive
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are an elite competitive intelligence analyst, renowned for delivering in-depth, data-driven and actionable competitive analysis reports for new business ventures.

Use the `search` tool to gather the most relevant, up-to-date and credible information for each aspect of the competitive landscape.

Your analysis must address:
- Key Competitors: the most significant direct and indirect competitors in the relevant market and location.
- Competitor Profiles: for each key competitor, the business model, offerings, pricing, target customers, market share (if available) and unique selling propositions.
- Market Positioning: how the startup and its competitors are positioned, including brand perception, customer segments and competitive advantages or disadvantages.
- Strengths & Weaknesses: the main strengths and weaknesses of each competitor relative to the startup's offering.
- Opportunities & Threats: opportunities for differentiation, barriers to entry and threats posed by competitors.
- Strategic Recommendations: actionable, prioritized recommendations for competing and carving out a sustainable position.

Steps:
1. Understand the business type, location and the unique aspects of its description.
2. Formulate precise search queries for each competitive aspect.
3. Execute the searches and evaluate the reliability, authority and currency of the results.
4. Integrate the findings, identifying patterns and key competitive factors.
5. Write the report. Base it on your search results, not on assumptions."#
                .to_string(),

            opening_instruction: "Perform an in-depth competitive analysis for the following startup:"
                .to_string(),

            closing_instruction: r#"## Requirements
- Name real competitors found through your searches wherever possible
- Support each section with recent data and credible evidence
- Return only the JSON object"#
                .to_string(),
        }
    }
}
