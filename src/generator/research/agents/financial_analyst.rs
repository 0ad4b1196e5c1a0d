use async_trait::async_trait;

use crate::config::{Config, StageProfile};
use crate::generator::context::AnalysisContext;
use crate::generator::research::types::AgentType;
use crate::generator::section_agent::{PromptTemplate, SectionAgent};
use crate::types::intent::IntentRecord;
use crate::types::report::FinancialReport;
use crate::utils::threads::do_parallel_with_limit;

/// 财务分析师 - 负责启动成本、收入潜力、融资渠道、利润率与财务风险
///
/// 在推理循环开始前先执行一组固定的直接检索，结果作为研究材料提供给模型。
#[derive(Default)]
pub struct FinancialAnalyst;

impl FinancialAnalyst {
    /// 固定的直接检索查询
    pub fn battery_queries(intent: &IntentRecord) -> Vec<String> {
        let business = &intent.business;
        let location = &intent.location;
        vec![
            format!("startup costs for {} in {}", business, location),
            format!("average revenue for {} in {}", business, location),
            format!("funding options for {} startup", business),
            format!("profit margins for {} industry", business),
        ]
    }

    /// 执行直接检索，失败的查询记录警告后跳过
    pub async fn run_battery(context: &AnalysisContext, intent: &IntentRecord) -> String {
        let queries = Self::battery_queries(intent);
        let max_parallels = context.config.lookup.max_parallels;
        tracing::debug!("🚀 启动财务直接检索，最大并发数：{}", max_parallels);

        let lookups: Vec<_> = queries
            .iter()
            .map(|query| {
                Box::pin(async move {
                    let result = context
                        .bounded(async {
                            context
                                .lookup
                                .search(query)
                                .await
                                .map_err(anyhow::Error::from)
                        })
                        .await;
                    (query, result)
                })
            })
            .collect();

        do_parallel_with_limit(lookups, max_parallels)
            .await
            .into_iter()
            .filter_map(|(query, result)| match result {
                Ok(results) => Some(format!(
                    "--- Search Results for '{}' ---\n{}\n",
                    query, results
                )),
                Err(e) => {
                    tracing::warn!("⚠️ 财务检索失败，已跳过: '{}' - {}", query, e);
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl SectionAgent for FinancialAnalyst {
    type Output = FinancialReport;

    fn agent_type(&self) -> AgentType {
        AgentType::FinancialAnalyst
    }

    fn stage_profile<'a>(&self, config: &'a Config) -> &'a StageProfile {
        &config.stages.financial
    }

    async fn provide_custom_prompt_content(
        &self,
        context: &AnalysisContext,
        intent: &IntentRecord,
    ) -> Option<String> {
        let material = Self::run_battery(context, intent).await;
        (!material.is_empty()).then_some(material)
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are a top-tier financial analyst for startups. Your job is to deliver a clear, data-driven and actionable financial analysis for a new business idea.

Analyze the business type, location and description to assess financial viability. Start from the research material you are given and use the `search` tool to fill any gaps with up-to-date, credible information.

Your report must cover:
- Startup Costs: estimated costs to launch the business, with a breakdown if possible.
- Revenue Potential: main revenue streams, market size and realistic revenue estimates.
- Funding Options: possible funding sources (loans, grants, investors) and strategies.
- Profit Margins: expected profit margins and what affects them in this industry.
- Financial Risks: major risks and how to mitigate them.
- Strategic Recommendations: clear, prioritized financial actions for the entrepreneur."#
                .to_string(),

            opening_instruction: "Perform an in-depth financial analysis for the following startup:"
                .to_string(),

            closing_instruction: r#"## Requirements
- Use recent data, statistics and evidence; quote figures with their currency
- Return only the JSON object"#
                .to_string(),
        }
    }
}
