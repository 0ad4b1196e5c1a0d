//! 综合三份分析报告，生成简明结论与五点式执行摘要

use anyhow::Result;

use crate::generator::context::AnalysisContext;
use crate::generator::decode::{Decoded, decode};
use crate::llm::service::CompletionRequest;
use crate::types::combined::{CombinedResult, EXECUTIVE_SUMMARY_POINTS, SynthesisOutcome};
use crate::types::intent::IntentRecord;
use crate::types::report::{CompetitiveReport, FinancialReport, MarketReport};

const SYNTHESIS_SYSTEM_PROMPT: &str = r#"You are a senior startup advisor. You receive three independent analyses of one business idea (market, competitive and financial) and combine them into a single, coherent briefing for the entrepreneur.

Rules:
- Condense each analysis into one dense paragraph that keeps its most important figures and conclusions.
- Do not contradict the analyses and do not add facts they do not contain.
- If an analysis reports an error or missing information, say so briefly instead of inventing content."#;

/// 综合器
#[derive(Default)]
pub struct Synthesizer;

impl Synthesizer {
    /// 生成综合结果，模型输出无法解析或调用失败时返回非结构化结果
    pub async fn synthesize(
        &self,
        context: &AnalysisContext,
        intent: &IntentRecord,
        market: &MarketReport,
        competitive: &CompetitiveReport,
        financial: &FinancialReport,
    ) -> SynthesisOutcome {
        tracing::info!("🧩 综合分析结果...");

        let request = match Self::build_request(context, intent, market, competitive, financial) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("⚠️ 无法构建综合请求: {}", e);
                return SynthesisOutcome::Unstructured {
                    raw_output: String::new(),
                    cause: e.to_string(),
                };
            }
        };

        let raw = match context
            .bounded(context.generation.complete(&request))
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("⚠️ 综合调用失败: {}", e);
                return SynthesisOutcome::Unstructured {
                    raw_output: String::new(),
                    cause: e.to_string(),
                };
            }
        };

        match decode::<CombinedResult>(&raw) {
            Decoded::Ok(combined) => {
                tracing::info!("✅ 综合分析完成");
                SynthesisOutcome::Combined(combined)
            }
            Decoded::Malformed { raw, cause } => {
                tracing::warn!("⚠️ 综合结果无法解析，返回原始输出: {}", cause);
                SynthesisOutcome::Unstructured {
                    raw_output: raw,
                    cause,
                }
            }
        }
    }

    fn build_request(
        context: &AnalysisContext,
        intent: &IntentRecord,
        market: &MarketReport,
        competitive: &CompetitiveReport,
        financial: &FinancialReport,
    ) -> Result<CompletionRequest> {
        let points = EXECUTIVE_SUMMARY_POINTS
            .iter()
            .enumerate()
            .map(|(i, point)| format!("{}. **{}**", i + 1, point))
            .collect::<Vec<_>>()
            .join("\n");

        let system_prompt = format!(
            "{}\n\n{}",
            SYNTHESIS_SYSTEM_PROMPT,
            context.config.target_language.prompt_instruction()
        );

        let user_prompt = format!(
            r#"## Startup
- Business: {business}
- Location: {location}
- Description: {description}

## Market Analysis
```json
{market}
```

## Competitive Analysis
```json
{competitive}
```

## Financial Analysis
```json
{financial}
```

## Task
Return ONLY a JSON object with exactly these four string keys:
- "market_analysis": a condensed paragraph of the market analysis.
- "competitive_analysis": a condensed paragraph of the competitive analysis.
- "financial_analysis": a condensed paragraph of the financial analysis.
- "executive_summary": an executive narrative in Markdown made of these five numbered points, in this order:
{points}"#,
            business = intent.business,
            location = intent.location,
            description = intent.description,
            market = serde_json::to_string_pretty(market)?,
            competitive = serde_json::to_string_pretty(competitive)?,
            financial = serde_json::to_string_pretty(financial)?,
            points = points,
        );

        Ok(CompletionRequest::new(
            system_prompt,
            user_prompt,
            &context.config.stages.synthesis,
        ))
    }
}
