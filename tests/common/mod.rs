#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use venture_vision::config::Config;
use venture_vision::error::LookupError;
use venture_vision::generator::context::AnalysisContext;
use venture_vision::llm::{CompletionRequest, GenerationService, ReActConfig, ReActResponse, Toolset};
use venture_vision::lookup::{LookupService, TrendService, TrendSignal};
use venture_vision::types::EXECUTIVE_SUMMARY_POINTS;

/// 用于区分各阶段的系统提示词片段
pub const INTENT: &str = "extract structured startup intent";
pub const MARKET: &str = "market research analyst";
pub const COMPETITIVE: &str = "competitive intelligence analyst";
pub const FINANCIAL: &str = "financial analyst for startups";
pub const SYNTHESIS: &str = "senior startup advisor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Plain,
    Tools,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub mode: Mode,
    pub stage: &'static str,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub tools: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(String),
    Fail(String),
    Hang,
}

/// 按阶段返回预设输出的生成服务，记录每次调用
#[derive(Default)]
pub struct MockGeneration {
    script: Mutex<HashMap<&'static str, Behavior>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有阶段都返回合法输出
    pub fn happy() -> Self {
        Self::new()
            .on(INTENT, Behavior::Reply(intent_json("Bakery", "Mumbai")))
            .on(MARKET, Behavior::Reply(market_json()))
            .on(COMPETITIVE, Behavior::Reply(competitive_json()))
            .on(FINANCIAL, Behavior::Reply(financial_json()))
            .on(SYNTHESIS, Behavior::Reply(combined_json()))
    }

    pub fn on(self, stage: &'static str, behavior: Behavior) -> Self {
        self.script.lock().unwrap().insert(stage, behavior);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, stage: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.stage == stage)
            .collect()
    }

    fn stage_of(system_prompt: &str) -> &'static str {
        [INTENT, MARKET, COMPETITIVE, FINANCIAL, SYNTHESIS]
            .into_iter()
            .find(|needle| system_prompt.contains(needle))
            .unwrap_or("unknown")
    }

    async fn answer(
        &self,
        mode: Mode,
        request: &CompletionRequest,
        tools: Vec<&'static str>,
    ) -> Result<String> {
        let stage = Self::stage_of(&request.system_prompt);
        self.calls.lock().unwrap().push(RecordedCall {
            mode,
            stage,
            system_prompt: request.system_prompt.clone(),
            user_prompt: request.user_prompt.clone(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            tools,
        });

        let behavior = self.script.lock().unwrap().get(stage).cloned();
        match behavior {
            Some(Behavior::Reply(text)) => Ok(text),
            Some(Behavior::Fail(cause)) => Err(anyhow!(cause)),
            Some(Behavior::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(anyhow!("unreachable"))
            }
            None => Err(anyhow!("no script for stage {}", stage)),
        }
    }
}

#[async_trait]
impl GenerationService for MockGeneration {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.answer(Mode::Plain, request, Vec::new()).await
    }

    async fn complete_with_tools(
        &self,
        request: &CompletionRequest,
        toolset: &Toolset,
        _react_config: &ReActConfig,
    ) -> Result<ReActResponse> {
        let content = self
            .answer(Mode::Tools, request, toolset.tool_names())
            .await?;
        Ok(ReActResponse::success(content, 1))
    }
}

/// 检索服务：包含指定片段的查询会失败，其余返回固定结果
#[derive(Default)]
pub struct MockLookup {
    failing: Vec<&'static str>,
    queries: Mutex<Vec<String>>,
}

impl MockLookup {
    pub fn failing_on(failing: Vec<&'static str>) -> Self {
        Self {
            failing,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LookupService for MockLookup {
    async fn search(&self, query: &str) -> Result<String, LookupError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.failing.iter().any(|f| query.contains(f)) {
            return Err(LookupError::Unavailable("quota exceeded".to_string()));
        }
        Ok(format!("1. Result for {}\nsnippet\nhttps://example.com", query))
    }
}

pub struct FixedTrend;

#[async_trait]
impl TrendService for FixedTrend {
    async fn trend(&self, _term: &str, _timeframe: &str) -> Result<Option<TrendSignal>, LookupError> {
        Ok(TrendSignal::from_series(&[20.0, 35.0, 60.0]))
    }
}

pub fn context(generation: Arc<MockGeneration>, lookup: Arc<MockLookup>) -> AnalysisContext {
    AnalysisContext::new(Config::default(), generation, lookup)
}

pub fn intent_json(business: &str, location: &str) -> String {
    serde_json::json!({
        "business": business,
        "location": location,
        "description": format!("A {} in {}", business, location),
    })
    .to_string()
}

pub fn market_json() -> String {
    serde_json::json!({
        "market_overview": "The Mumbai bakery market grows 9% a year.",
        "competitive_landscape": "Fragmented, many small players.",
        "target_customers": "Young professionals.",
        "regulatory_environment": "FSSAI license required.",
        "swot_analysis": "Strong demand, high rent.",
        "emerging_trends": "Sourdough and vegan options.",
        "key_recommendations": "Start with a delivery-first model.",
    })
    .to_string()
}

pub fn competitive_json() -> String {
    serde_json::json!({
        "competitors": "Theobroma, Birdsong.",
        "competitor_profiles": "Premium cafe chains.",
        "market_positioning": "Premium and mid-market.",
        "strengths_weaknesses": "Brand strength, limited reach.",
        "opportunities_threats": "Neighbourhood niche.",
        "strategic_recommendations": "Differentiate on freshness.",
    })
    .to_string()
}

pub fn financial_json() -> String {
    format!(
        "```json\n{}\n```",
        serde_json::json!({
            "startup_costs": "INR 25-40 lakh.",
            "revenue_potential": "INR 8 lakh per month.",
            "funding_options": "MUDRA loans, angel investors.",
            "profit_margins": "15-20% net.",
            "financial_risks": "Ingredient price volatility.",
            "strategic_recommendations": "Lease equipment.",
        })
    )
}

pub fn combined_json() -> String {
    let summary = EXECUTIVE_SUMMARY_POINTS
        .iter()
        .enumerate()
        .map(|(i, point)| format!("{}. **{}**: ...", i + 1, point))
        .collect::<Vec<_>>()
        .join("\n");
    serde_json::json!({
        "market_analysis": "Growing market.",
        "competitive_analysis": "Crowded premium segment.",
        "financial_analysis": "Viable with moderate capital.",
        "executive_summary": summary,
    })
    .to_string()
}
