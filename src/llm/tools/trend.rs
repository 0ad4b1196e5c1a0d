//! 搜索趋势工具

use rig::tool::Tool;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ToolError;
use crate::lookup::TrendService;

/// 未指定时间范围时使用最近12个月
pub const DEFAULT_TIMEFRAME: &str = "today 12-m";

/// 趋势工具
#[derive(Clone)]
pub struct AgentToolTrend {
    trend: Arc<dyn TrendService>,
}

/// 趋势查询参数
#[derive(Debug, Deserialize)]
pub struct TrendArgs {
    pub term: String,
    pub timeframe: Option<String>,
}

impl AgentToolTrend {
    pub const TOOL_NAME: &'static str = "trend";

    pub fn new(trend: Arc<dyn TrendService>) -> Self {
        Self { trend }
    }

    async fn run(&self, term: &str, timeframe: &str) -> String {
        match self.trend.trend(term, timeframe).await {
            Ok(Some(signal)) => signal.describe(term, timeframe),
            Ok(None) => format!("No trend data for '{}' over '{}'.", term, timeframe),
            Err(e) => {
                tracing::warn!("⚠️ 趋势查询失败，按无数据处理: '{}' - {}", term, e);
                format!("No trend data for '{}' (trend lookup failed: {}).", term, e)
            }
        }
    }
}

impl Tool for AgentToolTrend {
    const NAME: &'static str = Self::TOOL_NAME;

    type Error = ToolError;
    type Args = TrendArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Returns the search-interest trend (peak, latest, mean and whether it is rising) for a term over a timeframe.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "term": {
                        "type": "string",
                        "description": "The keyword to look up, e.g. 'artisan bakery'."
                    },
                    "timeframe": {
                        "type": "string",
                        "description": "Timeframe such as 'today 12-m' or 'today 5-y' (default 'today 12-m')."
                    }
                },
                "required": ["term"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        tracing::debug!("   🔧 tool called...trend@{:?}", args);

        let term = args.term.trim();
        if term.is_empty() {
            return Err(ToolError::InvalidArgs {
                tool: Self::NAME,
                reason: "term must not be empty".to_string(),
            });
        }
        let timeframe = args
            .timeframe
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TIMEFRAME);

        Ok(self.run(term, timeframe).await)
    }
}
