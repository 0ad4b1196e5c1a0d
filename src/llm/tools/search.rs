//! 网页检索工具

use rig::tool::Tool;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ToolError;
use crate::lookup::LookupService;

/// 检索工具
#[derive(Clone)]
pub struct AgentToolSearch {
    lookup: Arc<dyn LookupService>,
}

/// 检索参数
#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    pub query: String,
}

impl AgentToolSearch {
    pub const TOOL_NAME: &'static str = "search";

    pub fn new(lookup: Arc<dyn LookupService>) -> Self {
        Self { lookup }
    }

    /// 执行检索，失败时记录警告并返回“无数据”的观察结果，不中断Agent
    pub async fn run(&self, query: &str) -> String {
        match self.lookup.search(query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("⚠️ 检索失败，按无数据处理: '{}' - {}", query, e);
                format!("No data found for '{}' (search failed: {}).", query, e)
            }
        }
    }
}

impl Tool for AgentToolSearch {
    const NAME: &'static str = Self::TOOL_NAME;

    type Error = ToolError;
    type Args = SearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> rig::completion::ToolDefinition {
        rig::completion::ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Tool for performing Google searches to find information on the web. Returns ranked result snippets with their links.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "A precise, targeted web search query."
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        tracing::debug!("   🔧 tool called...search@{:?}", args);

        let query = args.query.trim();
        if query.is_empty() {
            return Err(ToolError::InvalidArgs {
                tool: Self::NAME,
                reason: "query must not be empty".to_string(),
            });
        }

        Ok(self.run(query).await)
    }
}
