//! 生成服务接口 - 流水线各阶段只依赖这里的trait，具体实现由调用方注入

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{ModelTier, StageProfile};
use crate::llm::client::{ReActConfig, ReActResponse};
use crate::llm::tools::{search::AgentToolSearch, trend::AgentToolTrend};

/// 一次生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub tier: ModelTier,
}

impl CompletionRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        profile: &StageProfile,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
            tier: profile.tier,
        }
    }
}

/// 绑定给ReAct Agent的工具集，检索工具始终可用，趋势工具取决于宿主是否注入了趋势服务
#[derive(Clone)]
pub struct Toolset {
    pub search: AgentToolSearch,
    pub trend: Option<AgentToolTrend>,
}

impl Toolset {
    pub fn new(search: AgentToolSearch, trend: Option<AgentToolTrend>) -> Self {
        Self { search, trend }
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut names = vec![AgentToolSearch::TOOL_NAME];
        if self.trend.is_some() {
            names.push(AgentToolTrend::TOOL_NAME);
        }
        names
    }
}

/// 文本生成服务
///
/// `complete` 为单轮补全；`complete_with_tools` 为绑定工具的多轮推理，
/// 循环本身由服务实现负责，这里只约定输入与最终输出。
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    async fn complete_with_tools(
        &self,
        request: &CompletionRequest,
        toolset: &Toolset,
        react_config: &ReActConfig,
    ) -> Result<ReActResponse>;
}
