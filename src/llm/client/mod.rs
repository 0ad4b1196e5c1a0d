//! LLM客户端 - 基于rig的生成服务实现

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

use crate::config::LLMConfig;
use crate::llm::service::{CompletionRequest, GenerationService, Toolset};

mod providers;
mod react;
mod react_executor;
mod summary_reasoner;
pub mod utils;

pub use react::{ReActConfig, ReActResponse};

use providers::ProviderClient;
use react_executor::ReActExecutor;
use summary_reasoner::SummaryReasoner;
use utils::evaluate_befitting_model;

/// LLM客户端，负责模型选择、重试与备选模型切换
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config)?;
        Ok(Self { config, client })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        tracing::info!("🔄 正在检查模型连接...");
        let probe = CompletionRequest {
            system_prompt: "You are a helpful assistant.".to_string(),
            user_prompt: "Hello".to_string(),
            temperature: 0.0,
            max_tokens: 16,
            tier: Default::default(),
        };
        match self.complete(&probe).await {
            Ok(_) => {
                tracing::info!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let max_retries = self.config.retry_attempts.max(1);
        let retry_delay_ms = self.config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    tracing::warn!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries,
                        max_retries,
                        err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    async fn complete_inner(
        &self,
        request: &CompletionRequest,
        befitting_model: String,
        fallover_model: Option<String>,
    ) -> Result<String> {
        let agent = self.client.create_agent(&befitting_model, request, None)?;

        match self
            .retry_with_backoff(|| async { agent.prompt(&request.user_prompt).await })
            .await
        {
            Ok(content) => Ok(content),
            Err(e) => match fallover_model {
                Some(model) => {
                    tracing::warn!(
                        "❌ 调用模型服务出错，尝试 {} 次均失败，尝试使用备选模型{}...{}",
                        self.config.retry_attempts,
                        model,
                        e
                    );
                    Box::pin(self.complete_inner(request, model, None)).await
                }
                None => Err(e),
            },
        }
    }

    /// 达到最大迭代次数后，用不带工具的Agent基于已有上下文给出最终回答
    async fn try_summary_reasoning(
        &self,
        model: &str,
        request: &CompletionRequest,
        original_response: &ReActResponse,
    ) -> Result<ReActResponse> {
        let agent_without_tools = self.client.create_agent(model, request, None)?;

        let chat_history = original_response
            .chat_history
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("missing chat history for summary reasoning"))?;

        let summary_result = self
            .retry_with_backoff(|| async {
                SummaryReasoner::summarize_and_reason(
                    &agent_without_tools,
                    &request.system_prompt,
                    &request.user_prompt,
                    chat_history,
                    &original_response.tool_calls_history,
                )
                .await
            })
            .await?;

        Ok(ReActResponse::from_summary_reasoning(
            summary_result,
            original_response.iteration_limit,
            original_response.tool_calls_history.clone(),
            chat_history.clone(),
        ))
    }
}

#[async_trait]
impl GenerationService for LLMClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let (befitting_model, fallover_model) = evaluate_befitting_model(&self.config, request);
        self.complete_inner(request, befitting_model, fallover_model)
            .await
    }

    async fn complete_with_tools(
        &self,
        request: &CompletionRequest,
        toolset: &Toolset,
        react_config: &ReActConfig,
    ) -> Result<ReActResponse> {
        let (model, _) = evaluate_befitting_model(&self.config, request);
        let agent = self.client.create_agent(&model, request, Some(toolset))?;

        let response = self
            .retry_with_backoff(|| async {
                ReActExecutor::execute(&agent, &request.user_prompt, react_config).await
            })
            .await?;

        if response.stopped_by_max_depth
            && react_config.enable_summary_reasoning
            && response.chat_history.is_some()
        {
            tracing::info!("🔄 启动ReAct Agent总结转直接推理模式...");

            match self.try_summary_reasoning(&model, request, &response).await {
                Ok(summary_response) => {
                    tracing::info!("✅ 总结推理完成");
                    return Ok(summary_response);
                }
                Err(e) => {
                    tracing::warn!("⚠️  总结推理失败，返回原始部分结果...{}", e);
                }
            }
        }

        Ok(response)
    }
}
