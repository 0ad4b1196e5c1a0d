//! LLM Provider支持模块

use anyhow::Result;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::{Prompt, PromptError},
    providers::gemini::completion::gemini_api_types::{AdditionalParameters, GenerationConfig},
};

use crate::config::{LLMConfig, LLMProvider};
use crate::llm::service::{CompletionRequest, Toolset};

/// 按需挂载工具后完成Agent构建
macro_rules! finish_agent {
    ($builder:expr, $toolset:expr) => {{
        let builder = $builder;
        match $toolset {
            None => builder.build(),
            Some(Toolset {
                search,
                trend: None,
            }) => builder.tool(search.clone()).build(),
            Some(Toolset {
                search,
                trend: Some(trend),
            }) => builder.tool(search.clone()).tool(trend.clone()).build(),
        }
    }};
}

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    Gemini(rig::providers::gemini::Client),
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
    Ollama(rig::providers::ollama::Client),
}

impl ProviderClient {
    /// 根据配置创建相应的provider客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let base_url = config.api_base_url.trim();
        match config.provider {
            LLMProvider::Gemini => {
                let client = rig::providers::gemini::Client::builder(&config.api_key).build()?;
                Ok(ProviderClient::Gemini(client))
            }
            LLMProvider::OpenAI => {
                let mut builder = rig::providers::openai::Client::builder(&config.api_key);
                if !base_url.is_empty() {
                    builder = builder.base_url(base_url);
                }
                Ok(ProviderClient::OpenAI(builder.build()))
            }
            LLMProvider::DeepSeek => {
                let mut builder = rig::providers::deepseek::Client::builder(&config.api_key);
                if !base_url.is_empty() {
                    builder = builder.base_url(base_url);
                }
                Ok(ProviderClient::DeepSeek(builder.build()))
            }
            LLMProvider::OpenRouter => {
                let client = rig::providers::openrouter::Client::builder(&config.api_key).build();
                Ok(ProviderClient::OpenRouter(client))
            }
            LLMProvider::Anthropic => {
                let client =
                    rig::providers::anthropic::ClientBuilder::new(&config.api_key).build()?;
                Ok(ProviderClient::Anthropic(client))
            }
            LLMProvider::Ollama => {
                let mut builder = rig::providers::ollama::Client::builder();
                if !base_url.is_empty() {
                    builder = builder.base_url(base_url);
                }
                Ok(ProviderClient::Ollama(builder.build()))
            }
        }
    }

    /// 创建Agent，传入工具集时构建可调用工具的ReAct Agent
    pub fn create_agent(
        &self,
        model: &str,
        request: &CompletionRequest,
        toolset: Option<&Toolset>,
    ) -> Result<ProviderAgent> {
        let max_tokens = u64::from(request.max_tokens);
        let temperature = request.temperature;
        let preamble = request.system_prompt.as_str();

        let agent = match self {
            ProviderClient::Gemini(client) => {
                let gen_cfg = GenerationConfig::default();
                let cfg = AdditionalParameters::default().with_config(gen_cfg);
                let params = serde_json::to_value(cfg)?;

                let agent = finish_agent!(
                    client
                        .agent(model)
                        .preamble(preamble)
                        .max_tokens(max_tokens)
                        .temperature(temperature)
                        .additional_params(params),
                    toolset
                );
                ProviderAgent::Gemini(agent)
            }
            ProviderClient::OpenAI(client) => {
                let agent = finish_agent!(
                    client
                        .completion_model(model)
                        .completions_api()
                        .into_agent_builder()
                        .preamble(preamble)
                        .max_tokens(max_tokens)
                        .temperature(temperature),
                    toolset
                );
                ProviderAgent::OpenAI(agent)
            }
            ProviderClient::DeepSeek(client) => {
                let agent = finish_agent!(
                    client
                        .agent(model)
                        .preamble(preamble)
                        .max_tokens(max_tokens)
                        .temperature(temperature),
                    toolset
                );
                ProviderAgent::DeepSeek(agent)
            }
            ProviderClient::OpenRouter(client) => {
                let agent = finish_agent!(
                    client
                        .agent(model)
                        .preamble(preamble)
                        .temperature(temperature),
                    toolset
                );
                ProviderAgent::OpenRouter(agent)
            }
            ProviderClient::Anthropic(client) => {
                let agent = finish_agent!(
                    client
                        .agent(model)
                        .preamble(preamble)
                        .max_tokens(max_tokens)
                        .temperature(temperature),
                    toolset
                );
                ProviderAgent::Anthropic(agent)
            }
            ProviderClient::Ollama(client) => {
                let agent = finish_agent!(
                    client
                        .agent(model)
                        .preamble(preamble)
                        .max_tokens(max_tokens)
                        .temperature(temperature),
                    toolset
                );
                ProviderAgent::Ollama(agent)
            }
        };

        Ok(agent)
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    Gemini(Agent<rig::providers::gemini::completion::CompletionModel>),
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ProviderAgent {
    /// 执行prompt
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderAgent::Gemini(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::OpenRouter(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
        }
    }

    /// 执行多轮对话
    pub async fn multi_turn(
        &self,
        prompt: &str,
        max_iterations: usize,
    ) -> Result<String, PromptError> {
        match self {
            ProviderAgent::Gemini(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
            ProviderAgent::OpenRouter(agent) => {
                agent.prompt(prompt).multi_turn(max_iterations).await
            }
            ProviderAgent::Anthropic(agent) => {
                agent.prompt(prompt).multi_turn(max_iterations).await
            }
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).multi_turn(max_iterations).await,
        }
    }
}
