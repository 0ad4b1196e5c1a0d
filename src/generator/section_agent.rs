use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::config::{Config, StageProfile};
use crate::generator::context::AnalysisContext;
use crate::generator::decode::{Decoded, decode};
use crate::generator::research::types::AgentType;
use crate::llm::service::CompletionRequest;
use crate::types::intent::IntentRecord;
use crate::types::report::SectionReport;

/// 研究材料不足时模型应写入的占位说明
pub const INFORMATION_NOT_AVAILABLE: &str = "Information not available for this section";

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 系统提示词（角色与章节要求）
    pub system_prompt: String,
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的强调性指令
    pub closing_instruction: String,
}

/// 基于模板、输出结构与意图构建一组提示词
pub struct SectionPromptBuilder {
    template: PromptTemplate,
}

impl SectionPromptBuilder {
    pub fn new(template: PromptTemplate) -> Self {
        Self { template }
    }

    /// 构建系统提示词与用户提示词
    pub fn build_prompts<R: SectionReport>(
        &self,
        config: &Config,
        intent: &IntentRecord,
        custom_content: Option<String>,
    ) -> Result<(String, String)> {
        let system_prompt = self.build_system_prompt::<R>(config)?;
        let user_prompt = self.build_user_prompt(intent, custom_content);
        Ok((system_prompt, user_prompt))
    }

    fn build_system_prompt<R: SectionReport>(&self, config: &Config) -> Result<String> {
        let schema = serde_json::to_string_pretty(&schemars::schema_for!(R))?;
        let keys = R::sections()
            .iter()
            .map(|s| format!("\"{}\"", s.key))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "{}\n\n## Output Format\nYour final answer MUST be a single JSON object with exactly these string keys: {}.\nIt must conform to this JSON schema:\n```json\n{}\n```\nFor any section where reliable information cannot be found after searching, write \"{}\" instead of omitting the key.\nDo not include your thought process, search queries or any text outside the JSON object.\n\n{}",
            self.template.system_prompt,
            keys,
            schema,
            INFORMATION_NOT_AVAILABLE,
            config.target_language.prompt_instruction()
        ))
    }

    fn build_user_prompt(&self, intent: &IntentRecord, custom_content: Option<String>) -> String {
        let mut prompt = String::new();

        prompt.push_str(&self.template.opening_instruction);
        prompt.push_str("\n\n");

        prompt.push_str("## Startup\n");
        prompt.push_str(&format!("- Business: {}\n", intent.business));
        if intent.has_location() {
            prompt.push_str(&format!("- Location: {}\n", intent.location));
        } else {
            prompt.push_str("- Location: not specified, analyze the business without a regional focus\n");
        }
        prompt.push_str(&format!("- Description: {}\n\n", intent.description));

        prompt.push_str(&format!(
            "## Current Date\n{}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        ));

        if let Some(custom) = custom_content.filter(|c| !c.trim().is_empty()) {
            prompt.push_str("## Research Material\n");
            prompt.push_str(&custom);
            prompt.push_str("\n\n");
        }

        prompt.push_str(&self.template.closing_instruction);
        prompt
    }
}

/// 章节分析Agent
///
/// 每个实现只声明角色提示词、输出结构、阶段参数与工具需求，执行流程由默认实现统一完成。
/// `execute` 不会向调用方返回错误：调用失败、超时或输出无法解析时返回完整字段的失败报告。
#[async_trait]
pub trait SectionAgent: Send + Sync {
    /// Agent的输出类型
    type Output: SectionReport;

    /// Agent类型标识
    fn agent_type(&self) -> AgentType;

    /// 本阶段的生成参数
    fn stage_profile<'a>(&self, config: &'a Config) -> &'a StageProfile;

    /// Prompt模板配置
    fn prompt_template(&self) -> PromptTemplate;

    /// 是否在趋势服务可用时挂载趋势工具
    fn uses_trend(&self) -> bool {
        false
    }

    /// 可选的自定义prompt内容提供钩子，内容会插入到研究材料部分
    async fn provide_custom_prompt_content(
        &self,
        _context: &AnalysisContext,
        _intent: &IntentRecord,
    ) -> Option<String> {
        None
    }

    /// 执行分析，失败时返回失败报告
    async fn execute(&self, context: &AnalysisContext, intent: &IntentRecord) -> Self::Output {
        let agent_type = self.agent_type();
        tracing::info!("🤖 执行 {} 分析...", agent_type);

        match self.try_execute(context, intent).await {
            Ok(report) => {
                tracing::info!("✅ Sub-Agent [{}]执行完成", agent_type);
                report
            }
            Err(e) => {
                tracing::warn!("⚠️ Sub-Agent [{}]执行失败: {}", agent_type, e);
                Self::Output::failure(e)
            }
        }
    }

    /// 执行分析，保留失败原因
    async fn try_execute(
        &self,
        context: &AnalysisContext,
        intent: &IntentRecord,
    ) -> Result<Self::Output> {
        let agent_type = self.agent_type();
        let custom_content = self.provide_custom_prompt_content(context, intent).await;

        let (system_prompt, user_prompt) = SectionPromptBuilder::new(self.prompt_template())
            .build_prompts::<Self::Output>(&context.config, intent, custom_content)?;
        tracing::debug!("[{}] user prompt:\n{}", agent_type, user_prompt);

        let request = CompletionRequest::new(
            system_prompt,
            user_prompt,
            self.stage_profile(&context.config),
        );
        let toolset = context.toolset(self.uses_trend());
        let react_config = context.react_config();

        let response = context
            .bounded(
                context
                    .generation
                    .complete_with_tools(&request, &toolset, &react_config),
            )
            .await?;

        if response.stopped_by_max_depth {
            tracing::warn!(
                "[{}] 推理达到最大迭代次数 {}，使用部分结果",
                agent_type,
                response.iteration_limit
            );
        }

        match decode::<Self::Output>(&response.content) {
            Decoded::Ok(report) => Ok(report),
            Decoded::Malformed { cause, .. } => Err(anyhow!(
                "{} returned output that does not match the report schema: {}",
                agent_type,
                cause
            )),
        }
    }
}
