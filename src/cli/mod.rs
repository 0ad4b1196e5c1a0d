use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use crate::types::analysis::AnalysisKind;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// VentureVision - AI驱动的创业想法分析引擎
#[derive(Parser, Debug)]
#[command(name = "venture-vision")]
#[command(
    about = "AI business analyzer: extracts the intent of a startup idea, researches its market, competitors and finances in parallel, and writes an executive summary."
)]
#[command(version)]
pub struct Args {
    /// 创业想法的简短描述，例如 "a bakery in Mumbai"
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// 分析类型 (overall, market, competitive, financial)
    #[arg(short, long, default_value_t = AnalysisKind::Overall)]
    pub kind: AnalysisKind,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 将Markdown报告写入该文件
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 每次外部调用的超时时间（秒）
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// 报告语言 (en, zh, ja, ko, de, fr, es, hi)
    #[arg(short, long)]
    pub language: Option<String>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// LLM Provider (gemini, openai, deepseek, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 高能效模型，用于意图提取与财务分析，以及作为常规推理任务的首选
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于市场、竞争分析与综合，以及作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// 财务直接检索的最大并发数
    #[arg(long)]
    pub max_parallels: Option<usize>,
}

impl Args {
    /// 拼接后的用户输入
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    /// 本次运行的超时时间，未指定时返回None使用配置值
    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// 将CLI参数转换为配置
    pub fn to_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply_to(&mut config);
        Ok(config)
    }

    /// 使用CLI参数覆盖配置
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(provider_str) = &self.llm_provider {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => config.llm.provider = provider,
                Err(_) => tracing::warn!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                ),
            }
        }
        if let Some(url) = &self.llm_api_base_url {
            config.llm.api_base_url = url.clone();
        }
        if let Some(model_efficient) = &self.model_efficient {
            config.llm.model_efficient = model_efficient.clone();
        }
        if let Some(model_powerful) = &self.model_powerful {
            config.llm.model_powerful = model_powerful.clone();
        }
        if let Some(timeout) = self.timeout {
            config.llm.timeout_seconds = timeout;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.lookup.max_parallels = max_parallels;
        }
        if let Some(language_str) = &self.language {
            match language_str.parse::<TargetLanguage>() {
                Ok(language) => config.target_language = language,
                Err(_) => tracing::warn!(
                    "⚠️ 警告: 未知的目标语言: {}，使用默认语言 (English)",
                    language_str
                ),
            }
        }
        config.verbose = config.verbose || self.verbose;
    }
}
