use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::i18n::TargetLanguage;

/// 生成服务密钥的环境变量
pub const ENV_GENERATION_API_KEY: &str = "GOOGLE_API_KEY_GEMINI";
/// 检索服务密钥的环境变量
pub const ENV_LOOKUP_API_KEY: &str = "GOOGLE_API_KEY_CSE";
/// 检索服务搜索引擎ID的环境变量
pub const ENV_LOOKUP_ENGINE_ID: &str = "GOOGLE_CSE_ID";
pub const ENV_LLM_PROVIDER: &str = "VENTURE_LLM_PROVIDER";
pub const ENV_LLM_API_BASE_URL: &str = "VENTURE_LLM_API_BASE_URL";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(LLMProvider::Gemini),
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 模型档位
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelTier {
    /// 高能效模型，用于常规推理
    #[serde(rename = "efficient")]
    #[default]
    Efficient,
    /// 高质量模型，用于复杂推理，也作为efficient失效时的兜底
    #[serde(rename = "powerful")]
    Powerful,
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// 检索服务配置
    pub lookup: LookupConfig,

    /// 各阶段的生成参数
    pub stages: StageProfiles,

    /// 报告语言
    pub target_language: TargetLanguage,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址，为空时使用provider默认地址
    pub api_base_url: String,

    /// 高能效模型
    pub model_efficient: String,

    /// 高质量模型
    pub model_powerful: String,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 单个阶段的超时时间（秒）
    pub timeout_seconds: u64,

    /// ReAct模式的最大迭代次数
    pub max_iterations: usize,
}

/// 检索服务配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    /// 检索服务API KEY
    pub api_key: String,

    /// 搜索引擎ID
    pub engine_id: String,

    /// 检索服务地址
    pub api_base_url: String,

    /// 每次检索返回的条目数（1-10）
    pub result_count: u8,

    /// 单次请求超时时间（秒）
    pub timeout_seconds: u64,

    /// 直接检索的最大并发数
    pub max_parallels: usize,
}

/// 单个阶段的生成参数
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StageProfile {
    pub temperature: f64,
    pub max_tokens: u32,
    pub tier: ModelTier,
}

impl StageProfile {
    pub fn new(temperature: f64, max_tokens: u32, tier: ModelTier) -> Self {
        Self {
            temperature,
            max_tokens,
            tier,
        }
    }
}

/// 各阶段的生成参数
///
/// 配置文件中的`[stages.X]`可以只写部分字段，缺省字段取该阶段自身的默认值。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(from = "StageProfilesOverride")]
pub struct StageProfiles {
    pub extraction: StageProfile,
    pub market: StageProfile,
    pub competitive: StageProfile,
    pub financial: StageProfile,
    pub synthesis: StageProfile,
}

/// 配置文件中单个阶段的覆盖项
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct StageOverride {
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    tier: Option<ModelTier>,
}

impl StageOverride {
    fn merge_onto(self, base: StageProfile) -> StageProfile {
        StageProfile {
            temperature: self.temperature.unwrap_or(base.temperature),
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
            tier: self.tier.unwrap_or(base.tier),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct StageProfilesOverride {
    extraction: StageOverride,
    market: StageOverride,
    competitive: StageOverride,
    financial: StageOverride,
    synthesis: StageOverride,
}

impl From<StageProfilesOverride> for StageProfiles {
    fn from(overrides: StageProfilesOverride) -> Self {
        let base = StageProfiles::default();
        Self {
            extraction: overrides.extraction.merge_onto(base.extraction),
            market: overrides.market.merge_onto(base.market),
            competitive: overrides.competitive.merge_onto(base.competitive),
            financial: overrides.financial.merge_onto(base.financial),
            synthesis: overrides.synthesis.merge_onto(base.synthesis),
        }
    }
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 从默认配置加载，并使用环境变量（含`.env`文件）覆盖凭据
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// 依次尝试：显式指定的配置文件、当前目录下的`venture.toml`、默认值，最后叠加环境变量
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join("venture.toml");
                default_config_path.exists().then_some(default_config_path)
            }
        };

        let Some(config_file) = config_file else {
            return Ok(Self::from_env());
        };

        let _ = dotenvy::dotenv();
        let mut config = Self::from_file(&config_file)?;
        config.apply_env();
        Ok(config)
    }

    /// 使用环境变量覆盖配置，仅覆盖已设置且非空的变量
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    pub(crate) fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = read(ENV_GENERATION_API_KEY) {
            self.llm.api_key = key;
        }
        if let Some(key) = read(ENV_LOOKUP_API_KEY) {
            self.lookup.api_key = key;
        }
        if let Some(id) = read(ENV_LOOKUP_ENGINE_ID) {
            self.lookup.engine_id = id;
        }
        if let Some(provider_str) = read(ENV_LLM_PROVIDER) {
            match provider_str.parse::<LLMProvider>() {
                Ok(provider) => self.llm.provider = provider,
                Err(e) => tracing::warn!("⚠️ 忽略环境变量{}: {}", ENV_LLM_PROVIDER, e),
            }
        }
        if let Some(url) = read(ENV_LLM_API_BASE_URL) {
            self.llm.api_base_url = url;
        }
    }

    /// 启动前校验配置，缺少凭据时立即失败
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.api_key.trim().is_empty() && self.llm.provider != LLMProvider::Ollama {
            return Err(ConfigError::MissingCredential(ENV_GENERATION_API_KEY));
        }
        if self.lookup.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(ENV_LOOKUP_API_KEY));
        }
        if self.lookup.engine_id.trim().is_empty() {
            return Err(ConfigError::MissingCredential(ENV_LOOKUP_ENGINE_ID));
        }
        if !(1..=10).contains(&self.lookup.result_count) {
            return Err(ConfigError::Invalid {
                field: "lookup.result_count",
                reason: format!("must be between 1 and 10, got {}", self.lookup.result_count),
            });
        }
        if self.llm.retry_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "llm.retry_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.llm.timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "llm.timeout_seconds",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.lookup.max_parallels == 0 {
            return Err(ConfigError::Invalid {
                field: "lookup.max_parallels",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl LLMConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// 按档位获取模型名称
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Efficient => &self.model_efficient,
            ModelTier::Powerful => &self.model_powerful,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: String::new(),
            api_base_url: String::new(),
            model_efficient: String::from("gemini-1.5-flash"),
            model_powerful: String::from("gemini-2.0-flash"),
            retry_attempts: 3,
            retry_delay_ms: 2000,
            timeout_seconds: 300,
            max_iterations: 10,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            api_base_url: String::from("https://www.googleapis.com/customsearch/v1"),
            result_count: 10,
            timeout_seconds: 30,
            max_parallels: 4,
        }
    }
}

impl Default for StageProfiles {
    fn default() -> Self {
        Self {
            extraction: StageProfile::new(0.0, 200, ModelTier::Efficient),
            market: StageProfile::new(0.3, 1500, ModelTier::Powerful),
            competitive: StageProfile::new(0.3, 1800, ModelTier::Powerful),
            financial: StageProfile::new(0.7, 1500, ModelTier::Efficient),
            synthesis: StageProfile::new(0.4, 2048, ModelTier::Powerful),
        }
    }
}
