//! 分析流水线的类型化错误

use thiserror::Error;

use crate::types::intent::IntentRecord;

/// 配置错误，启动阶段即失败
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing credential: environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// 检索服务错误
#[derive(Error, Debug)]
pub enum LookupError {
    /// 请求URL带有API KEY，构造时须先调用`reqwest::Error::without_url`
    #[error("lookup request failed: {0}")]
    Network(reqwest::Error),

    #[error("lookup service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("lookup response could not be decoded: {0}")]
    Decode(String),

    #[error("lookup service unavailable: {0}")]
    Unavailable(String),
}

impl LookupError {
    /// 去掉请求URL后包装网络错误
    pub fn network(error: reqwest::Error) -> Self {
        LookupError::Network(error.without_url())
    }
}

/// Agent工具错误
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("tool `{tool}` received invalid arguments: {reason}")]
    InvalidArgs { tool: &'static str, reason: String },
}

/// 意图提取失败，流水线在第一步终止
#[derive(Error, Debug, Clone)]
#[error("intent extraction failed: {reason}")]
pub struct ExtractionFailure {
    pub reason: String,
    pub extracted_info: IntentRecord,
}
