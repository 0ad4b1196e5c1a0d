//! 将模型输出的文本解析为结构化记录

use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

static CODE_FENCE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?s)^```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\s*```$"));

/// 解析结果
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Ok(T),
    /// 无法解析，保留原始文本与原因
    Malformed { raw: String, cause: String },
}

impl<T> Decoded<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Decoded::Ok(value) => Some(value),
            Decoded::Malformed { .. } => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Decoded::Ok(_))
    }
}

/// 去除首尾空白与Markdown代码块标记
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if let Ok(fence) = CODE_FENCE.as_ref()
        && let Some(body) = fence.captures(trimmed).and_then(|c| c.get(1))
    {
        return body.as_str().trim();
    }
    trimmed
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// 严格解析：缺少字段或类型不符均视为失败
pub fn decode<T: DeserializeOwned>(raw: &str) -> Decoded<T> {
    let cleaned = strip_code_fence(raw);

    let cause = match serde_json::from_str::<T>(cleaned) {
        Ok(value) => return Decoded::Ok(value),
        Err(e) => e.to_string(),
    };

    // 模型常把JSON对象夹在说明文字中
    if let Some(span) = outermost_object(cleaned).filter(|span| *span != cleaned)
        && let Ok(value) = serde_json::from_str::<T>(span)
    {
        return Decoded::Ok(value);
    }

    Decoded::Malformed {
        raw: raw.to_string(),
        cause,
    }
}

/// 解析失败时使用给定的兜底值
pub fn decode_or_fallback<T: DeserializeOwned>(raw: &str, fallback: T) -> T {
    match decode(raw) {
        Decoded::Ok(value) => value,
        Decoded::Malformed { cause, .. } => {
            tracing::debug!("模型输出无法解析，使用兜底值: {}", cause);
            fallback
        }
    }
}
