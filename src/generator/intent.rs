//! 意图提取：从用户的自由文本中识别业务类型、地点与简要描述

use serde::Deserialize;

use crate::generator::context::AnalysisContext;
use crate::generator::decode::{Decoded, decode};
use crate::llm::service::CompletionRequest;
use crate::types::intent::{ANY_LOCATION, IntentRecord, NO_DESCRIPTION, UNKNOWN_BUSINESS};

pub const EMPTY_QUERY: &str = "empty query";

const EXTRACTION_SYSTEM_PROMPT: &str = r#"You extract structured startup intent from a user's request.

From the user's input, perform the following two tasks:
1. Extract Information:
   - business: the type of business or startup the user wants to start.
   - location: any specific location mentioned.
2. Generate Description:
   - description: a concise, brief description of the business idea. Write a new one if the user's input is very short.

Always respond ONLY in pure JSON, structured as follows:
{
    "business": "Bakery",
    "location": "Mumbai",
    "description": "A cozy bakery offering a variety of breads and pastries."
}

If business is missing or unclear use "unknown"; if location is missing use "any"; if no clear description can be generated use "N/A"."#;

/// 宽松的解析目标，缺失的键回落到占位值
#[derive(Debug, Deserialize, Default)]
struct IntentPayload {
    #[serde(default)]
    business: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<IntentPayload> for IntentRecord {
    fn from(payload: IntentPayload) -> Self {
        IntentRecord::new(
            payload.business.unwrap_or_else(|| UNKNOWN_BUSINESS.to_string()),
            payload.location.unwrap_or_else(|| ANY_LOCATION.to_string()),
            payload
                .description
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        )
    }
}

/// 意图提取器
#[derive(Default)]
pub struct IntentExtractor;

impl IntentExtractor {
    /// 提取意图，任何失败都以占位值加错误信息的形式返回，不向调用方报错
    pub async fn extract(&self, context: &AnalysisContext, text: &str) -> IntentRecord {
        if text.trim().is_empty() {
            tracing::warn!("⚠️ 输入为空，跳过意图提取");
            return IntentRecord::unresolved(EMPTY_QUERY, None);
        }

        let request = CompletionRequest::new(
            EXTRACTION_SYSTEM_PROMPT,
            format!("User input: \"{}\"", text.trim()),
            &context.config.stages.extraction,
        );
        tracing::debug!("意图提取请求: {}", request.user_prompt);

        let raw = match context
            .bounded(context.generation.complete(&request))
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("⚠️ 意图提取调用失败: {}", e);
                return IntentRecord::unresolved(e.to_string(), None);
            }
        };

        match decode::<IntentPayload>(&raw) {
            Decoded::Ok(payload) => {
                let intent = IntentRecord::from(payload);
                tracing::info!(
                    "🔎 识别意图: business={}, location={}",
                    intent.business,
                    intent.location
                );
                intent
            }
            Decoded::Malformed { raw, cause } => {
                tracing::warn!("⚠️ 意图提取结果无法解析: {}", cause);
                IntentRecord::unresolved(cause, Some(raw))
            }
        }
    }
}
