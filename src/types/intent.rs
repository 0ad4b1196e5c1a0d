use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 未识别出业务类型时的占位值
pub const UNKNOWN_BUSINESS: &str = "unknown";
/// 未识别出地点时的占位值
pub const ANY_LOCATION: &str = "any";
/// 无法生成描述时的占位值
pub const NO_DESCRIPTION: &str = "N/A";

/// 用户意图 - 由意图提取器从原始输入中生成，之后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IntentRecord {
    pub business: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl IntentRecord {
    pub fn new(
        business: impl Into<String>,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            business: business.into(),
            location: location.into(),
            description: description.into(),
            error: None,
            raw_output: None,
        }
    }

    /// 全部为占位值的意图，附带失败原因与（可选的）模型原始输出
    pub fn unresolved(error: impl Into<String>, raw_output: Option<String>) -> Self {
        Self {
            business: UNKNOWN_BUSINESS.to_string(),
            location: ANY_LOCATION.to_string(),
            description: NO_DESCRIPTION.to_string(),
            error: Some(error.into()),
            raw_output,
        }
    }

    /// 是否识别出了可用的业务类型
    pub fn has_business(&self) -> bool {
        let business = self.business.trim();
        !business.is_empty() && !business.eq_ignore_ascii_case(UNKNOWN_BUSINESS)
    }

    pub fn has_location(&self) -> bool {
        let location = self.location.trim();
        !location.is_empty() && !location.eq_ignore_ascii_case(ANY_LOCATION)
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

impl Default for IntentRecord {
    fn default() -> Self {
        Self::new(UNKNOWN_BUSINESS, ANY_LOCATION, NO_DESCRIPTION)
    }
}
