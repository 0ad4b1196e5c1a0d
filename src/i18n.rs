use serde::{Deserialize, Serialize};

/// 报告语言
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum TargetLanguage {
    #[serde(rename = "en")]
    #[default]
    English,
    #[serde(rename = "zh")]
    Chinese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "hi")]
    Hindi,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLanguage::English => write!(f, "en"),
            TargetLanguage::Chinese => write!(f, "zh"),
            TargetLanguage::Japanese => write!(f, "ja"),
            TargetLanguage::Korean => write!(f, "ko"),
            TargetLanguage::German => write!(f, "de"),
            TargetLanguage::French => write!(f, "fr"),
            TargetLanguage::Spanish => write!(f, "es"),
            TargetLanguage::Hindi => write!(f, "hi"),
        }
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" | "英文" => Ok(TargetLanguage::English),
            "zh" | "chinese" | "中文" => Ok(TargetLanguage::Chinese),
            "ja" | "japanese" | "日本語" | "日文" => Ok(TargetLanguage::Japanese),
            "ko" | "korean" | "한국어" | "韩文" => Ok(TargetLanguage::Korean),
            "de" | "german" | "deutsch" | "德文" => Ok(TargetLanguage::German),
            "fr" | "french" | "français" | "法文" => Ok(TargetLanguage::French),
            "es" | "spanish" | "español" | "西班牙文" => Ok(TargetLanguage::Spanish),
            "hi" | "hindi" | "हिन्दी" | "印地文" => Ok(TargetLanguage::Hindi),
            _ => Err(format!("Unknown target language: {}", s)),
        }
    }
}

impl TargetLanguage {
    /// 获取语言的描述性名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Chinese => "中文",
            TargetLanguage::Japanese => "日本語",
            TargetLanguage::Korean => "한국어",
            TargetLanguage::German => "Deutsch",
            TargetLanguage::French => "Français",
            TargetLanguage::Spanish => "Español",
            TargetLanguage::Hindi => "हिन्दी",
        }
    }

    /// 获取语言的提示词指令，JSON的键名始终保持英文
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            TargetLanguage::English => {
                "Write every section value in English, using accurate, professional and easy-to-understand language."
            }
            TargetLanguage::Chinese => {
                "请使用中文撰写各部分内容，确保语言表达准确、专业、易于理解。JSON的键名保持英文不变。"
            }
            TargetLanguage::Japanese => {
                "各セクションの内容は日本語で記述してください。JSONのキー名は英語のままにしてください。"
            }
            TargetLanguage::Korean => {
                "각 섹션의 내용은 한국어로 작성해 주세요. JSON 키 이름은 영어로 유지해 주세요."
            }
            TargetLanguage::German => {
                "Schreiben Sie alle Abschnitte auf Deutsch. Die JSON-Schlüssel bleiben auf Englisch."
            }
            TargetLanguage::French => {
                "Rédigez chaque section en français. Les clés JSON restent en anglais."
            }
            TargetLanguage::Spanish => {
                "Redacte cada sección en español. Las claves JSON deben permanecer en inglés."
            }
            TargetLanguage::Hindi => {
                "प्रत्येक अनुभाग की सामग्री हिन्दी में लिखें। JSON कुंजियों के नाम अंग्रेज़ी में ही रखें।"
            }
        }
    }
}
