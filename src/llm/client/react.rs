//! ReAct模式的配置与响应

use rig::completion::Message;

/// ReAct配置
#[derive(Debug, Clone)]
pub struct ReActConfig {
    /// 最大迭代次数
    pub max_iterations: usize,
    /// 达到最大迭代次数时是否返回部分结果
    pub return_partial_on_max_depth: bool,
    /// 达到最大迭代次数时是否启用总结推理
    pub enable_summary_reasoning: bool,
}

impl Default for ReActConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            return_partial_on_max_depth: true,
            enable_summary_reasoning: true,
        }
    }
}

impl ReActConfig {
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..Default::default()
        }
    }
}

/// ReAct响应
#[derive(Debug, Clone)]
pub struct ReActResponse {
    /// 最终回复内容
    pub content: String,
    /// 本次推理允许的最大迭代次数
    pub iteration_limit: usize,
    /// 是否因达到最大迭代次数而停止
    pub stopped_by_max_depth: bool,
    /// 工具调用记录
    pub tool_calls_history: Vec<String>,
    /// 对话历史（仅在中断时保留）
    pub chat_history: Option<Vec<Message>>,
}

impl ReActResponse {
    pub fn success(content: String, iteration_limit: usize) -> Self {
        Self {
            content,
            iteration_limit,
            stopped_by_max_depth: false,
            tool_calls_history: Vec::new(),
            chat_history: None,
        }
    }

    pub fn max_depth_reached_with_history(
        content: String,
        max_depth: usize,
        tool_calls_history: Vec<String>,
        chat_history: Vec<Message>,
    ) -> Self {
        Self {
            content,
            iteration_limit: max_depth,
            stopped_by_max_depth: true,
            tool_calls_history,
            chat_history: Some(chat_history),
        }
    }

    pub fn from_summary_reasoning(
        content: String,
        iteration_limit: usize,
        tool_calls_history: Vec<String>,
        chat_history: Vec<Message>,
    ) -> Self {
        Self {
            content,
            iteration_limit,
            stopped_by_max_depth: false,
            tool_calls_history,
            chat_history: Some(chat_history),
        }
    }
}
