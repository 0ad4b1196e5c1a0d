//! 总结推理模块 - 当ReAct模式达到最大迭代次数时的fallover机制

use anyhow::Result;
use rig::completion::{AssistantContent, Message};

use super::providers::ProviderAgent;

/// 总结推理器
pub struct SummaryReasoner;

impl SummaryReasoner {
    /// 基于ReAct对话历史和工具调用记录进行总结推理
    pub async fn summarize_and_reason(
        agent_without_tools: &ProviderAgent,
        original_system_prompt: &str,
        original_user_prompt: &str,
        chat_history: &[Message],
        tool_calls_history: &[String],
    ) -> Result<String> {
        let summary_prompt = Self::build_summary_prompt(
            original_system_prompt,
            original_user_prompt,
            chat_history,
            tool_calls_history,
        );

        agent_without_tools.prompt(&summary_prompt).await
    }

    fn build_summary_prompt(
        original_system_prompt: &str,
        original_user_prompt: &str,
        chat_history: &[Message],
        tool_calls_history: &[String],
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str("# Original Task\n");
        prompt.push_str(original_system_prompt);
        prompt.push_str("\n\n");

        prompt.push_str("# Original Request\n");
        prompt.push_str(original_user_prompt);
        prompt.push_str("\n\n");

        if !tool_calls_history.is_empty() {
            prompt.push_str("# Tool Calls Already Made\n");
            for (index, tool_call) in tool_calls_history.iter().enumerate() {
                prompt.push_str(&format!("{}. {}\n", index + 1, tool_call));
            }
            prompt.push('\n');
        }

        let conversation_details = Self::extract_detailed_conversation_info(chat_history);
        if !conversation_details.is_empty() {
            prompt.push_str("# Conversation and Tool Results\n");
            prompt.push_str(&conversation_details);
            prompt.push_str("\n\n");
        }

        prompt.push_str("# Final Answer\n");
        prompt.push_str("The research loop above was cut off before it finished. Using only the context, tool calls and observations gathered so far, ");
        prompt.push_str("produce the complete final answer to the original request in exactly the output format it asks for.\n\n");
        prompt.push_str("Rules:\n");
        prompt.push_str("1. Do not invent facts that the observations do not support\n");
        prompt.push_str("2. Where the gathered information is insufficient, write 'Information not available for this section'\n");
        prompt.push_str("3. Do not call any tools and do not describe your reasoning\n");

        prompt
    }

    fn extract_detailed_conversation_info(chat_history: &[Message]) -> String {
        let mut details = String::new();

        // 第一条是原始请求，上面已经拼接过
        for (index, message) in chat_history.iter().enumerate().skip(1) {
            match message {
                Message::User { content } => {
                    details.push_str(&format!("## Observation [turn {}]\n", index + 1));
                    details.push_str(&format!("{:#?}\n\n", content));
                }
                Message::Assistant { content, .. } => {
                    details.push_str(&format!("## Assistant [turn {}]\n", index + 1));

                    let mut has_content = false;
                    for item in content.iter() {
                        match item {
                            AssistantContent::Text(text) if !text.text.is_empty() => {
                                details.push_str(&format!("**Text:** {}\n\n", text.text));
                                has_content = true;
                            }
                            AssistantContent::ToolCall(tool_call) => {
                                details.push_str(&format!(
                                    "**Tool call:** `{}` \nArguments: `{}`\n\n",
                                    tool_call.function.name, tool_call.function.arguments
                                ));
                                has_content = true;
                            }
                            AssistantContent::Reasoning(reasoning)
                                if !reasoning.reasoning.is_empty() =>
                            {
                                details.push_str(&format!(
                                    "**Reasoning:** {}\n\n",
                                    reasoning.reasoning.join("\n")
                                ));
                                has_content = true;
                            }
                            _ => {}
                        }
                    }

                    if !has_content {
                        details.push_str("(empty)\n\n");
                    }
                }
            }
        }

        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_lists_tool_calls() {
        let prompt = SummaryReasoner::build_summary_prompt(
            "You are a market analyst.",
            "Analyze bakery in Mumbai",
            &[],
            &["search({\"query\":\"bakery Mumbai\"})".to_string()],
        );

        assert!(prompt.starts_with("# Original Task\nYou are a market analyst."));
        assert!(prompt.contains("1. search({\"query\":\"bakery Mumbai\"})"));
        assert!(prompt.contains("Information not available for this section"));
        assert!(!prompt.contains("# Conversation and Tool Results"));
    }
}
