use crate::config::LLMConfig;
use crate::llm::service::CompletionRequest;

/// 超过该长度的请求直接交给能力更强的模型
const LONG_PROMPT_THRESHOLD: usize = 32 * 1024;

/// 选择本次请求使用的模型，并给出失败后的备选模型
pub fn evaluate_befitting_model(
    llm_config: &LLMConfig,
    request: &CompletionRequest,
) -> (String, Option<String>) {
    let preferred = llm_config.model_for(request.tier).to_string();
    let powerful = llm_config.model_powerful.clone();

    if request.system_prompt.len() + request.user_prompt.len() > LONG_PROMPT_THRESHOLD {
        return (powerful, None);
    }

    if preferred == powerful {
        (preferred, None)
    } else {
        (preferred, Some(powerful))
    }
}
