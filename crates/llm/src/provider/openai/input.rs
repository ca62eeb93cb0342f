use serde::Serialize;
use serde_json::Value;

use crate::messages::ChatMessage;

/// Request body for OpenAI-compatible Chat Completions APIs.
///
/// OpenAI, DashScope compatible mode (Qwen) and DeepSeek all accept this shape at their
/// `/chat/completions` endpoint, as documented in the
/// [OpenAI API Reference](https://platform.openai.com/docs/api-reference/chat/create).
#[derive(Debug, Serialize)]
pub(super) struct OpenAIRequest<'a> {
    /// ID of the model to use.
    pub(super) model: &'a str,

    /// The conversation so far. The system prompt is always the first message, followed by the caller's
    /// messages in their original order.
    pub(super) messages: Vec<ChatMessage>,
}

impl<'a> OpenAIRequest<'a> {
    pub(super) fn new(model: &'a str, messages: Vec<ChatMessage>, system_prompt: Option<Value>) -> Self {
        let mut all_messages = Vec::with_capacity(messages.len() + 1);

        all_messages.push(ChatMessage::system(system_prompt));
        all_messages.extend(messages);

        Self {
            model,
            messages: all_messages,
        }
    }
}
