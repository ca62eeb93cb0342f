use serde::Serialize;
use serde_json::Value;

use crate::messages::ChatMessage;

/// Request body for Anthropic Messages API.
///
/// This struct represents the request format for creating messages with Claude models
/// as documented in the [Anthropic API Reference](https://docs.anthropic.com/en/api/messages).
#[derive(Debug, Serialize)]
pub(super) struct AnthropicRequest<'a> {
    /// The model that will complete your prompt.
    pub(super) model: &'a str,

    /// The maximum number of tokens to generate before stopping.
    pub(super) max_tokens: u32,

    /// System prompt.
    ///
    /// Claude takes the system prompt as a top level field, never as a message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) system: Option<Value>,

    /// Input messages, forwarded in their original order.
    pub(super) messages: Vec<ChatMessage>,
}
