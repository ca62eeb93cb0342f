use serde::Serialize;
use serde_json::Value;

use crate::messages::ChatMessage;

/// Request body for Google Gemini GenerateContent API.
///
/// This struct represents the request format for generating content with Gemini models
/// as documented in the [Google AI API Reference](https://ai.google.dev/api/generate-content).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GoogleGenerateRequest {
    /// System instruction (prompt). Gemini has no system role inside `contents`.
    pub(super) system_instruction: GoogleContent,

    /// The conversation history, in the caller's order.
    pub(super) contents: Vec<GoogleContent>,
}

/// A single turn, or the system instruction when `role` is absent.
#[derive(Debug, Serialize)]
pub(super) struct GoogleContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) role: Option<GoogleRole>,
    pub(super) parts: Vec<GooglePart>,
}

/// Gemini only knows two roles in `contents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum GoogleRole {
    User,
    Model,
}

#[derive(Debug, Serialize)]
pub(super) struct GooglePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) text: Option<Value>,
}

impl From<&ChatMessage> for GoogleRole {
    /// `assistant` becomes `model`, every other role (including none) becomes `user`.
    fn from(message: &ChatMessage) -> Self {
        if message.is_assistant() {
            GoogleRole::Model
        } else {
            GoogleRole::User
        }
    }
}

impl From<ChatMessage> for GoogleContent {
    fn from(message: ChatMessage) -> Self {
        Self {
            role: Some(GoogleRole::from(&message)),
            parts: vec![GooglePart {
                text: message.content().cloned(),
            }],
        }
    }
}

impl GoogleGenerateRequest {
    pub(super) fn new(messages: Vec<ChatMessage>, system_prompt: Option<Value>) -> Self {
        Self {
            system_instruction: GoogleContent {
                role: None,
                parts: vec![GooglePart { text: system_prompt }],
            },
            contents: messages.into_iter().map(GoogleContent::from).collect(),
        }
    }
}
