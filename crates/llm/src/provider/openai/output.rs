use serde::Deserialize;

/// Response from OpenAI-compatible Chat Completions APIs.
///
/// Only the fields the relay reads are modeled. Every level is optional so that a body without a
/// reply is reported as such instead of as a parse failure.
#[derive(Debug, Deserialize)]
pub(super) struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

impl OpenAIResponse {
    /// The text at `choices[0].message.content`.
    pub(super) fn into_content(self) -> Option<String> {
        self.choices.into_iter().next()?.message?.content
    }
}
