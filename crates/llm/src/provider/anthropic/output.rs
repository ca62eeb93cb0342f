use serde::Deserialize;

/// Response from Anthropic Messages API.
///
/// Only the content blocks are modeled, the relay returns the text of the first one.
#[derive(Debug, Deserialize)]
pub(super) struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
}

/// A content block. Tool use and other non-text blocks have no `text`.
#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: Option<String>,
}

impl AnthropicResponse {
    /// The text at `content[0].text`.
    pub(super) fn into_text(self) -> Option<String> {
        self.content.into_iter().next()?.text
    }
}
