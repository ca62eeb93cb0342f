mod input;
mod output;

use config::ProviderConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use self::{input::AnthropicRequest, output::AnthropicResponse};

use crate::{
    messages::{ChatMessage, ChatReply},
    provider,
};

pub(crate) const VENDOR: &str = "Claude";

const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

pub(crate) struct AnthropicProvider {
    client: Client,
    url: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        let url = format!("{}/messages", provider::base_url(config, DEFAULT_ANTHROPIC_API_URL));
        let model = provider::model(config, DEFAULT_ANTHROPIC_MODEL);

        log::debug!("{VENDOR} adapter targets {url} with model {model}");

        Self { client, url, model }
    }

    pub async fn chat_completion(
        &self,
        api_key: &SecretString,
        messages: Vec<ChatMessage>,
        system_prompt: Option<Value>,
    ) -> crate::Result<ChatReply> {
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: system_prompt,
            messages,
        };

        let request_builder = self
            .client
            .post(&self.url)
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request);

        let response: AnthropicResponse = provider::send(VENDOR, request_builder).await?;

        provider::reply(VENDOR, response.into_text(), "content[0].text")
    }
}
