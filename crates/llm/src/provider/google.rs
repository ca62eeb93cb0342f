mod input;
mod output;

use config::ProviderConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use self::{input::GoogleGenerateRequest, output::GoogleGenerateResponse};

use crate::{
    messages::{ChatMessage, ChatReply},
    provider,
};

pub(crate) const VENDOR: &str = "Gemini";

const DEFAULT_GOOGLE_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GOOGLE_MODEL: &str = "gemini-1.5-pro";

pub(crate) struct GoogleProvider {
    client: Client,
    url: String,
}

impl GoogleProvider {
    pub fn new(client: Client, config: &ProviderConfig) -> Self {
        let model = provider::model(config, DEFAULT_GOOGLE_MODEL);
        let url = format!(
            "{}/models/{model}:generateContent",
            provider::base_url(config, DEFAULT_GOOGLE_API_URL)
        );

        log::debug!("{VENDOR} adapter targets {url}");

        Self { client, url }
    }

    pub async fn chat_completion(
        &self,
        api_key: &SecretString,
        messages: Vec<ChatMessage>,
        system_prompt: Option<Value>,
    ) -> crate::Result<ChatReply> {
        let request = GoogleGenerateRequest::new(messages, system_prompt);

        // Gemini takes the key as a query parameter, not a header.
        let request_builder = self
            .client
            .post(&self.url)
            .query(&[("key", api_key.expose_secret())])
            .json(&request);

        let response: GoogleGenerateResponse = provider::send(VENDOR, request_builder).await?;

        provider::reply(VENDOR, response.into_text(), "candidates[0].content.parts[0].text")
    }
}
