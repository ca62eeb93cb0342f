mod input;
mod output;

use config::ProviderConfig;
use reqwest::{Client, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use self::{input::OpenAIRequest, output::OpenAIResponse};

use crate::{
    messages::{ChatMessage, ChatReply},
    provider,
};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

const DEFAULT_QWEN_API_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";
const DEFAULT_QWEN_MODEL: &str = "qwen-max";

const DEFAULT_DEEPSEEK_API_URL: &str = "https://api.deepseek.com";
const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

/// Adapter for every vendor speaking the OpenAI chat completions dialect.
pub(crate) struct OpenAIProvider {
    client: Client,
    url: String,
    model: String,
    vendor: &'static str,
}

impl OpenAIProvider {
    pub fn openai(client: Client, config: &ProviderConfig) -> Self {
        Self::new(client, config, "OpenAI", DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL)
    }

    pub fn qwen(client: Client, config: &ProviderConfig) -> Self {
        Self::new(client, config, "Qwen", DEFAULT_QWEN_API_URL, DEFAULT_QWEN_MODEL)
    }

    pub fn deepseek(client: Client, config: &ProviderConfig) -> Self {
        Self::new(client, config, "DeepSeek", DEFAULT_DEEPSEEK_API_URL, DEFAULT_DEEPSEEK_MODEL)
    }

    fn new(
        client: Client,
        config: &ProviderConfig,
        vendor: &'static str,
        default_url: &str,
        default_model: &str,
    ) -> Self {
        let url = format!("{}/chat/completions", provider::base_url(config, default_url));
        let model = provider::model(config, default_model);

        log::debug!("{vendor} adapter targets {url} with model {model}");

        Self {
            client,
            url,
            model,
            vendor,
        }
    }

    pub fn vendor(&self) -> &'static str {
        self.vendor
    }

    pub async fn chat_completion(
        &self,
        api_key: &SecretString,
        messages: Vec<ChatMessage>,
        system_prompt: Option<Value>,
    ) -> crate::Result<ChatReply> {
        let request = OpenAIRequest::new(&self.model, messages, system_prompt);

        let request_builder = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key.expose_secret()))
            .json(&request);

        let response: OpenAIResponse = provider::send(self.vendor, request_builder).await?;

        provider::reply(self.vendor, response.into_content(), "choices[0].message.content")
    }
}
