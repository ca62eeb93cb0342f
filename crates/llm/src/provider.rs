pub(crate) mod anthropic;
pub(crate) mod google;
pub(crate) mod openai;

use std::{fmt, str::FromStr};

use config::ProviderConfig;
use reqwest::RequestBuilder;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::RelayError,
    messages::{ChatMessage, ChatReply},
};

use self::{anthropic::AnthropicProvider, google::GoogleProvider, openai::OpenAIProvider};

/// The closed set of vendors the relay can forward to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProviderId {
    OpenAi,
    Claude,
    Gemini,
    Qwen,
    DeepSeek,
}

impl ProviderId {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Qwen => "qwen",
            Self::DeepSeek => "deepseek",
        }
    }
}

impl FromStr for ProviderId {
    type Err = RelayError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "openai" => Ok(Self::OpenAi),
            "claude" => Ok(Self::Claude),
            "gemini" => Ok(Self::Gemini),
            "qwen" => Ok(Self::Qwen),
            "deepseek" => Ok(Self::DeepSeek),
            other => Err(RelayError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vendor adapter. Every variant honors the same contract: one outbound call, reply text or error.
pub(crate) enum Provider {
    OpenAi(OpenAIProvider),
    Anthropic(AnthropicProvider),
    Google(GoogleProvider),
}

impl Provider {
    pub(crate) async fn call(
        &self,
        api_key: &SecretString,
        messages: Vec<ChatMessage>,
        system_prompt: Option<Value>,
    ) -> crate::Result<ChatReply> {
        match self {
            Self::OpenAi(provider) => provider.chat_completion(api_key, messages, system_prompt).await,
            Self::Anthropic(provider) => provider.chat_completion(api_key, messages, system_prompt).await,
            Self::Google(provider) => provider.chat_completion(api_key, messages, system_prompt).await,
        }
    }

    pub(crate) fn vendor(&self) -> &'static str {
        match self {
            Self::OpenAi(provider) => provider.vendor(),
            Self::Anthropic(_) => anthropic::VENDOR,
            Self::Google(_) => google::VENDOR,
        }
    }
}

/// Resolve the API base URL for a vendor, without a trailing slash.
pub(super) fn base_url(config: &ProviderConfig, default: &str) -> String {
    config
        .base_url
        .as_ref()
        .map(|url| url.as_str().trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Resolve the model name sent to a vendor.
pub(super) fn model(config: &ProviderConfig, default: &str) -> String {
    config.model.clone().unwrap_or_else(|| default.to_string())
}

/// Send a prepared vendor request and parse a successful body.
///
/// Non-success statuses keep the raw body text in the error, it is not parsed as JSON.
pub(super) async fn send<T: DeserializeOwned>(vendor: &'static str, request: RequestBuilder) -> crate::Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| RelayError::ConnectionError(format!("Failed to send request to {vendor}: {e}")))?;

    let status = response.status();
    log::debug!("{vendor} responded with status {status}");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        log::error!("{vendor} API error ({status}): {body}");

        return Err(RelayError::ProviderApiError {
            vendor,
            status: status.as_u16(),
            body,
        });
    }

    // First get the response as text to log if parsing fails
    let response_text = response
        .text()
        .await
        .map_err(|e| RelayError::ConnectionError(format!("Failed to read {vendor} response body: {e}")))?;

    sonic_rs::from_str(&response_text).map_err(|e| {
        log::error!("Failed to parse {vendor} response: {e}");
        RelayError::InvalidResponse(format!("Failed to parse {vendor} response: {e}"))
    })
}

/// Turn an extracted reply into the normalized shape, failing when the vendor left it out.
pub(super) fn reply(vendor: &'static str, content: Option<String>, path: &str) -> crate::Result<ChatReply> {
    match content {
        Some(content) => Ok(ChatReply { content }),
        None => {
            log::error!("{vendor} response did not contain {path}");
            Err(RelayError::InvalidResponse(format!(
                "{vendor} response did not contain {path}"
            )))
        }
    }
}
