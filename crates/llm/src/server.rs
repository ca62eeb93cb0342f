use std::time::Duration;

use config::RelayConfig;
use reqwest::Client;

use crate::{
    error::RelayError,
    messages::{ChatReply, ChatRequest},
    provider::{
        Provider, ProviderId, anthropic::AnthropicProvider, google::GoogleProvider, openai::OpenAIProvider,
    },
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The request dispatcher: validates the inbound envelope, selects the adapter and runs the single
/// outbound call.
pub(crate) struct RelayServer {
    providers: Providers,
}

/// One adapter per provider id.
struct Providers {
    openai: Provider,
    claude: Provider,
    gemini: Provider,
    qwen: Provider,
    deepseek: Provider,
}

impl Providers {
    fn get(&self, id: ProviderId) -> &Provider {
        match id {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Claude => &self.claude,
            ProviderId::Gemini => &self.gemini,
            ProviderId::Qwen => &self.qwen,
            ProviderId::DeepSeek => &self.deepseek,
        }
    }
}

impl RelayServer {
    pub fn new(config: &RelayConfig) -> crate::Result<Self> {
        let timeout = config.timeout.unwrap_or(DEFAULT_TIMEOUT);

        // reqwest clients are handles to an immutable connector, adapters share clones of this one
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            log::error!("Failed to create HTTP client for the relay: {e}");
            RelayError::ConnectionError(format!("Failed to create HTTP client: {e}"))
        })?;

        log::debug!("Outbound vendor calls time out after {timeout:?}");

        let providers = &config.providers;

        Ok(Self {
            providers: Providers {
                openai: Provider::OpenAi(OpenAIProvider::openai(client.clone(), &providers.openai)),
                claude: Provider::Anthropic(AnthropicProvider::new(client.clone(), &providers.claude)),
                gemini: Provider::Google(GoogleProvider::new(client.clone(), &providers.gemini)),
                qwen: Provider::OpenAi(OpenAIProvider::qwen(client.clone(), &providers.qwen)),
                deepseek: Provider::OpenAi(OpenAIProvider::deepseek(client, &providers.deepseek)),
            },
        })
    }

    /// Handle one raw request body.
    ///
    /// Only a body that is not a JSON object fails the parse, field checks happen in
    /// [`ChatRequest::validate`]. No outbound call is made for invalid requests.
    pub async fn dispatch(&self, body: &[u8]) -> crate::Result<ChatReply> {
        let request: ChatRequest = serde_json::from_slice(body).map_err(|e| RelayError::InvalidJson(e.to_string()))?;
        let request = request.validate()?;

        let id = request.provider;
        let provider = self.providers.get(id);

        log::debug!(
            "Relaying {} message(s) to {id} ({})",
            request.messages.len(),
            provider.vendor()
        );

        provider
            .call(&request.api_key, request.messages, request.system_prompt)
            .await
    }
}
