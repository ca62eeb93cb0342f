//! Outbound vendor configuration.

use std::time::Duration;

use duration_str::deserialize_option_duration;
use serde::Deserialize;
use url::Url;

/// Configuration for the outbound side of the relay.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Deadline for a single outbound vendor call. Defaults to 60 seconds when not set.
    #[serde(deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
    /// Per-vendor overrides.
    pub providers: ProvidersConfig,
}

/// One table per supported vendor. The set is closed: unknown tables are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvidersConfig {
    /// OpenAI chat completions.
    pub openai: ProviderConfig,
    /// Anthropic messages API.
    pub claude: ProviderConfig,
    /// Google Gemini generateContent.
    pub gemini: ProviderConfig,
    /// Alibaba DashScope, OpenAI compatible mode.
    pub qwen: ProviderConfig,
    /// DeepSeek chat completions.
    pub deepseek: ProviderConfig,
}

/// Overrides for a single vendor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// API base URL. The vendor's public endpoint is used if not set.
    pub base_url: Option<Url>,
    /// Model name sent to the vendor. The relay default is used if not set.
    pub model: Option<String>,
}

impl ProvidersConfig {
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'static str, &ProviderConfig)> {
        [
            ("openai", &self.openai),
            ("claude", &self.claude),
            ("gemini", &self.gemini),
            ("qwen", &self.qwen),
            ("deepseek", &self.deepseek),
        ]
        .into_iter()
    }
}
