//! Chat relay configuration structures to map the chat-relay.toml configuration.

#![deny(missing_docs)]

mod loader;
mod relay;

use std::{borrow::Cow, net::SocketAddr, path::Path};

pub use relay::{ProviderConfig, ProvidersConfig, RelayConfig};
use serde::Deserialize;

/// Main configuration structure for the relay.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound vendor configuration settings.
    #[serde(default)]
    pub relay: RelayConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }
}

/// HTTP server configuration settings.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// The socket address the server should listen on.
    pub listen_address: Option<SocketAddr>,
    /// Health endpoint configuration.
    #[serde(default)]
    pub health: HealthConfig,
}

/// Health endpoint configuration.
///
/// Disabled by default: the relay answers every non-POST request on every path with 405, and a health
/// route on the main listener would shadow that for its path.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    /// Whether the health endpoint is enabled.
    pub enabled: bool,
    /// The socket address the health endpoint should listen on.
    pub listen: Option<SocketAddr>,
    /// The path for the health endpoint.
    pub path: Cow<'static, str>,
}

impl Default for HealthConfig {
    fn default() -> Self {
        HealthConfig {
            enabled: false,
            listen: None,
            path: Cow::Borrowed("/health"),
        }
    }
}
