use std::{
    fmt,
    io::IsTerminal,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::PathBuf,
    str::FromStr,
};

use clap::{Parser, ValueEnum};
use config::Config;
use logforth::filter::EnvFilter;
use server::ServeConfig;

/// Used when neither the command line nor the configuration file names an address.
pub(crate) const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8000));

/// Crates whose log output follows `--log`. Everything else is capped at `warn`.
const RELAY_CRATES: [&str; 4] = ["chat_relay", "server", "config", "llm"];

#[derive(Debug, Parser)]
#[command(name = "Chat Relay", version, long_about = concat!("Chat Relay v", env!("CARGO_PKG_VERSION")))]
pub struct Args {
    /// Address to accept relay requests on. Overrides `server.listen_address` from the configuration.
    /// Default: 127.0.0.1:8000
    #[arg(short, long, env = "RELAY_LISTEN_ADDRESS")]
    pub listen_address: Option<SocketAddr>,
    /// Path to the TOML configuration file. The relay runs on defaults when the file does not exist.
    #[arg(long, short, env = "RELAY_CONFIG_PATH", default_value = "./chat-relay.toml")]
    pub config: PathBuf,
    /// Log level of the relay's own crates.
    #[arg(long = "log", env = "RELAY_LOG", default_value_t = LogLevel::default())]
    pub log_level: LogLevel,
    /// Log output format.
    #[arg(long, env = "RELAY_LOG_STYLE", default_value_t = LogStyle::default())]
    pub log_style: LogStyle,
}

impl Args {
    /// Everything `server::serve` needs: the loaded configuration and the resolved listen address.
    pub fn serve_config(&self) -> anyhow::Result<ServeConfig> {
        let config = self.load_config()?;
        let listen_address = self.listen_address(&config);

        Ok(ServeConfig { listen_address, config })
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        if !self.config.exists() {
            log::info!("No configuration file at {}, using defaults", self.config.display());
            return Ok(Config::default());
        }

        Config::load(&self.config)
    }

    /// Command line (or `RELAY_LISTEN_ADDRESS`) first, then the configuration file, then the default.
    fn listen_address(&self, config: &Config) -> SocketAddr {
        self.listen_address
            .or(config.server.listen_address)
            .unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogStyle {
    /// Colorized text, the default on a terminal
    Color,
    /// Plain text, the default when output is redirected
    Text,
    /// One JSON object per line
    Json,
}

impl Default for LogStyle {
    fn default() -> Self {
        if std::io::stdout().is_terminal() {
            LogStyle::Color
        } else {
            LogStyle::Text
        }
    }
}

impl LogStyle {
    fn as_str(self) -> &'static str {
        match self {
            LogStyle::Color => "color",
            LogStyle::Text => "text",
            LogStyle::Json => "json",
        }
    }
}

impl fmt::Display for LogStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogLevel {
    /// Disable logging
    Off,
    /// Failed vendor calls and startup errors
    Error,
    Warn,
    /// Listening addresses
    #[default]
    Info,
    /// Dispatch decisions, vendor statuses and rejected requests
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// The filter directive: `warn` for dependencies, the selected level for the relay crates.
    fn directive(self) -> String {
        if self == LogLevel::Off {
            return "off".to_string();
        }

        RELAY_CRATES
            .iter()
            .fold(String::from("warn"), |directive, krate| format!("{directive},{krate}={self}"))
    }

    pub fn env_filter(self) -> EnvFilter {
        EnvFilter::from_str(&self.directive()).expect("relay log directives are always valid")
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
