use std::path::Path;

use anyhow::{Context, bail};

use crate::Config;

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

    validate(&config)?;

    log::debug!("Loaded configuration from {}", path.display());

    Ok(config)
}

pub(crate) fn validate(config: &Config) -> anyhow::Result<()> {
    if config.relay.timeout.is_some_and(|timeout| timeout.is_zero()) {
        bail!("relay.timeout must be greater than zero");
    }

    for (name, provider) in config.relay.providers.iter() {
        if let Some(url) = &provider.base_url
            && !matches!(url.scheme(), "http" | "https")
        {
            bail!(
                "relay.providers.{name}.base_url must use http or https, got '{}'",
                url.scheme()
            );
        }

        if provider.model.as_deref().is_some_and(str::is_empty) {
            bail!("relay.providers.{name}.model must not be empty");
        }
    }

    Ok(())
}
