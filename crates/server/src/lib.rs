//! Chat relay server library.
//!
//! Provides a reusable server function to serve the relay either for the binary, or for the integration tests.

#![deny(missing_docs)]

mod cors;
mod health;

use std::net::SocketAddr;

use anyhow::anyhow;
use axum::Router;
use config::Config;
use tokio::net::TcpListener;

/// Configuration for serving the relay.
#[derive(Debug)]
pub struct ServeConfig {
    /// The socket address (IP and port) the server will bind to
    pub listen_address: SocketAddr,
    /// The deserialized relay TOML configuration.
    pub config: Config,
}

/// Starts and runs the relay server with the provided configuration.
pub async fn serve(ServeConfig { listen_address, config }: ServeConfig) -> anyhow::Result<()> {
    let mut app = Router::new();

    // Health is opt-in: a route on the main listener takes its path away from the relay.
    if config.server.health.enabled {
        if let Some(listen) = config.server.health.listen {
            let health_config = config.server.health.clone();

            tokio::spawn(async move {
                if let Err(e) = health::bind_health_endpoint(listen, health_config).await {
                    log::error!("{e}");
                }
            });
        } else {
            app = app.merge(health::router(&config.server.health));
        }
    }

    // The relay router owns the fallback: every other path and method lands there.
    app = app.merge(llm::router(&config.relay)?);

    // CORS goes on last so it also covers the health route and answers OPTIONS everywhere.
    let app = app.layer(cors::generate());

    let listener = TcpListener::bind(listen_address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {listen_address}: {e}"))?;

    log::info!("Chat relay available at: http://{listen_address}");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow!("Failed to start HTTP server: {e}"))?;

    Ok(())
}
