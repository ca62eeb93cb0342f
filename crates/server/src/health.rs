use std::net::SocketAddr;

use anyhow::anyhow;
use axum::{Json, Router, routing::get};
use config::HealthConfig;
use http::StatusCode;
use tokio::net::TcpListener;

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub(crate) enum HealthState {
    /// Indicates that the server is healthy and operational.
    Healthy,
}

/// Handles health check requests. The relay holds no state, being able to answer is being healthy.
pub(crate) async fn health() -> (StatusCode, Json<HealthState>) {
    (StatusCode::OK, Json(HealthState::Healthy))
}

/// Router answering `GET` on the configured health path.
pub(super) fn router(health_config: &HealthConfig) -> Router {
    Router::new().route(&health_config.path, get(health))
}

/// Binds the health check endpoint to its own address.
pub(super) async fn bind_health_endpoint(addr: SocketAddr, health_config: HealthConfig) -> anyhow::Result<()> {
    let app = router(&health_config);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow!("Failed to bind health endpoint to {addr}: {e}"))?;

    log::info!("Health check endpoint exposed at http://{addr}{}", health_config.path);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow!("Failed to start HTTP server in the health endpoint: {e}"))?;

    Ok(())
}
