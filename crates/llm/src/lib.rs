use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Json, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use config::RelayConfig;

mod error;
mod messages;
mod provider;
mod server;

pub use error::RelayError;
use server::RelayServer;

pub(crate) type Result<T> = std::result::Result<T, RelayError>;

/// Creates an axum router relaying chat requests to the configured vendors.
///
/// The relay answers on every path: `POST` dispatches the request, any other method gets a 405.
/// Cross-origin preflight (`OPTIONS`) is left to the CORS layer of the surrounding app.
pub fn router(config: &RelayConfig) -> anyhow::Result<Router> {
    let server = RelayServer::new(config).map_err(|e| anyhow::anyhow!("Failed to initialize relay: {e}"))?;

    Ok(Router::new().fallback(relay).with_state(Arc::new(server)))
}

/// Handle a relay request.
async fn relay(State(server): State<Arc<RelayServer>>, method: Method, body: Bytes) -> Response {
    if method != Method::POST {
        log::debug!("Rejecting {method} request");
        return (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response();
    }

    match server.dispatch(&body).await {
        Ok(reply) => Json(reply).into_response(),
        Err(error) => error.into_response(),
    }
}
