use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Relay errors with the HTTP status code they are reported with.
#[derive(Debug, Error)]
pub enum RelayError {
    /// `provider`, `apiKey` or `messages` is absent, null or empty.
    #[error("Missing required fields")]
    MissingFields,

    /// The provider tag is not one of the supported vendors.
    #[error("Unknown provider")]
    UnknownProvider(String),

    /// The inbound body is not a valid chat request document.
    #[error("{0}")]
    InvalidJson(String),

    /// The vendor answered with a non-success status. The body is kept verbatim, it is not always JSON.
    #[error("{vendor} error: {status} - {body}")]
    ProviderApiError {
        vendor: &'static str,
        status: u16,
        body: String,
    },

    /// The vendor could not be reached, or the call did not finish before the deadline.
    #[error("{0}")]
    ConnectionError(String),

    /// The vendor answered with a success status but the reply text could not be extracted.
    #[error("{0}")]
    InvalidResponse(String),
}

impl RelayError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::UnknownProvider(_) => StatusCode::BAD_REQUEST,
            Self::InvalidJson(_)
            | Self::ProviderApiError { .. }
            | Self::ConnectionError(_)
            | Self::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The only shape returned to the caller on failure.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::UnknownProvider(tag) => {
                log::debug!("Rejected relay request ({}): unknown provider tag {tag}", status.as_u16());
            }
            _ if status.is_server_error() => log::error!("Relay request failed ({}): {self}", status.as_u16()),
            _ => log::debug!("Rejected relay request ({}): {self}", status.as_u16()),
        }

        let envelope = ErrorEnvelope { error: self.to_string() };

        (status, Json(envelope)).into_response()
    }
}
