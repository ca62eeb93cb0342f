//! Mock vendor APIs that record what the relay sends them.

mod anthropic;
mod google;
mod mock;
mod openai;

use std::future::Future;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

pub use anthropic::AnthropicMock;
pub use google::GoogleMock;
pub use mock::{MockBehavior, RecordedRequest, VendorHandle};
pub use openai::OpenAIMock;

/// Trait for mock vendors
///
/// The builder methods are shared, the wire shape of a successful reply is vendor specific.
pub trait TestVendor: Sized + Send + 'static {
    /// The relay provider id this mock stands in for, used as the config key.
    fn provider(&self) -> &str;

    /// Path prefix put into the configured `base_url`.
    fn base_path(&self) -> &str;

    /// Body of a successful completion carrying `reply`.
    fn success_body(&self, reply: &str) -> Value;

    fn behavior(&self) -> &MockBehavior;

    fn behavior_mut(&mut self) -> &mut MockBehavior;

    /// Model override written into the relay configuration.
    fn model(&self) -> Option<&str> {
        self.behavior().model.as_deref()
    }

    /// Answer with a successful completion carrying this text.
    fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.behavior_mut().reply = mock::Reply::Text(reply.into());
        self
    }

    /// Answer with a non-2xx status and a plain body.
    fn with_error(mut self, status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.behavior_mut().reply = mock::Reply::Error(status, body.into());
        self
    }

    /// Answer 200 with this exact body.
    fn with_body(mut self, body: impl Into<String>) -> Self {
        self.behavior_mut().reply = mock::Reply::Raw(body.into());
        self
    }

    /// Hold every answer back for this long.
    fn with_delay(mut self, delay: Duration) -> Self {
        self.behavior_mut().delay = Some(delay);
        self
    }

    fn with_model(mut self, model: impl Into<String>) -> Self {
        self.behavior_mut().model = Some(model.into());
        self
    }

    /// Start the mock server on an ephemeral port.
    fn spawn(self) -> impl Future<Output = anyhow::Result<VendorHandle>> + Send {
        let response = self.behavior().response(|reply| self.success_body(reply));
        mock::spawn(response)
    }
}
