use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tokio::net::TcpListener;

/// A request as the mock vendor received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    /// The JSON body, `Value::Null` if the body was not JSON.
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// A decoded query parameter.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let url = reqwest::Url::parse(&format!("http://vendor{}?{}", self.path, self.query.as_deref()?)).ok()?;

        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Error(StatusCode, String),
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct MockBehavior {
    pub(crate) reply: Reply,
    pub(crate) delay: Option<Duration>,
    pub(crate) model: Option<String>,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            reply: Reply::Text("Hello from the mock vendor".to_string()),
            delay: None,
            model: None,
        }
    }
}

impl MockBehavior {
    pub(crate) fn response(&self, success_body: impl FnOnce(&str) -> Value) -> MockResponse {
        let (status, content_type, body) = match &self.reply {
            Reply::Text(reply) => (StatusCode::OK, "application/json", success_body(reply).to_string()),
            Reply::Error(status, body) => (*status, "text/plain", body.clone()),
            Reply::Raw(body) => (StatusCode::OK, "application/json", body.clone()),
        };

        MockResponse {
            status,
            content_type,
            body,
            delay: self.delay,
        }
    }
}

pub(crate) struct MockResponse {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    response: MockResponse,
}

/// Handle to a running mock vendor.
#[derive(Clone)]
pub struct VendorHandle {
    pub address: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl VendorHandle {
    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request received, panics on zero or several.
    pub fn single_request(&self) -> RecordedRequest {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one vendor call: {requests:#?}");

        requests.remove(0)
    }
}

pub(crate) async fn spawn(response: MockResponse) -> anyhow::Result<VendorHandle> {
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = Arc::new(MockState {
        requests: requests.clone(),
        response,
    });

    // Every path is recorded, the tests assert where the relay sent the call.
    let app = Router::new().fallback(record).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(VendorHandle { address, requests })
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let response = &state.response;

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    (
        response.status,
        [(CONTENT_TYPE, response.content_type)],
        response.body.clone(),
    )
        .into_response()
}
