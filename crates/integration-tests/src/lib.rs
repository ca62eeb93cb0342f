pub mod vendors;

use std::net::SocketAddr;
use std::time::Duration;

use config::Config;
use indoc::formatdoc;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use server::ServeConfig;
use tokio::net::TcpListener;
use tokio::time::timeout;

use crate::vendors::{TestVendor, VendorHandle};

/// Test client for making HTTP requests to the test server
pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    /// Create a new test client for the given base URL
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Send a POST request to the given path with a JSON body
    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// Send a POST request with a body that is sent as-is
    pub async fn post_raw(&self, path: &str, body: impl Into<reqwest::Body>) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap()
    }

    /// Send a GET request to the given path
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }

    /// Start a request with an arbitrary method
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }
}

/// Builder collecting mock vendors before the relay starts
#[derive(Default)]
pub struct TestServerBuilder {
    vendor_config: String,
}

impl TestServerBuilder {
    /// Start a mock vendor and point its provider id at it
    pub async fn spawn_vendor(&mut self, vendor: impl TestVendor) -> VendorHandle {
        let provider = vendor.provider().to_string();
        let base_path = vendor.base_path().to_string();
        let model = vendor.model().map(str::to_string);

        let handle = vendor.spawn().await.unwrap();

        self.vendor_config.push_str(&formatdoc! {r#"

            [relay.providers.{provider}]
            base_url = "http://{address}{base_path}"
        "#, address = handle.address});

        if let Some(model) = model {
            self.vendor_config.push_str(&format!("model = \"{model}\"\n"));
        }

        handle
    }

    /// Start the relay with the given TOML configuration plus the spawned vendors
    pub async fn build(self, config_toml: &str) -> TestServer {
        let config = format!("{config_toml}\n{}", self.vendor_config);

        TestServer::start(&config).await
    }
}

/// Test server that manages the lifecycle of a relay instance
pub struct TestServer {
    pub client: TestClient,
    pub address: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub fn builder() -> TestServerBuilder {
        TestServerBuilder::default()
    }

    /// Start a new test server with the given TOML configuration
    pub async fn start(config_toml: &str) -> Self {
        let config: Config = toml::from_str(config_toml).unwrap();

        // Find an available port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let serve_config = ServeConfig {
            listen_address: address,
            config,
        };

        let (tx, mut rx) = tokio::sync::oneshot::channel();
        let handle = tokio::spawn(async move {
            // Drop the listener so the server can bind to the address
            drop(listener);

            let _ = tx.send(server::serve(serve_config).await);
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        if let Ok(Err(e)) = rx.try_recv() {
            eprintln!("Server failed to start: {e}");
            std::process::exit(1);
        }

        let client = TestClient::new(format!("http://{address}"));

        // Any answer means the listener is up, the relay rejects GET with a 405.
        let mut retries = 10;
        while retries > 0 {
            if timeout(Duration::from_millis(100), client.get("/")).await.is_ok() {
                break;
            }
            retries -= 1;
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestServer {
            client,
            address,
            _handle: handle,
        }
    }

    /// POST a chat envelope to the relay root
    pub async fn chat(&self, body: Value) -> Response {
        self.client.post("/", &body).await
    }
}
