use integration_tests::TestServer;
use reqwest::{Method, header};
use serde_json::json;

#[tokio::test]
async fn preflight_on_any_path() {
    let server = TestServer::start("").await;

    for path in ["/", "/api/chat", "/deeply/nested/path"] {
        let response = server
            .client
            .request(Method::OPTIONS, path)
            .header(header::ORIGIN, "https://app.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200, "{path}");

        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("POST"), "{methods}");
        assert!(methods.contains("OPTIONS"), "{methods}");

        let allowed_headers = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
        assert_eq!(allowed_headers.to_lowercase(), "content-type");

        let body = response.text().await.unwrap();
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn bare_options_request() {
    let server = TestServer::start("").await;

    let response = server.client.request(Method::OPTIONS, "/").send().await.unwrap();
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn relay_answers_carry_allow_origin() {
    let server = TestServer::start("").await;

    let response = server
        .client
        .request(Method::POST, "/")
        .header(header::ORIGIN, "https://app.example.com")
        .json(&json!({"provider": "openai"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
