use integration_tests::{
    TestServer,
    vendors::{AnthropicMock, GoogleMock, OpenAIMock, VendorHandle},
};
use serde_json::{Value, json};

use super::status_and_json;

/// A relay with every provider pointed at a recording mock.
async fn relay_with_all_vendors() -> (TestServer, Vec<VendorHandle>) {
    let mut builder = TestServer::builder();

    let vendors = vec![
        builder.spawn_vendor(OpenAIMock::new("openai")).await,
        builder.spawn_vendor(AnthropicMock::new()).await,
        builder.spawn_vendor(GoogleMock::new()).await,
        builder.spawn_vendor(OpenAIMock::new("qwen")).await,
        builder.spawn_vendor(OpenAIMock::new("deepseek")).await,
    ];

    (builder.build("").await, vendors)
}

fn assert_no_vendor_calls(vendors: &[VendorHandle]) {
    for vendor in vendors {
        assert!(vendor.requests().is_empty(), "{:#?}", vendor.requests());
    }
}

#[tokio::test]
async fn missing_fields() {
    let (server, vendors) = relay_with_all_vendors().await;

    let bodies: Vec<Value> = vec![
        json!({}),
        json!({"apiKey": "k", "messages": [{"role": "user", "content": "hi"}]}),
        json!({"provider": "openai", "messages": [{"role": "user", "content": "hi"}]}),
        json!({"provider": "openai", "apiKey": "k"}),
        json!({"provider": "", "apiKey": "k", "messages": [{"role": "user", "content": "hi"}]}),
        json!({"provider": "claude", "apiKey": "", "messages": [{"role": "user", "content": "hi"}]}),
        json!({"provider": "gemini", "apiKey": "k", "messages": []}),
        json!({"provider": "qwen", "apiKey": null, "messages": [{"role": "user", "content": "hi"}]}),
        json!({"provider": "deepseek", "apiKey": "k", "messages": null, "systemPrompt": "be terse"}),
        // Presence is checked before the provider tag, whatever the other fields hold.
        json!({"provider": "mistral", "apiKey": "k"}),
        json!({"provider": 42, "apiKey": "k"}),
        json!({"provider": "openai", "messages": 5}),
        json!({"provider": "openai", "apiKey": false, "messages": [{"role": "user", "content": "hi"}]}),
        json!({"provider": "openai", "apiKey": 0, "messages": [{"role": "user", "content": "hi"}]}),
        json!({"provider": "openai", "messages": [{"role": "user", "content": "hi"}], "systemPrompt": 7}),
    ];

    for body in bodies {
        let (status, error) = status_and_json(server.chat(body.clone()).await).await;

        assert_eq!(status, 400, "{body}");
        assert_eq!(error, json!({"error": "Missing required fields"}), "{body}");
    }

    assert_no_vendor_calls(&vendors);
}

#[tokio::test]
async fn unknown_provider() {
    let (server, vendors) = relay_with_all_vendors().await;

    for provider in [json!("mistral"), json!("OpenAI"), json!("gpt-4"), json!(1), json!({"name": "openai"})] {
        let response = server
            .chat(json!({
                "provider": provider.clone(),
                "apiKey": "k",
                "messages": [{"role": "user", "content": "hi"}]
            }))
            .await;

        let (status, body) = status_and_json(response).await;

        assert_eq!(status, 400, "{provider}");
        insta::allow_duplicates! {
            insta::assert_json_snapshot!(body, @r#"
            {
              "error": "Unknown provider"
            }
            "#);
        }
    }

    assert_no_vendor_calls(&vendors);
}

#[tokio::test]
async fn malformed_body() {
    let (server, vendors) = relay_with_all_vendors().await;

    for body in ["{not json", "", "42", r#""openai""#] {
        let response = server.client.post_raw("/", body).await;
        let (status, error) = status_and_json(response).await;

        assert_eq!(status, 500, "{body}");
        assert!(!error["error"].as_str().unwrap().is_empty(), "{body}");
    }

    assert_no_vendor_calls(&vendors);
}

#[tokio::test]
async fn non_array_messages() {
    let (server, vendors) = relay_with_all_vendors().await;

    let response = server
        .chat(json!({"provider": "claude", "apiKey": "k", "messages": "hi"}))
        .await;

    let (status, body) = status_and_json(response).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({"error": "messages must be an array"}));

    assert_no_vendor_calls(&vendors);
}

#[tokio::test]
async fn malformed_messages_are_forwarded() {
    let (server, vendors) = relay_with_all_vendors().await;

    let messages = json!(["hi", {"role": 5, "content": "x"}, null]);

    let response = server
        .chat(json!({"provider": "claude", "apiKey": "k", "messages": messages.clone()}))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(vendors[1].single_request().body["messages"], messages);

    let response = server
        .chat(json!({"provider": "openai", "apiKey": "k", "messages": messages.clone(), "systemPrompt": 7}))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        vendors[0].single_request().body["messages"],
        json!([{"role": "system", "content": 7}, "hi", {"role": 5, "content": "x"}, null])
    );

    let response = server
        .chat(json!({"provider": "gemini", "apiKey": "k", "messages": messages}))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        vendors[2].single_request().body["contents"],
        json!([
            {"role": "user", "parts": [{}]},
            {"role": "user", "parts": [{"text": "x"}]},
            {"role": "user", "parts": [{}]}
        ])
    );
}

#[tokio::test]
async fn any_path_is_accepted() {
    let (server, vendors) = relay_with_all_vendors().await;

    let response = server
        .client
        .post(
            "/some/arbitrary/path?x=1",
            &json!({
                "provider": "openai",
                "apiKey": "k",
                "messages": [{"role": "user", "content": "hi"}]
            }),
        )
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(vendors[0].requests().len(), 1);
}
