use integration_tests::{
    TestServer,
    vendors::{AnthropicMock, TestVendor},
};
use serde_json::json;

use super::status_and_json;

#[tokio::test]
async fn system_prompt_is_a_top_level_field() {
    let mut builder = TestServer::builder();
    let vendor = builder
        .spawn_vendor(AnthropicMock::new().with_reply("Bonjour"))
        .await;

    let server = builder.build("").await;

    let response = server
        .chat(json!({
            "provider": "claude",
            "apiKey": "sk-ant-test",
            "messages": [
                {"role": "user", "content": "Say hello in French"},
                {"role": "assistant", "content": "Bonjour"},
                {"role": "user", "content": "Again"}
            ],
            "systemPrompt": "be terse"
        }))
        .await;

    let (status, body) = status_and_json(response).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"content": "Bonjour"}));

    let request = vendor.single_request();

    assert_eq!(request.path, "/v1/messages");
    assert_eq!(request.header("x-api-key"), Some("sk-ant-test"));
    assert_eq!(request.header("anthropic-version"), Some("2023-06-01"));
    assert_eq!(request.header("authorization"), None);

    insta::assert_json_snapshot!(request.body, @r#"
    {
      "model": "claude-3-5-sonnet-20241022",
      "max_tokens": 4096,
      "system": "be terse",
      "messages": [
        {
          "role": "user",
          "content": "Say hello in French"
        },
        {
          "role": "assistant",
          "content": "Bonjour"
        },
        {
          "role": "user",
          "content": "Again"
        }
      ]
    }
    "#);
}

#[tokio::test]
async fn absent_system_prompt_is_omitted() {
    let mut builder = TestServer::builder();
    let vendor = builder.spawn_vendor(AnthropicMock::new()).await;

    let server = builder.build("").await;

    let response = server
        .chat(json!({
            "provider": "claude",
            "apiKey": "sk-ant-test",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .await;

    assert_eq!(response.status(), 200);

    let request = vendor.single_request();

    assert!(request.body.get("system").is_none(), "{}", request.body);
    assert_eq!(request.body["max_tokens"], 4096);
}

#[tokio::test]
async fn configured_model() {
    let mut builder = TestServer::builder();
    let vendor = builder
        .spawn_vendor(AnthropicMock::new().with_model("claude-3-haiku-20240307"))
        .await;

    let server = builder.build("").await;

    let response = server
        .chat(json!({
            "provider": "claude",
            "apiKey": "sk-ant-test",
            "messages": [{"role": "user", "content": "hi"}]
        }))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(vendor.single_request().body["model"], "claude-3-haiku-20240307");
}
