use integration_tests::{
    TestServer,
    vendors::{OpenAIMock, TestVendor},
};
use serde_json::json;

use super::status_and_json;

#[tokio::test]
async fn endpoint_without_version_prefix() {
    let mut builder = TestServer::builder();
    let vendor = builder
        .spawn_vendor(OpenAIMock::new("deepseek").with_base_path("").with_reply("ok"))
        .await;

    let server = builder.build("").await;

    let response = server
        .chat(json!({
            "provider": "deepseek",
            "apiKey": "sk-deepseek",
            "messages": [{"role": "user", "content": "ping"}],
            "systemPrompt": "be terse"
        }))
        .await;

    let (status, body) = status_and_json(response).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"content": "ok"}));

    let request = vendor.single_request();

    assert_eq!(request.path, "/chat/completions");
    assert_eq!(request.header("authorization"), Some("Bearer sk-deepseek"));
    assert_eq!(request.body["model"], "deepseek-chat");
    assert_eq!(request.body["messages"][0], json!({"role": "system", "content": "be terse"}));
}

#[tokio::test]
async fn only_the_selected_vendor_is_called() {
    let mut builder = TestServer::builder();
    let deepseek = builder.spawn_vendor(OpenAIMock::new("deepseek").with_base_path("")).await;
    let openai = builder.spawn_vendor(OpenAIMock::new("openai")).await;
    let qwen = builder.spawn_vendor(OpenAIMock::new("qwen")).await;

    let server = builder.build("").await;

    let response = server
        .chat(json!({
            "provider": "deepseek",
            "apiKey": "sk-deepseek",
            "messages": [{"role": "user", "content": "ping"}]
        }))
        .await;

    assert_eq!(response.status(), 200);

    assert_eq!(deepseek.requests().len(), 1);
    assert!(openai.requests().is_empty());
    assert!(qwen.requests().is_empty());
}
