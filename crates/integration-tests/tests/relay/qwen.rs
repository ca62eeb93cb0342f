use integration_tests::{
    TestServer,
    vendors::{OpenAIMock, TestVendor},
};
use serde_json::json;

use super::status_and_json;

#[tokio::test]
async fn compatible_mode_endpoint() {
    let mut builder = TestServer::builder();
    let vendor = builder
        .spawn_vendor(
            OpenAIMock::new("qwen")
                .with_base_path("/compatible-mode/v1")
                .with_reply("你好"),
        )
        .await;

    let server = builder.build("").await;

    let response = server
        .chat(json!({
            "provider": "qwen",
            "apiKey": "sk-dashscope",
            "messages": [{"role": "user", "content": "Say hello in Chinese"}],
            "systemPrompt": "be terse"
        }))
        .await;

    let (status, body) = status_and_json(response).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"content": "你好"}));

    let request = vendor.single_request();

    assert_eq!(request.path, "/compatible-mode/v1/chat/completions");
    assert_eq!(request.header("authorization"), Some("Bearer sk-dashscope"));

    insta::assert_json_snapshot!(request.body, @r#"
    {
      "model": "qwen-max",
      "messages": [
        {
          "role": "system",
          "content": "be terse"
        },
        {
          "role": "user",
          "content": "Say hello in Chinese"
        }
      ]
    }
    "#);
}
