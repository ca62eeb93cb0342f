mod claude;
mod deepseek;
mod qwen;
mod validation;

use reqwest::Response;
use serde_json::Value;

/// Status and JSON body of a relay answer.
async fn status_and_json(response: Response) -> (u16, Value) {
    let status = response.status().as_u16();

    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert_eq!(content_type, "application/json");

    (status, response.json().await.unwrap())
}
