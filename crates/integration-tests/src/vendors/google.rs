use serde_json::{Value, json};

use super::{MockBehavior, TestVendor};

/// Builder for a Gemini `generateContent` server, registered as `gemini`.
#[derive(Default)]
pub struct GoogleMock {
    behavior: MockBehavior,
}

impl GoogleMock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestVendor for GoogleMock {
    fn provider(&self) -> &str {
        "gemini"
    }

    fn base_path(&self) -> &str {
        "/v1beta"
    }

    fn success_body(&self, reply: &str) -> Value {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": reply}]},
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        })
    }

    fn behavior(&self) -> &MockBehavior {
        &self.behavior
    }

    fn behavior_mut(&mut self) -> &mut MockBehavior {
        &mut self.behavior
    }
}
