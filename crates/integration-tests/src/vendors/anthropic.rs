use serde_json::{Value, json};

use super::{MockBehavior, TestVendor};

/// Builder for an Anthropic messages server, registered as `claude`.
#[derive(Default)]
pub struct AnthropicMock {
    behavior: MockBehavior,
}

impl AnthropicMock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestVendor for AnthropicMock {
    fn provider(&self) -> &str {
        "claude"
    }

    fn base_path(&self) -> &str {
        "/v1"
    }

    fn success_body(&self, reply: &str) -> Value {
        json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "model": self.behavior.model.as_deref().unwrap_or("mock-model"),
            "content": [{"type": "text", "text": reply}],
            "stop_reason": "end_turn",
            "stop_sequence": null,
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    }

    fn behavior(&self) -> &MockBehavior {
        &self.behavior
    }

    fn behavior_mut(&mut self) -> &mut MockBehavior {
        &mut self.behavior
    }
}
