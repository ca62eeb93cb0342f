use serde_json::{Value, json};

use super::{MockBehavior, TestVendor};

/// Builder for an OpenAI-compatible chat completions server.
///
/// Stands in for `openai`, `qwen` and `deepseek`, which share the wire format.
pub struct OpenAIMock {
    provider: String,
    base_path: String,
    behavior: MockBehavior,
}

impl OpenAIMock {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            base_path: "/v1".to_string(),
            behavior: MockBehavior::default(),
        }
    }

    /// Serve under a different prefix, an empty one mirrors the DeepSeek layout.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }
}

impl TestVendor for OpenAIMock {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn success_body(&self, reply: &str) -> Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": self.behavior.model.as_deref().unwrap_or("mock-model"),
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": reply},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    fn behavior(&self) -> &MockBehavior {
        &self.behavior
    }

    fn behavior_mut(&mut self) -> &mut MockBehavior {
        &mut self.behavior
    }
}
