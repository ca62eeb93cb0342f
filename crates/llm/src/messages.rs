use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{error::RelayError, provider::ProviderId};

/// Provider-agnostic chat request accepted by the relay.
///
/// Fields are held as raw JSON so that a value of an unexpected type is judged by [`ChatRequest::validate`]
/// instead of failing the parse. Only a body that is not a JSON object is a parser error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatRequest {
    provider: Option<Value>,
    api_key: Option<Value>,
    messages: Option<Value>,
    system_prompt: Option<Value>,
}

impl fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRequest")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("messages", &self.messages)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

/// A chat request ready for a vendor call.
#[derive(Debug)]
pub(crate) struct DispatchRequest {
    pub(crate) provider: ProviderId,
    pub(crate) api_key: SecretString,
    pub(crate) messages: Vec<ChatMessage>,
    pub(crate) system_prompt: Option<Value>,
}

impl ChatRequest {
    /// Checks the envelope, in this order:
    ///
    /// 1. `provider`, `apiKey` and `messages` must all be supplied (see [`supplied`]), otherwise
    ///    [`RelayError::MissingFields`], whatever the other fields hold.
    /// 2. `provider` must be one of the known tags, otherwise [`RelayError::UnknownProvider`].
    /// 3. `messages` must be an array. Its elements are not inspected.
    pub(crate) fn validate(self) -> crate::Result<DispatchRequest> {
        let (Some(provider), Some(api_key), Some(messages)) =
            (supplied(self.provider), supplied(self.api_key), supplied(self.messages))
        else {
            return Err(RelayError::MissingFields);
        };

        let provider: ProviderId = match provider {
            Value::String(tag) => tag.parse()?,
            other => return Err(RelayError::UnknownProvider(other.to_string())),
        };

        let Value::Array(messages) = messages else {
            return Err(RelayError::InvalidJson("messages must be an array".to_string()));
        };

        Ok(DispatchRequest {
            provider,
            api_key: SecretString::from(key_text(api_key)),
            messages: messages.into_iter().map(ChatMessage).collect(),
            system_prompt: self.system_prompt,
        })
    }
}

/// Keeps a field only if it counts as supplied.
///
/// Absent, `null`, `false`, `0`, `""` and `[]` do not.
fn supplied(value: Option<Value>) -> Option<Value> {
    value.filter(|value| match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    })
}

/// The key as it is put into a header or query string. Non-string keys are sent as their JSON text.
fn key_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// One conversation turn, forwarded exactly as the caller sent it.
///
/// Nothing is checked: an element may be any JSON value, and vendors reject what they do not understand.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub(crate) struct ChatMessage(Value);

impl ChatMessage {
    /// A system turn carrying the system prompt, `content` left out when there is none.
    pub(crate) fn system(prompt: Option<Value>) -> Self {
        let mut message = json!({"role": "system"});

        if let Some(prompt) = prompt {
            message["content"] = prompt;
        }

        Self(message)
    }

    pub(crate) fn is_assistant(&self) -> bool {
        self.0.get("role").and_then(Value::as_str) == Some("assistant")
    }

    /// The `content` member, `None` when the turn is not an object or has none.
    pub(crate) fn content(&self) -> Option<&Value> {
        self.0.get("content")
    }
}

/// The only shape returned to the caller on success.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub(crate) struct ChatReply {
    pub(crate) content: String,
}
