//! Wire types for the messages endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::GENERIC_REMOTE_FAILURE_MESSAGE;

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Map a decoded response body to generated text or a failure.
///
/// Non-empty `content[0].text` wins; otherwise a truthy `error` becomes
/// [`Error::Remote`] with its `message`; anything else is
/// [`Error::MalformedResponse`]. `null`, `false`, `""` and `0` are not
/// errors. The text is returned untouched.
pub fn interpret_response(body: &Value) -> Result<String> {
    let text = body
        .get("content")
        .and_then(|content| content.get(0))
        .and_then(|block| block.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty());
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    match body.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(Error::MalformedResponse),
        Some(Value::String(s)) if s.is_empty() => Err(Error::MalformedResponse),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(Error::MalformedResponse),
        Some(error) => {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_REMOTE_FAILURE_MESSAGE);
            Err(Error::Remote(message.to_string()))
        }
    }
}
