//! Outcome of a generation request

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Generic message for transport-level failures
pub const CONNECT_FAILED_MESSAGE: &str =
    "Failed to connect to the API. Please check your connection and try again.";

/// Message used when the service returns an error object without a message
pub const GENERIC_REMOTE_FAILURE_MESSAGE: &str = "Failed to generate email";

/// Message used when the response has neither generated text nor an error
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected response format";

/// Result of exactly one call to the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum GenerationResult {
    /// Generated email body, verbatim from the service
    Success(String),
    /// User-facing failure reason
    Failure(String),
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success(_))
    }

    /// The generated text, if this is a success
    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationResult::Success(text) => Some(text),
            GenerationResult::Failure(_) => None,
        }
    }
}

/// User-facing reason for a failed generation
pub fn failure_reason(err: &Error) -> String {
    match err {
        Error::Remote(message) | Error::Validation(message) => message.clone(),
        Error::MalformedResponse => UNEXPECTED_FORMAT_MESSAGE.to_string(),
        Error::Network(_) | Error::Http(_) | Error::Io(_) => CONNECT_FAILED_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

impl From<Error> for GenerationResult {
    fn from(err: Error) -> Self {
        GenerationResult::Failure(failure_reason(&err))
    }
}

impl From<crate::error::Result<String>> for GenerationResult {
    fn from(result: crate::error::Result<String>) -> Self {
        match result {
            Ok(text) => GenerationResult::Success(text),
            Err(err) => err.into(),
        }
    }
}

/// The email currently on display, kept for copy and insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEmail {
    /// Body text exactly as generated
    pub text: String,

    /// When the generation resolved
    pub generated_at: DateTime<Utc>,
}

impl GeneratedEmail {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generated_at: Utc::now(),
        }
    }
}
