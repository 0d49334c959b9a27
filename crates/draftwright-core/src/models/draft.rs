//! User input bundle for one generation attempt

use serde::{Deserialize, Serialize};

use super::Tone;
use crate::error::{Error, Result};

/// Message shown when generation is attempted without any notes
pub const MISSING_INPUT_MESSAGE: &str = "Please enter your thoughts first";

/// Notes, optional quoted message, and tone for a single generation
///
/// Built from the current field values at the moment "generate" fires and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Free-form notes to turn into an email (trimmed, never empty)
    pub raw_thoughts: String,

    /// Message being replied to, if any (trimmed, never empty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_email: Option<String>,

    /// Requested tone
    pub tone: Tone,
}

impl Draft {
    /// Build a draft from raw field values.
    ///
    /// Both text fields are trimmed. Empty or whitespace-only thoughts are
    /// rejected with [`Error::Validation`]; an empty original message is
    /// treated as absent.
    pub fn from_input(raw_thoughts: &str, original_email: Option<&str>, tone: Tone) -> Result<Self> {
        let raw_thoughts = raw_thoughts.trim();
        if raw_thoughts.is_empty() {
            return Err(Error::Validation(MISSING_INPUT_MESSAGE.to_string()));
        }

        let original_email = original_email
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        Ok(Self {
            raw_thoughts: raw_thoughts.to_string(),
            original_email,
            tone,
        })
    }

    /// Whether this draft is a reply to a quoted message
    pub fn is_reply(&self) -> bool {
        self.original_email.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_thoughts_rejected() {
        for input in ["", "   ", "\n\t  \n"] {
            let err = Draft::from_input(input, Some("Original message here"), Tone::Warm).unwrap_err();
            assert!(matches!(err, Error::Validation(ref m) if m == MISSING_INPUT_MESSAGE));
        }
    }

    #[test]
    fn test_fields_are_trimmed() {
        let draft = Draft::from_input("  ship it friday \n", Some("   "), Tone::Concise).unwrap();
        assert_eq!(draft.raw_thoughts, "ship it friday");
        assert_eq!(draft.original_email, None);
        assert!(!draft.is_reply());

        let draft = Draft::from_input("yes", Some("\n Can you join? \n"), Tone::Formal).unwrap();
        assert_eq!(draft.original_email.as_deref(), Some("Can you join?"));
        assert!(draft.is_reply());
    }
}
