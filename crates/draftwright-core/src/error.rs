//! Error types for Draftwright

use thiserror::Error;

/// Result type alias using Draftwright's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Draftwright
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    #[error("{0}")]
    Validation(String),

    // Generation errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Remote(String),

    #[error("Unexpected response format")]
    MalformedResponse,

    // Host integration errors
    #[error("Host application not available")]
    HostUnavailable,

    #[error("No compose item is open in the host")]
    NotComposing,

    #[error("Could not insert email: {0}")]
    InsertFailed(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardFailed(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns a stable error code for logs and machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Network(_) | Error::Http(_) => "NETWORK_ERROR",
            Error::Remote(_) => "REMOTE_ERROR",
            Error::MalformedResponse => "MALFORMED_RESPONSE",
            Error::HostUnavailable => "HOST_UNAVAILABLE",
            Error::NotComposing => "NOT_COMPOSING",
            Error::InsertFailed(_) => "INSERT_FAILED",
            Error::ClipboardFailed(_) => "CLIPBOARD_FAILED",
            Error::Config(_) | Error::InvalidConfig { .. } | Error::TomlParse(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Returns a user-friendly action message for recoverable errors
    pub fn action_hint(&self) -> Option<&'static str> {
        match self {
            Error::Network(_) | Error::Http(_) => Some("Check your network connection"),
            Error::InsertFailed(_) | Error::NotComposing => {
                Some("Paste the email manually from the clipboard")
            }
            Error::ClipboardFailed(_) => {
                Some("Install wl-copy, xclip or xsel, or set [clipboard] command in config.toml")
            }
            Error::InvalidConfig { .. } | Error::TomlParse(_) => {
                Some("Run `draftwright config show` to inspect the active settings")
            }
            _ => None,
        }
    }
}
