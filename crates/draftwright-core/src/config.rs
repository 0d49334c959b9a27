//! Configuration management for Draftwright

use crate::error::{Error, Result};
use crate::models::Tone;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Generation service settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Host integration settings
    #[serde(default)]
    pub host: HostConfig,

    /// Clipboard settings
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Data directory path (logs live under `<data_dir>/logs`)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: default_data_dir(),
        }
    }
}

/// Text-generation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Messages endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Environment variable holding the API key.
    /// When the variable is unset the request goes out without credentials,
    /// which is what a gateway that injects them expects.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Value of the `anthropic-version` header sent alongside the key
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds (unset = transport default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Tone selected when the panel opens
    #[serde(default)]
    pub default_tone: Tone,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_key_env: default_api_key_env(),
            api_version: default_api_version(),
            timeout_secs: None,
            default_tone: Tone::default(),
        }
    }
}

impl GenerationConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Host integration configuration
///
/// # Examples
///
/// No host (insert always falls back to the clipboard):
/// ```toml
/// [host]
/// kind = "none"
/// ```
///
/// A plain-text compose file shared with an editor or mail client:
/// ```toml
/// [host]
/// kind = "file"
/// path = "/home/me/.cache/mail/compose.txt"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostConfig {
    /// No host application
    #[default]
    None,

    /// Compose body stored in a text file
    File {
        /// Path of the compose body file
        path: PathBuf,

        /// Reject writes (body can still be read as the original message)
        #[serde(default)]
        read_only: bool,
    },
}

/// Clipboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Command that reads text on stdin and places it on the clipboard.
    /// When unset, wl-copy, xclip, xsel, pbcopy and clip are tried in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Arguments for `command`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    get_data_dir()
}

fn default_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Get the data directory (XDG: ~/.local/share/draftwright)
fn get_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("share")
        .join(crate::APP_NAME)
}

/// Get the config directory (XDG: ~/.config/draftwright)
fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(crate::APP_NAME)
}

impl Config {
    /// Default config file location
    pub fn config_path() -> PathBuf {
        get_config_dir().join("config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            info!("No config file found at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Check values that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.generation.endpoint).map_err(|e| {
            Error::InvalidConfig {
                field: "generation.endpoint".to_string(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig {
                field: "generation.endpoint".to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        if self.generation.max_tokens == 0 {
            return Err(Error::InvalidConfig {
                field: "generation.max_tokens".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if let HostConfig::File { path, .. } = &self.host {
            if path.as_os_str().is_empty() {
                return Err(Error::InvalidConfig {
                    field: "host.path".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.general.data_dir.join("logs")
    }
}
