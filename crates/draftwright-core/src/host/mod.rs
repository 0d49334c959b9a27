//! Bridge to the email client's active compose item
//!
//! [`HostApi`] is the raw surface a host integration provides.
//! [`HostBridge`] wraps it with the availability check, the noise filter on
//! body reads, and the set-then-prepend fallback on writes.
//!
//! # Configuration
//!
//! ```toml
//! [host]
//! kind = "file"
//! path = "/home/me/.cache/mail/compose.txt"
//! ```

mod file;

pub use file::FileHost;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{Config, HostConfig};
use crate::error::{Error, Result};

/// Bodies this short (after trimming) are treated as empty placeholders
pub const MIN_ORIGINAL_BODY_CHARS: usize = 10;

/// Raw host integration surface
///
/// Implementations must be thread-safe (`Send + Sync`) so the workflow
/// controller can share them across tasks.
#[async_trait]
pub trait HostApi: Send + Sync {
    /// Whether the runtime reports the expected host application
    async fn is_expected_host(&self) -> Result<bool>;

    /// Whether an item with a writable body is open
    async fn has_compose_item(&self) -> Result<bool> {
        Ok(true)
    }

    /// Read the active body as plain text
    async fn get_body(&self) -> Result<String>;

    /// Replace the active body
    async fn set_body(&self, text: &str) -> Result<()>;

    /// Insert text at the start of the active body
    async fn prepend_body(&self, text: &str) -> Result<()>;
}

/// Host that is never present
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHost;

#[async_trait]
impl HostApi for NoHost {
    async fn is_expected_host(&self) -> Result<bool> {
        Ok(false)
    }

    async fn has_compose_item(&self) -> Result<bool> {
        Ok(false)
    }

    async fn get_body(&self) -> Result<String> {
        Err(Error::HostUnavailable)
    }

    async fn set_body(&self, _text: &str) -> Result<()> {
        Err(Error::HostUnavailable)
    }

    async fn prepend_body(&self, _text: &str) -> Result<()> {
        Err(Error::HostUnavailable)
    }
}

/// Availability-aware wrapper around a [`HostApi`]
#[derive(Clone)]
pub struct HostBridge {
    api: Arc<dyn HostApi>,
}

impl HostBridge {
    pub fn new(api: Arc<dyn HostApi>) -> Self {
        Self { api }
    }

    /// Check once whether the host is there. Errors count as "not available".
    pub async fn check_availability(&self) -> bool {
        match self.api.is_expected_host().await {
            Ok(available) => {
                info!("Host availability check: {}", available);
                available
            }
            Err(e) => {
                warn!("Host availability check failed: {}", e);
                false
            }
        }
    }

    /// Read the active body for use as the quoted original.
    ///
    /// Returns the trimmed body only when it is longer than
    /// [`MIN_ORIGINAL_BODY_CHARS`]; anything else, including failures,
    /// yields `None`.
    pub async fn read_active_body(&self) -> Option<String> {
        let body = match self.api.get_body().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not get original email: {}", e);
                return None;
            }
        };

        let trimmed = body.trim();
        let chars = trimmed.chars().count();
        if chars > MIN_ORIGINAL_BODY_CHARS {
            debug!("Read {} chars from active body", chars);
            Some(trimmed.to_string())
        } else {
            debug!("Active body too short to use as original ({} chars)", chars);
            None
        }
    }

    /// Put `text` into the compose body.
    ///
    /// Tries a full replace first, then prepends `text` followed by a blank
    /// line. Neither step is retried. A failure to inspect the compose item
    /// is returned as-is, distinct from [`Error::NotComposing`].
    pub async fn write_active_body(&self, text: &str) -> Result<()> {
        match self.api.has_compose_item().await {
            Ok(true) => {}
            Ok(false) => return Err(Error::NotComposing),
            Err(e) => {
                warn!("Could not inspect compose item: {}", e);
                return Err(e);
            }
        }

        let set_err = match self.api.set_body(text).await {
            Ok(()) => {
                info!("Replaced compose body ({} chars)", text.chars().count());
                return Ok(());
            }
            Err(e) => e,
        };
        warn!("Setting compose body failed, trying prepend: {}", set_err);

        let prepended = format!("{}\n\n", text);
        match self.api.prepend_body(&prepended).await {
            Ok(()) => {
                info!("Prepended to compose body ({} chars)", text.chars().count());
                Ok(())
            }
            Err(prepend_err) => {
                warn!("Prepending to compose body failed: {}", prepend_err);
                Err(Error::InsertFailed(format!(
                    "set failed ({}); prepend failed ({})",
                    set_err, prepend_err
                )))
            }
        }
    }
}

/// Create a host integration based on configuration
pub fn create_host(config: &Config) -> Arc<dyn HostApi> {
    match &config.host {
        HostConfig::None => Arc::new(NoHost),
        HostConfig::File { path, read_only } => {
            Arc::new(FileHost::new(path.clone()).read_only(*read_only))
        }
    }
}
