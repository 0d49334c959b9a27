//! File-backed host
//!
//! Treats a plain-text file as the compose window. Any editor or mail
//! client that watches the file picks up inserted emails.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{Error, Result};

use super::HostApi;

/// Compose body stored in a text file
pub struct FileHost {
    path: PathBuf,
    read_only: bool,
}

impl FileHost {
    /// Create a host for the given compose file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: false,
        }
    }

    /// Reject all writes
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("{} is read-only", self.path.display()),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl HostApi for FileHost {
    async fn is_expected_host(&self) -> Result<bool> {
        let dir_exists = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                tokio::fs::metadata(parent).await.map(|m| m.is_dir()).unwrap_or(false)
            }
            _ => true,
        };
        debug!("File host {:?} present: {}", self.path, dir_exists);
        Ok(dir_exists)
    }

    async fn has_compose_item(&self) -> Result<bool> {
        Ok(tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false))
    }

    async fn get_body(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    async fn set_body(&self, text: &str) -> Result<()> {
        self.check_writable()?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }

    async fn prepend_body(&self, text: &str) -> Result<()> {
        self.check_writable()?;
        let existing = tokio::fs::read_to_string(&self.path).await?;
        tokio::fs::write(&self.path, format!("{}{}", text, existing)).await?;
        Ok(())
    }
}
