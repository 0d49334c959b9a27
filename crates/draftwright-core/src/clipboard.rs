//! System clipboard access

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::ClipboardConfig;
use crate::error::{Error, Result};

/// Commands tried in order when no override is configured
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

/// Destination for "copy" actions
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Place `text` on the clipboard
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by a platform copy command
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    commands: Vec<(String, Vec<String>)>,
}

impl SystemClipboard {
    pub fn new(config: &ClipboardConfig) -> Self {
        let commands = match &config.command {
            Some(command) => vec![(command.clone(), config.args.clone())],
            None => CANDIDATES
                .iter()
                .map(|(cmd, args)| {
                    (cmd.to_string(), args.iter().map(|a| a.to_string()).collect())
                })
                .collect(),
        };
        Self { commands }
    }

    async fn pipe_into(command: &str, args: &[String], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        Ok(child.wait().await?.success())
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new(&ClipboardConfig::default())
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        for (command, args) in &self.commands {
            match Self::pipe_into(command, args, text).await {
                Ok(true) => {
                    debug!("Copied {} chars with {}", text.len(), command);
                    return Ok(());
                }
                Ok(false) => warn!("Clipboard command {} exited with failure", command),
                Err(e) => debug!("Clipboard command {} unavailable: {}", command, e),
            }
        }

        Err(Error::ClipboardFailed(
            "no working clipboard command found".to_string(),
        ))
    }
}
