//! Draftwright Core Library
//!
//! Turns rough notes into a polished email through a text-generation
//! service, then pastes the result into the active compose window or
//! copies it to the clipboard.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod generation;
pub mod host;
pub mod models;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
pub use models::*;

/// Application name for config paths
pub const APP_NAME: &str = "draftwright";
