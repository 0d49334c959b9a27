//! Data models for Draftwright
//!
//! Tones, drafts, and generation results.

mod draft;
mod generation;
mod tone;

pub use draft::*;
pub use generation::*;
pub use tone::*;
