//! Tone presets applied to generated emails

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Presentation style requested for the generated email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Formal,
    Warm,
    Concise,
    Persuasive,
    Apologetic,
    Enthusiastic,
}

impl Tone {
    /// All tones in selector order
    pub const ALL: [Tone; 6] = [
        Tone::Formal,
        Tone::Warm,
        Tone::Concise,
        Tone::Persuasive,
        Tone::Apologetic,
        Tone::Enthusiastic,
    ];

    /// Identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Warm => "warm",
            Tone::Concise => "concise",
            Tone::Persuasive => "persuasive",
            Tone::Apologetic => "apologetic",
            Tone::Enthusiastic => "enthusiastic",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Warm => "Warm",
            Tone::Concise => "Concise",
            Tone::Persuasive => "Persuasive",
            Tone::Apologetic => "Apologetic",
            Tone::Enthusiastic => "Enthusiastic",
        }
    }

    /// Short phrase describing the style
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Formal => "Professional and structured",
            Tone::Warm => "Friendly and approachable",
            Tone::Concise => "Brief and to the point",
            Tone::Persuasive => "Compelling and convincing",
            Tone::Apologetic => "Sincere and understanding",
            Tone::Enthusiastic => "Energetic and positive",
        }
    }

    /// Full line embedded in the prompt, e.g. "Formal - Professional and structured"
    pub fn prompt_phrase(&self) -> String {
        format!("{} - {}", self.label(), self.description())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tone::ALL
            .iter()
            .copied()
            .find(|tone| tone.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Tone::ALL.iter().map(|t| t.as_str()).collect();
                Error::Validation(format!(
                    "Unknown tone '{}'. Expected one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}
