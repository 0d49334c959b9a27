//! Panel state machine

use serde::{Deserialize, Serialize};

/// Where the panel is in the generate cycle
///
/// `Idle` is initial. Every accepted "generate" moves to `Loading`, which
/// resolves to `Displayed` or `Errored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading,
    Displayed,
    Errored,
}

impl WorkflowState {
    /// Whether the generate control is enabled
    pub fn can_generate(&self) -> bool {
        !matches!(self, WorkflowState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Loading => "loading",
            WorkflowState::Displayed => "displayed",
            WorkflowState::Errored => "errored",
        }
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
