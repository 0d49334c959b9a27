//! Presentation contract
//!
//! The controller never touches widgets directly. It calls a [`Presenter`],
//! and [`ChannelPresenter`] turns those calls into [`WorkflowEvent`]s for
//! anything that prefers to subscribe.

use tokio::sync::mpsc;
use tracing::debug;

use super::WorkflowState;
use crate::models::Tone;

/// Sink for everything the controller wants shown
pub trait Presenter: Send + Sync {
    /// Panel moved to a new state
    fn render_state(&self, state: WorkflowState);

    /// A freshly generated email
    fn render_output(&self, text: &str);

    /// Transient, dismissable error message
    fn render_error(&self, message: &str);

    /// Transient success message
    fn render_success(&self, message: &str);

    /// Original message was pre-filled from the host
    fn render_original(&self, _text: &str) {}

    /// The original-message section was opened or closed
    fn render_original_section(&self, _open: bool) {}

    /// A tone was selected
    fn render_tone(&self, _tone: Tone) {}
}

/// Everything a [`Presenter`] can be told, as a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    StateChanged(WorkflowState),
    OutputReady(String),
    Error(String),
    Success(String),
    OriginalLoaded(String),
    OriginalSectionToggled(bool),
    ToneSelected(Tone),
}

/// Presenter that forwards every call over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: mpsc::UnboundedSender<WorkflowEvent>,
}

impl ChannelPresenter {
    /// Create a presenter and the receiving end of its event stream
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<WorkflowEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn emit(&self, event: WorkflowEvent) {
        if self.tx.send(event).is_err() {
            debug!("Workflow event dropped, no subscriber");
        }
    }
}

impl Presenter for ChannelPresenter {
    fn render_state(&self, state: WorkflowState) {
        self.emit(WorkflowEvent::StateChanged(state));
    }

    fn render_output(&self, text: &str) {
        self.emit(WorkflowEvent::OutputReady(text.to_string()));
    }

    fn render_error(&self, message: &str) {
        self.emit(WorkflowEvent::Error(message.to_string()));
    }

    fn render_success(&self, message: &str) {
        self.emit(WorkflowEvent::Success(message.to_string()));
    }

    fn render_original(&self, text: &str) {
        self.emit(WorkflowEvent::OriginalLoaded(text.to_string()));
    }

    fn render_original_section(&self, open: bool) {
        self.emit(WorkflowEvent::OriginalSectionToggled(open));
    }

    fn render_tone(&self, tone: Tone) {
        self.emit(WorkflowEvent::ToneSelected(tone));
    }
}
