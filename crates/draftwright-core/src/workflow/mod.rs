//! Workflow controller
//!
//! Owns the panel's state (fields, selected tone, current email) and drives
//! the generate / copy / insert actions against the generator, the host
//! bridge and the clipboard. All rendering goes through a [`Presenter`].
//!
//! Overlapping generations are not cancelled: whichever resolves last
//! decides the final state and the current email.

mod events;
mod state;

pub use events::*;
pub use state::*;

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::error::{Error, Result};
use crate::generation::Generator;
use crate::host::HostBridge;
use crate::models::{failure_reason, Draft, GeneratedEmail, Tone};

pub const COPIED_MESSAGE: &str = "Copied to clipboard!";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";
pub const NOTHING_TO_COPY_MESSAGE: &str = "Nothing to copy yet";
pub const INSERTED_MESSAGE: &str = "Email inserted successfully!";
pub const HOST_UNAVAILABLE_MESSAGE: &str = "Host not available - copied to clipboard instead";
pub const INSERT_FAILED_MESSAGE: &str = "Could not insert email. Please copy and paste manually.";
pub const NOT_COMPOSING_MESSAGE: &str = "Copied! Open a new email to paste.";
pub const INSERT_ERROR_COPIED_MESSAGE: &str = "Copied to clipboard - please paste into your email.";

/// How an insert action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Written into the compose body
    Inserted,
    /// Host was never available; copied instead
    CopiedHostUnavailable,
    /// Host present but nothing being composed; copied instead
    CopiedNotComposing,
    /// Both write paths failed; copied instead
    CopiedAfterInsertFailed,
}

#[derive(Debug, Default)]
struct Panel {
    state: WorkflowState,
    thoughts: String,
    original_email: String,
    original_open: bool,
    tone: Tone,
    current: Option<GeneratedEmail>,
    in_flight: usize,
}

/// Single controller instance for the lifetime of the panel
pub struct WorkflowController {
    generator: Arc<dyn Generator>,
    host: HostBridge,
    clipboard: Arc<dyn Clipboard>,
    presenter: Arc<dyn Presenter>,
    host_available: bool,
    panel: Mutex<Panel>,
}

impl WorkflowController {
    /// Build the controller and run startup: check the host once and, when
    /// it is there, pre-fill the original message from the active body.
    pub async fn start(
        generator: Arc<dyn Generator>,
        host: HostBridge,
        clipboard: Arc<dyn Clipboard>,
        presenter: Arc<dyn Presenter>,
        tone: Tone,
    ) -> Self {
        let host_available = host.check_availability().await;

        let original = if host_available {
            host.read_active_body().await
        } else {
            None
        };

        let panel = Panel {
            tone,
            original_open: original.is_some(),
            original_email: original.clone().unwrap_or_default(),
            ..Panel::default()
        };

        let controller = Self {
            generator,
            host,
            clipboard,
            presenter,
            host_available,
            panel: Mutex::new(panel),
        };

        controller.presenter.render_state(WorkflowState::Idle);
        controller.presenter.render_tone(tone);
        if let Some(original) = original {
            info!("Pre-filled original email from host ({} chars)", original.len());
            controller.presenter.render_original(&original);
            controller.presenter.render_original_section(true);
        }

        controller
    }

    pub fn host_available(&self) -> bool {
        self.host_available
    }

    pub fn state(&self) -> WorkflowState {
        self.panel.lock().state
    }

    pub fn tone(&self) -> Tone {
        self.panel.lock().tone
    }

    pub fn original_email(&self) -> String {
        self.panel.lock().original_email.clone()
    }

    pub fn is_original_open(&self) -> bool {
        self.panel.lock().original_open
    }

    /// The email that copy and insert act on
    pub fn current_email(&self) -> Option<GeneratedEmail> {
        self.panel.lock().current.clone()
    }

    /// Number of generations still waiting for a response
    pub fn in_flight(&self) -> usize {
        self.panel.lock().in_flight
    }

    pub fn set_thoughts(&self, thoughts: impl Into<String>) {
        self.panel.lock().thoughts = thoughts.into();
    }

    pub fn set_original_email(&self, original: impl Into<String>) {
        self.panel.lock().original_email = original.into();
    }

    pub fn select_tone(&self, tone: Tone) {
        self.panel.lock().tone = tone;
        debug!("Tone selected: {}", tone);
        self.presenter.render_tone(tone);
    }

    /// Open or close the original-message section; returns the new state
    pub fn toggle_original_section(&self) -> bool {
        let open = {
            let mut panel = self.panel.lock();
            panel.original_open = !panel.original_open;
            panel.original_open
        };
        self.presenter.render_original_section(open);
        open
    }

    /// Run one generation from the current field values.
    ///
    /// Empty or whitespace-only thoughts fail with [`Error::Validation`]
    /// before any request and leave the state untouched.
    pub async fn generate(&self) -> Result<String> {
        let draft = {
            let mut panel = self.panel.lock();
            let draft =
                Draft::from_input(&panel.thoughts, Some(panel.original_email.as_str()), panel.tone);
            if draft.is_ok() {
                panel.state = WorkflowState::Loading;
                panel.in_flight += 1;
            }
            draft
        };
        let draft = match draft {
            Ok(draft) => draft,
            Err(e) => {
                debug!("Generate blocked: {}", e);
                self.presenter.render_error(&failure_reason(&e));
                return Err(e);
            }
        };

        self.presenter.render_state(WorkflowState::Loading);

        let outcome = self.generator.generate_email(&draft).await;

        let state = {
            let mut panel = self.panel.lock();
            panel.in_flight = panel.in_flight.saturating_sub(1);
            let next = match &outcome {
                Ok(text) => {
                    panel.current = Some(GeneratedEmail::new(text.clone()));
                    WorkflowState::Displayed
                }
                Err(_) => WorkflowState::Errored,
            };
            panel.state = next;
            next
        };

        self.presenter.render_state(state);
        match &outcome {
            Ok(text) => self.presenter.render_output(text),
            Err(e) => {
                warn!("Generation failed [{}]: {}", e.code(), e);
                self.presenter.render_error(&failure_reason(e));
            }
        }

        outcome
    }

    /// Copy the current email to the clipboard
    pub async fn copy(&self) -> Result<()> {
        let text = self.actionable_text()?;
        self.copy_text(&text).await?;
        self.presenter.render_success(COPIED_MESSAGE);
        Ok(())
    }

    /// Insert the current email into the compose body, copying it to the
    /// clipboard whenever insertion is not possible.
    pub async fn insert(&self) -> Result<InsertOutcome> {
        let text = self.actionable_text()?;

        if !self.host_available {
            self.copy_text(&text).await?;
            self.presenter.render_success(HOST_UNAVAILABLE_MESSAGE);
            return Ok(InsertOutcome::CopiedHostUnavailable);
        }

        match self.host.write_active_body(&text).await {
            Ok(()) => {
                self.presenter.render_success(INSERTED_MESSAGE);
                Ok(InsertOutcome::Inserted)
            }
            Err(Error::NotComposing) => {
                self.copy_text(&text).await?;
                self.presenter.render_success(NOT_COMPOSING_MESSAGE);
                Ok(InsertOutcome::CopiedNotComposing)
            }
            Err(Error::InsertFailed(reason)) => {
                warn!("Insert failed, falling back to clipboard: {}", reason);
                self.presenter.render_error(INSERT_FAILED_MESSAGE);
                self.copy_text(&text).await?;
                self.presenter.render_success(COPIED_MESSAGE);
                Ok(InsertOutcome::CopiedAfterInsertFailed)
            }
            Err(e) => {
                warn!("Insert error, falling back to clipboard: {}", e);
                self.copy_text(&text).await?;
                self.presenter.render_success(INSERT_ERROR_COPIED_MESSAGE);
                Ok(InsertOutcome::CopiedAfterInsertFailed)
            }
        }
    }

    /// Text for copy/insert: the latest email, unless a generation is running
    fn actionable_text(&self) -> Result<String> {
        let text = {
            let panel = self.panel.lock();
            match (&panel.current, panel.state) {
                (_, WorkflowState::Loading) | (None, _) => None,
                (Some(email), _) => Some(email.text.clone()),
            }
        };
        text.ok_or_else(|| {
            self.presenter.render_error(NOTHING_TO_COPY_MESSAGE);
            Error::Validation(NOTHING_TO_COPY_MESSAGE.to_string())
        })
    }

    async fn copy_text(&self, text: &str) -> Result<()> {
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                debug!("Copied {} chars to clipboard", text.len());
                Ok(())
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                self.presenter.render_error(COPY_FAILED_MESSAGE);
                Err(match e {
                    Error::ClipboardFailed(reason) => Error::ClipboardFailed(reason),
                    other => Error::ClipboardFailed(other.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::FakeHost;
    use crate::host::NoHost;
    use crate::models::{CONNECT_FAILED_MESSAGE, MISSING_INPUT_MESSAGE};
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{mpsc, oneshot};

    #[derive(Default)]
    struct FakeGenerator {
        scripted: Mutex<VecDeque<Result<String>>>,
        gates: Mutex<HashMap<String, oneshot::Receiver<Result<String>>>>,
        started: Option<mpsc::UnboundedSender<String>>,
        calls: AtomicUsize,
        last_draft: Mutex<Option<Draft>>,
    }

    impl FakeGenerator {
        fn returning(results: Vec<Result<String>>) -> Self {
            Self {
                scripted: Mutex::new(results.into()),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl Generator for FakeGenerator {
        async fn generate_email(&self, draft: &Draft) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_draft.lock() = Some(draft.clone());
            if let Some(started) = &self.started {
                let _ = started.send(draft.raw_thoughts.clone());
            }
            let gate = self.gates.lock().remove(&draft.raw_thoughts);
            if let Some(gate) = gate {
                return gate
                    .await
                    .unwrap_or_else(|_| Err(Error::Network("gate dropped".into())));
            }
            self.scripted
                .lock()
                .pop_front()
                .unwrap_or(Err(Error::MalformedResponse))
        }
    }

    #[derive(Default)]
    struct FakeClipboard {
        fail: bool,
        writes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::ClipboardFailed("denied".into()));
            }
            self.writes.lock().push(text.to_string());
            Ok(())
        }
    }

    struct Harness {
        controller: Arc<WorkflowController>,
        events: mpsc::UnboundedReceiver<WorkflowEvent>,
        generator: Arc<FakeGenerator>,
        clipboard: Arc<FakeClipboard>,
    }

    impl Harness {
        async fn new(
            host: Arc<dyn crate::host::HostApi>,
            generator: FakeGenerator,
            clipboard: FakeClipboard,
        ) -> Self {
            let generator = Arc::new(generator);
            let clipboard = Arc::new(clipboard);
            let (presenter, events) = ChannelPresenter::channel();
            let controller = WorkflowController::start(
                generator.clone(),
                HostBridge::new(host),
                clipboard.clone(),
                Arc::new(presenter),
                Tone::Formal,
            )
            .await;
            Self {
                controller: Arc::new(controller),
                events,
                generator,
                clipboard,
            }
        }

        fn drain(&mut self) -> Vec<WorkflowEvent> {
            let mut out = Vec::new();
            while let Ok(event) = self.events.try_recv() {
                out.push(event);
            }
            out
        }

        async fn displayed(&mut self, text: &str) {
            self.controller.set_thoughts("some notes");
            self.generator.scripted.lock().push_back(Ok(text.to_string()));
            self.controller.generate().await.unwrap();
            self.drain();
        }
    }

    const EMAIL: &str = "Hi,\n\nDone.\n\nBest";

    #[tokio::test]
    async fn test_startup_prefills_long_original() {
        let host = Arc::new(FakeHost::present_with_body("  Are we still on for Thursday?  "));
        let mut h = Harness::new(host, FakeGenerator::default(), FakeClipboard::default()).await;

        assert!(h.controller.host_available());
        assert_eq!(h.controller.original_email(), "Are we still on for Thursday?");
        assert!(h.controller.is_original_open());
        assert_eq!(
            h.drain(),
            vec![
                WorkflowEvent::StateChanged(WorkflowState::Idle),
                WorkflowEvent::ToneSelected(Tone::Formal),
                WorkflowEvent::OriginalLoaded("Are we still on for Thursday?".into()),
                WorkflowEvent::OriginalSectionToggled(true),
            ]
        );
    }

    #[tokio::test]
    async fn test_startup_ignores_short_original() {
        let host = Arc::new(FakeHost::present_with_body("Thanks!"));
        let mut h = Harness::new(host, FakeGenerator::default(), FakeClipboard::default()).await;

        assert!(h.controller.host_available());
        assert_eq!(h.controller.original_email(), "");
        assert!(!h.controller.is_original_open());
        assert!(!h
            .drain()
            .iter()
            .any(|e| matches!(e, WorkflowEvent::OriginalLoaded(_))));
    }

    #[tokio::test]
    async fn test_unavailable_host_is_not_read() {
        let host = Arc::new(FakeHost {
            present: false,
            ..FakeHost::present_with_body("A perfectly long original email body")
        });
        let h = Harness::new(host.clone(), FakeGenerator::default(), FakeClipboard::default()).await;
        assert!(!h.controller.host_available());
        assert_eq!(h.controller.original_email(), "");
        assert!(host.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_blank_thoughts_never_reach_generator() {
        let mut h = Harness::new(Arc::new(NoHost), FakeGenerator::default(), FakeClipboard::default()).await;
        h.drain();

        for thoughts in ["", "   ", "\n\t"] {
            h.controller.set_thoughts(thoughts);
            h.controller.set_original_email("A long enough original message");
            let err = h.controller.generate().await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
            assert_eq!(h.controller.state(), WorkflowState::Idle);
            assert_eq!(h.drain(), vec![WorkflowEvent::Error(MISSING_INPUT_MESSAGE.into())]);
        }
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let mut h = Harness::new(
            Arc::new(NoHost),
            FakeGenerator::returning(vec![Ok(EMAIL.to_string())]),
            FakeClipboard::default(),
        )
        .await;
        h.drain();

        h.controller.select_tone(Tone::Warm);
        h.controller.set_thoughts("  thank sam for the intro  ");
        assert_eq!(h.controller.generate().await.unwrap(), EMAIL);

        assert_eq!(h.controller.state(), WorkflowState::Displayed);
        assert_eq!(h.controller.current_email().unwrap().text, EMAIL);
        assert_eq!(h.controller.in_flight(), 0);

        let draft = h.generator.last_draft.lock().clone().unwrap();
        assert_eq!(draft.raw_thoughts, "thank sam for the intro");
        assert_eq!(draft.tone, Tone::Warm);
        assert_eq!(draft.original_email, None);

        assert_eq!(
            h.drain(),
            vec![
                WorkflowEvent::ToneSelected(Tone::Warm),
                WorkflowEvent::StateChanged(WorkflowState::Loading),
                WorkflowEvent::StateChanged(WorkflowState::Displayed),
                WorkflowEvent::OutputReady(EMAIL.into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_email() {
        let mut h = Harness::new(Arc::new(NoHost), FakeGenerator::default(), FakeClipboard::default()).await;
        h.displayed(EMAIL).await;

        h.generator
            .scripted
            .lock()
            .push_back(Err(Error::Network("connection refused".into())));
        let err = h.controller.generate().await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));

        assert_eq!(h.controller.state(), WorkflowState::Errored);
        assert_eq!(h.controller.current_email().unwrap().text, EMAIL);
        assert_eq!(
            h.drain(),
            vec![
                WorkflowEvent::StateChanged(WorkflowState::Loading),
                WorkflowEvent::StateChanged(WorkflowState::Errored),
                WorkflowEvent::Error(CONNECT_FAILED_MESSAGE.into()),
            ]
        );

        // still copyable after the failure
        h.controller.copy().await.unwrap();
        assert_eq!(*h.clipboard.writes.lock(), vec![EMAIL.to_string()]);
    }

    #[tokio::test]
    async fn test_remote_error_reason_is_shown() {
        let mut h = Harness::new(
            Arc::new(NoHost),
            FakeGenerator::returning(vec![Err(Error::Remote("rate limited".into()))]),
            FakeClipboard::default(),
        )
        .await;
        h.drain();

        h.controller.set_thoughts("notes");
        assert!(h.controller.generate().await.is_err());
        assert!(h.drain().contains(&WorkflowEvent::Error("rate limited".into())));
        assert!(h.controller.state().can_generate());
    }

    #[tokio::test]
    async fn test_copy_before_any_email() {
        let mut h = Harness::new(Arc::new(NoHost), FakeGenerator::default(), FakeClipboard::default()).await;
        h.drain();

        assert!(h.controller.copy().await.is_err());
        assert!(h.controller.insert().await.is_err());
        assert!(h.clipboard.writes.lock().is_empty());
        assert_eq!(
            h.drain(),
            vec![
                WorkflowEvent::Error(NOTHING_TO_COPY_MESSAGE.into()),
                WorkflowEvent::Error(NOTHING_TO_COPY_MESSAGE.into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_copy_failure_keeps_state() {
        let mut h = Harness::new(
            Arc::new(NoHost),
            FakeGenerator::default(),
            FakeClipboard {
                fail: true,
                ..Default::default()
            },
        )
        .await;
        h.displayed(EMAIL).await;

        let err = h.controller.copy().await.unwrap_err();
        assert!(matches!(err, Error::ClipboardFailed(_)));
        assert_eq!(h.controller.state(), WorkflowState::Displayed);
        assert_eq!(h.drain(), vec![WorkflowEvent::Error(COPY_FAILED_MESSAGE.into())]);
    }

    #[tokio::test]
    async fn test_insert_without_host_copies() {
        let mut h = Harness::new(Arc::new(NoHost), FakeGenerator::default(), FakeClipboard::default()).await;
        h.displayed(EMAIL).await;

        let outcome = h.controller.insert().await.unwrap();
        assert_eq!(outcome, InsertOutcome::CopiedHostUnavailable);
        assert_eq!(*h.clipboard.writes.lock(), vec![EMAIL.to_string()]);
        assert_eq!(h.drain(), vec![WorkflowEvent::Success(HOST_UNAVAILABLE_MESSAGE.into())]);
        assert_eq!(h.controller.state(), WorkflowState::Displayed);
    }

    #[tokio::test]
    async fn test_insert_into_host() {
        let host = Arc::new(FakeHost::present_with_body("short"));
        let mut h = Harness::new(host.clone(), FakeGenerator::default(), FakeClipboard::default()).await;
        h.displayed(EMAIL).await;

        assert_eq!(h.controller.insert().await.unwrap(), InsertOutcome::Inserted);
        assert_eq!(host.body().as_deref(), Some(EMAIL));
        assert!(h.clipboard.writes.lock().is_empty());
        assert_eq!(h.drain(), vec![WorkflowEvent::Success(INSERTED_MESSAGE.into())]);
    }

    #[tokio::test]
    async fn test_insert_prepend_fallback_is_success() {
        let host = Arc::new(FakeHost {
            fail_set: true,
            ..FakeHost::present_with_body("> quoted")
        });
        let mut h = Harness::new(host.clone(), FakeGenerator::default(), FakeClipboard::default()).await;
        h.displayed(EMAIL).await;

        assert_eq!(h.controller.insert().await.unwrap(), InsertOutcome::Inserted);
        assert_eq!(host.body(), Some(format!("{}\n\n> quoted", EMAIL)));
        assert_eq!(h.drain(), vec![WorkflowEvent::Success(INSERTED_MESSAGE.into())]);
    }

    #[tokio::test]
    async fn test_insert_failure_falls_back_to_clipboard() {
        let host = Arc::new(FakeHost {
            fail_set: true,
            fail_prepend: true,
            ..FakeHost::present_with_body("> quoted")
        });
        let mut h = Harness::new(host, FakeGenerator::default(), FakeClipboard::default()).await;
        h.displayed(EMAIL).await;

        assert_eq!(
            h.controller.insert().await.unwrap(),
            InsertOutcome::CopiedAfterInsertFailed
        );
        assert_eq!(*h.clipboard.writes.lock(), vec![EMAIL.to_string()]);
        assert_eq!(
            h.drain(),
            vec![
                WorkflowEvent::Error(INSERT_FAILED_MESSAGE.into()),
                WorkflowEvent::Success(COPIED_MESSAGE.into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_without_host_and_clipboard_fails() {
        let clipboard = FakeClipboard {
            fail: true,
            ..Default::default()
        };
        let mut h = Harness::new(Arc::new(NoHost), FakeGenerator::default(), clipboard).await;
        h.displayed(EMAIL).await;

        let err = h.controller.insert().await.unwrap_err();
        assert!(matches!(err, Error::ClipboardFailed(_)));
        assert_eq!(h.drain(), vec![WorkflowEvent::Error(COPY_FAILED_MESSAGE.into())]);
        assert_eq!(h.controller.state(), WorkflowState::Displayed);
        assert_eq!(h.controller.current_email().map(|e| e.text).as_deref(), Some(EMAIL));
    }

    #[tokio::test]
    async fn test_insert_compose_lookup_error_copies() {
        let host = Arc::new(FakeHost {
            compose_error: true,
            ..FakeHost::present_with_body("> quoted")
        });
        let mut h = Harness::new(host.clone(), FakeGenerator::default(), FakeClipboard::default()).await;
        h.displayed(EMAIL).await;

        assert_eq!(
            h.controller.insert().await.unwrap(),
            InsertOutcome::CopiedAfterInsertFailed
        );
        assert_eq!(*h.clipboard.writes.lock(), vec![EMAIL.to_string()]);
        assert_eq!(host.body().as_deref(), Some("> quoted"));
        assert_eq!(
            h.drain(),
            vec![WorkflowEvent::Success(INSERT_ERROR_COPIED_MESSAGE.into())]
        );
    }

    #[tokio::test]
    async fn test_insert_when_not_composing() {
        let host = Arc::new(FakeHost {
            no_compose: true,
            ..FakeHost::present_with_body("reading pane")
        });
        let mut h = Harness::new(host, FakeGenerator::default(), FakeClipboard::default()).await;
        h.displayed(EMAIL).await;

        assert_eq!(h.controller.insert().await.unwrap(), InsertOutcome::CopiedNotComposing);
        assert_eq!(h.drain(), vec![WorkflowEvent::Success(NOT_COMPOSING_MESSAGE.into())]);
    }

    #[tokio::test]
    async fn test_original_toggle_and_reply_draft() {
        let mut h = Harness::new(
            Arc::new(NoHost),
            FakeGenerator::returning(vec![Ok(EMAIL.to_string())]),
            FakeClipboard::default(),
        )
        .await;
        h.drain();

        assert!(h.controller.toggle_original_section());
        assert!(!h.controller.toggle_original_section());
        h.controller.set_original_email("  Could you review the contract?  ");
        h.controller.set_thoughts("yes by monday");
        h.controller.generate().await.unwrap();

        let draft = h.generator.last_draft.lock().clone().unwrap();
        assert_eq!(draft.original_email.as_deref(), Some("Could you review the contract?"));
        assert_eq!(
            h.drain()[..2],
            [
                WorkflowEvent::OriginalSectionToggled(true),
                WorkflowEvent::OriginalSectionToggled(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_last_resolved_generation_wins() {
        let (started_tx, mut started_rx) = mpsc::unbounded_channel();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let generator = FakeGenerator {
            started: Some(started_tx),
            ..Default::default()
        };
        generator.gates.lock().insert("first".into(), first_rx);
        generator.gates.lock().insert("second".into(), second_rx);

        let h = Harness::new(Arc::new(NoHost), generator, FakeClipboard::default()).await;
        let controller = h.controller.clone();

        controller.set_thoughts("first");
        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.generate().await }
        });
        assert_eq!(started_rx.recv().await.as_deref(), Some("first"));

        controller.set_thoughts("second");
        let second = tokio::spawn({
            let controller = controller.clone();
            async move { controller.generate().await }
        });
        assert_eq!(started_rx.recv().await.as_deref(), Some("second"));
        assert_eq!(controller.in_flight(), 2);
        assert!(!controller.state().can_generate());
        assert!(controller.copy().await.is_err());

        second_tx.send(Ok("second email".into())).unwrap();
        second.await.unwrap().unwrap();
        assert_eq!(controller.current_email().unwrap().text, "second email");

        first_tx.send(Ok("first email".into())).unwrap();
        first.await.unwrap().unwrap();
        assert_eq!(controller.current_email().unwrap().text, "first email");
        assert_eq!(controller.state(), WorkflowState::Displayed);
        assert_eq!(controller.in_flight(), 0);
    }
}
