//! Terminal rendering of workflow events
//!
//! The generated email goes to stdout so it can be piped; everything else
//! goes to stderr.

use std::io::Write;

use draftwright_core::models::Tone;
use draftwright_core::workflow::{Presenter, WorkflowState};

pub struct TerminalPresenter {
    /// Suppress the email on stdout (JSON output prints it instead)
    quiet_output: bool,
}

impl TerminalPresenter {
    pub fn new(quiet_output: bool) -> Self {
        Self { quiet_output }
    }
}

impl Presenter for TerminalPresenter {
    fn render_state(&self, state: WorkflowState) {
        if state == WorkflowState::Loading {
            eprintln!("⏳ Crafting your email...");
        }
    }

    fn render_output(&self, text: &str) {
        if self.quiet_output {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }

    fn render_error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }

    fn render_success(&self, message: &str) {
        eprintln!("✅ {}", message);
    }

    fn render_original(&self, text: &str) {
        let first_line = text.lines().next().unwrap_or_default();
        eprintln!("↩️  Replying to: {}", first_line);
    }

    fn render_tone(&self, tone: Tone) {
        eprintln!("🎚️  Tone: {}", tone.prompt_phrase());
    }
}
