//! Application state (root coordinator)
//!
//! Owns the editor, both result viewers and the display state. Results
//! come back from worker threads as events and are applied here, on the
//! main thread, in arrival order.
//!
//! Display rules:
//! - Success: store it, clear the error, redraw both viewers
//! - Failure: store the detail as the error, viewers keep their old text
//! - Transport failure: nothing visible changes

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::client::{AnalysisClient, AnalysisData, AnalysisResult};
use crate::editor::{Clipboard, EditorSurface};
use crate::ui::results::ResultView;
use crate::ui::worker::{spawn_analysis, AnalysisEvent, AnalysisReceiver, AnalysisSender};

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Editor,
    Tokens,
    Ast,
}

impl Panel {
    pub fn next(self) -> Self {
        match self {
            Panel::Editor => Panel::Tokens,
            Panel::Tokens => Panel::Ast,
            Panel::Ast => Panel::Editor,
        }
    }
}

/// Coarse application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Idle, accepting input
    Running,
    /// At least one request in flight (input is still accepted)
    Analysing,
    Quitting,
}

/// Main application state
pub struct App {
    /// Source editor
    pub editor: EditorSurface,
    /// Tokens viewer
    pub tokens_view: ResultView,
    /// AST viewer
    pub ast_view: ResultView,
    /// Panel with keyboard focus
    pub active_panel: Panel,
    /// Decorative image URL shown in the header
    pub image_url: Option<String>,

    last_success: Option<AnalysisData>,
    analysis_error: Option<String>,
    /// Last clipboard problem, shown in the status bar
    status_message: Option<String>,

    client: Arc<AnalysisClient>,
    clipboard: Arc<dyn Clipboard>,
    event_tx: AnalysisSender,
    event_rx: AnalysisReceiver,
    next_request_id: u64,
    in_flight: usize,
    should_quit: bool,
}

impl App {
    pub fn new(client: Arc<AnalysisClient>, clipboard: Arc<dyn Clipboard>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            editor: EditorSurface::new(),
            tokens_view: ResultView::new("Tokens"),
            ast_view: ResultView::new("AST"),
            active_panel: Panel::Editor,
            image_url: None,
            last_success: None,
            analysis_error: None,
            status_message: None,
            client,
            clipboard,
            event_tx,
            event_rx,
            next_request_id: 1,
            in_flight: 0,
            should_quit: false,
        }
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn state(&self) -> AppState {
        if self.should_quit {
            AppState::Quitting
        } else if self.in_flight > 0 {
            AppState::Analysing
        } else {
            AppState::Running
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    /// Last successful analysis, if any
    pub fn last_success(&self) -> Option<&AnalysisData> {
        self.last_success.as_ref()
    }

    /// Current error banner text, if any
    pub fn analysis_error(&self) -> Option<&str> {
        self.analysis_error.as_deref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Requests submitted but not yet answered
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Submit the current editor contents for analysis
    ///
    /// An empty buffer sends nothing. Submissions are not gated: a second
    /// call while one is in flight starts another independent request.
    pub fn submit(&mut self) -> Option<JoinHandle<()>> {
        let code = self.editor.snapshot();
        if code.is_empty() {
            tracing::debug!("empty buffer, nothing to analyse");
            return None;
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        match spawn_analysis(
            Arc::clone(&self.client),
            request_id,
            code,
            self.event_tx.clone(),
        ) {
            Ok(handle) => {
                self.in_flight += 1;
                Some(handle)
            }
            Err(err) => {
                tracing::error!(request_id, error = %err, "failed to spawn analysis thread");
                None
            }
        }
    }

    /// Apply one analysis result to the display state
    pub fn apply_result(&mut self, result: AnalysisResult) {
        match result {
            AnalysisResult::Success(data) => {
                self.tokens_view.show(&serde_json::Value::from(data.tokens.clone()));
                self.ast_view.show(&data.ast);
                self.last_success = Some(data);
                self.analysis_error = None;
            }
            AnalysisResult::Failure { detail } => {
                self.analysis_error = Some(detail);
            }
        }
    }

    fn handle_analysis_event(&mut self, event: AnalysisEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            AnalysisEvent::Completed { request_id, result } => {
                tracing::debug!(request_id, success = result.is_success(), "applying analysis result");
                self.apply_result(result);
            }
            AnalysisEvent::Failed { request_id, error } => {
                tracing::debug!(request_id, %error, "analysis produced no result");
            }
        }
    }

    /// Apply every analysis event that has arrived, without blocking
    ///
    /// Returns true if anything was applied.
    pub fn process_analysis_events(&mut self) -> bool {
        let mut handled = false;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_analysis_event(event);
            handled = true;
        }
        handled
    }

    /// Block until no request is in flight or `timeout` passes
    ///
    /// Returns true if everything completed.
    pub fn wait_for_analysis(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.event_rx.recv_timeout(remaining) {
                Ok(event) => self.handle_analysis_event(event),
                Err(_) => return false,
            }
        }
        true
    }

    /// Copy the editor contents to the clipboard
    pub fn copy_source(&mut self, now: Instant) {
        let clipboard = Arc::clone(&self.clipboard);
        match self.editor.copy_to_clipboard(clipboard.as_ref(), now) {
            Ok(()) => self.status_message = None,
            Err(err) => {
                tracing::warn!(error = %err, "copy to clipboard failed");
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Whether the "copied" confirmation is up
    pub fn copy_confirmation_visible(&self, now: Instant) -> bool {
        self.editor.copy_confirmation_visible(now)
    }

    /// Expire time-based UI state
    pub fn tick(&mut self, now: Instant) {
        self.editor.tick(now);
    }

    pub fn cycle_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }
}
