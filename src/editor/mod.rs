//! Editor surface
//!
//! Owns the source buffer, seeded with a sample program. The buffer is
//! handed out only as a snapshot; nothing outside the editor mutates it.

pub mod buffer;
pub mod clipboard;

use std::cell::Cell;
use std::time::{Duration, Instant};

pub use buffer::{Cursor, SourceText};
pub use clipboard::{Clipboard, ClipboardError, Osc52Clipboard, RecordingClipboard};

/// How long the "copied" confirmation stays up
pub const COPY_CONFIRMATION: Duration = Duration::from_millis(2000);

/// Program loaded into a fresh editor
pub const SAMPLE_CODE: &str = "\
const Circle = struct {
  x: i32,\x20
  y: i32,

  pub fn new(x: i32, y: i32) Circle {
    return Circle{
      .x = x,
      .y = y,
    };
  }
};
";

/// Editor with copy confirmation state
#[derive(Debug, Clone)]
pub struct EditorSurface {
    source: SourceText,
    /// When the last copy happened; cleared once expired
    copied_at: Option<Instant>,
    /// First visible line, adjusted while rendering
    scroll: Cell<usize>,
}

impl EditorSurface {
    /// Editor seeded with `SAMPLE_CODE`
    pub fn new() -> Self {
        Self::with_text(SAMPLE_CODE)
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            source: SourceText::new(text),
            copied_at: None,
            scroll: Cell::new(0),
        }
    }

    /// Current contents
    pub fn snapshot(&self) -> String {
        self.source.text()
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut SourceText {
        &mut self.source
    }

    /// Replace the whole buffer
    pub fn set_text(&mut self, text: &str) {
        self.source.replace(text);
        self.scroll.set(0);
    }

    /// Copy the snapshot to `clipboard` and raise the confirmation at `now`
    ///
    /// The confirmation is raised only if the write succeeded.
    pub fn copy_to_clipboard(
        &mut self,
        clipboard: &dyn Clipboard,
        now: Instant,
    ) -> Result<(), ClipboardError> {
        let text = self.snapshot();
        clipboard.set_text(&text)?;
        tracing::debug!(len = text.len(), "copied source to clipboard");
        self.copied_at = Some(now);
        Ok(())
    }

    /// Whether the confirmation is showing at `now`
    pub fn copy_confirmation_visible(&self, now: Instant) -> bool {
        match self.copied_at {
            Some(at) => now.saturating_duration_since(at) < COPY_CONFIRMATION,
            None => false,
        }
    }

    /// Drop an expired confirmation
    pub fn tick(&mut self, now: Instant) {
        if !self.copy_confirmation_visible(now) {
            self.copied_at = None;
        }
    }

    pub fn copy_pending(&self) -> bool {
        self.copied_at.is_some()
    }

    /// First visible line for a viewport of `height` rows, keeping the cursor in view
    pub fn scroll_for(&self, height: usize) -> usize {
        let row = self.source.cursor().row;
        let mut scroll = self.scroll.get();
        if row < scroll {
            scroll = row;
        } else if height > 0 && row >= scroll + height {
            scroll = row + 1 - height;
        }
        self.scroll.set(scroll);
        scroll
    }
}

impl Default for EditorSurface {
    fn default() -> Self {
        Self::new()
    }
}
