//! Clipboard access
//!
//! Write-only. The terminal build sets the system clipboard with an OSC 52
//! escape sequence, which works over SSH and inside tmux (with
//! `set-clipboard on`).

use std::io::Write;
use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Clipboard errors
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Something that can receive copied text
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// OSC 52 escape sequence for `text`
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Writes OSC 52 to stdout
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        crossterm::execute!(stdout, crossterm::style::Print(osc52_sequence(text)))?;
        stdout.flush()?;
        Ok(())
    }
}

/// Keeps copied text in memory (tests, headless runs)
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, oldest first
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.writes().pop()
    }
}

impl Clipboard for RecordingClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(text.to_string());
        }
        Ok(())
    }
}
