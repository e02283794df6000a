//! Read-only result viewers (Tokens, AST)
//!
//! A viewer owns its text. Updating it replaces the text wholesale and
//! resets the scroll; there is no incremental patching.

use serde_json::Value;

/// Pretty-print `value` as 2-space indented JSON
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// One read-only text viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    title: &'static str,
    text: String,
    scroll: usize,
}

impl ResultView {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            text: String::new(),
            scroll: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Current text (empty until the first success)
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Discard the current text and show `value`
    pub fn show(&mut self, value: &Value) {
        self.text = pretty_json(value);
        self.scroll = 0;
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.line_count().saturating_sub(1);
        self.scroll = (self.scroll + lines).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.line_count().saturating_sub(1);
    }
}
