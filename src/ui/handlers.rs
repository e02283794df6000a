//! Keyboard handling
//!
//! Global keys work from any panel:
//! - Ctrl+R / F5: run analysis
//! - Ctrl+Y / F6: copy source to clipboard
//! - F2 / Shift+Tab: cycle focus (Editor → Tokens → AST)
//! - Ctrl+Q / Ctrl+C: quit
//!
//! Everything else goes to the focused panel: text editing in the editor,
//! scrolling in the result viewers.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::results::ResultView;
use crate::ui::state::{App, Panel};

/// Lines moved by PageUp/PageDown
const PAGE: usize = 10;

/// Handle one key press
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.quit();
            return;
        }
        KeyCode::Char('r') if ctrl => {
            app.submit();
            return;
        }
        KeyCode::F(5) => {
            app.submit();
            return;
        }
        KeyCode::Char('y') if ctrl => {
            app.copy_source(now);
            return;
        }
        KeyCode::F(6) => {
            app.copy_source(now);
            return;
        }
        KeyCode::F(2) | KeyCode::BackTab => {
            app.cycle_panel();
            return;
        }
        _ => {}
    }

    match app.active_panel {
        Panel::Editor => handle_editor_key(app, key),
        Panel::Tokens => handle_view_key(&mut app.tokens_view, key),
        Panel::Ast => handle_view_key(&mut app.ast_view, key),
    }
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    // Ctrl or Alt alone is a chord; both together is AltGr on some terminals
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    if ctrl != alt {
        return;
    }

    let source = app.editor.source_mut();
    match key.code {
        KeyCode::Char(c) => source.insert_char(c),
        KeyCode::Enter => source.insert_newline(),
        KeyCode::Tab => source.indent(),
        KeyCode::Backspace => source.backspace(),
        KeyCode::Delete => source.delete(),
        KeyCode::Left => source.move_left(),
        KeyCode::Right => source.move_right(),
        KeyCode::Up => source.move_up(),
        KeyCode::Down => source.move_down(),
        KeyCode::Home => source.move_home(),
        KeyCode::End => source.move_end(),
        _ => {}
    }
}

fn handle_view_key(view: &mut ResultView, key: KeyEvent) {
    match key.code {
        KeyCode::Up => view.scroll_up(1),
        KeyCode::Down => view.scroll_down(1),
        KeyCode::PageUp => view.scroll_up(PAGE),
        KeyCode::PageDown => view.scroll_down(PAGE),
        KeyCode::Home => view.scroll_to_top(),
        KeyCode::End => view.scroll_to_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AnalysisClient, FakeTransport, Transport};
    use crate::editor::RecordingClipboard;
    use crate::ui::state::AppState;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> App {
        let client = Arc::new(AnalysisClient::new(
            "http://test/",
            Transport::Fake(FakeTransport::new(r#"{"data": {"tokens": [], "ast": {}}}"#)),
        ));
        App::new(client, Arc::new(RecordingClipboard::new()))
    }

    #[test]
    fn test_typing_edits_buffer() {
        let mut app = test_app();
        app.editor.set_text("");
        let now = Instant::now();
        for c in "hi".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)), now);
        }
        handle_key_event(&mut app, key(KeyCode::Enter), now);
        handle_key_event(&mut app, key(KeyCode::Tab), now);
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT), now);
        assert_eq!(app.editor.snapshot(), "hi\n  X");
    }

    #[test]
    fn test_ctrl_chords_do_not_type() {
        let mut app = test_app();
        app.editor.set_text("");
        handle_key_event(&mut app, ctrl('z'), Instant::now());
        assert_eq!(app.editor.snapshot(), "");
    }

    #[test]
    fn test_altgr_characters_type() {
        let mut app = test_app();
        app.editor.set_text("");
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        let now = Instant::now();
        for c in ['@', '{', '['] {
            handle_key_event(&mut app, KeyEvent::new(KeyCode::Char(c), altgr), now);
        }
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT), now);
        assert_eq!(app.editor.snapshot(), "@{[");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, ctrl('q'), Instant::now());
        assert_eq!(app.state(), AppState::Quitting);

        let mut app = test_app();
        handle_key_event(&mut app, ctrl('c'), Instant::now());
        assert_eq!(app.state(), AppState::Quitting);
    }

    #[test]
    fn test_copy_key_raises_confirmation() {
        let mut app = test_app();
        let now = Instant::now();
        handle_key_event(&mut app, ctrl('y'), now);
        assert!(app.copy_confirmation_visible(now));
    }

    #[test]
    fn test_focus_routes_scroll_keys() {
        let mut app = test_app();
        app.apply_result(crate::client::AnalysisResult::Success(
            crate::client::AnalysisData {
                tokens: vec!["a".into(), "b".into(), "c".into()],
                ast: serde_json::json!({}),
            },
        ));
        let now = Instant::now();
        let before = app.editor.snapshot();

        handle_key_event(&mut app, key(KeyCode::F(2)), now);
        assert_eq!(app.active_panel, Panel::Tokens);
        handle_key_event(&mut app, key(KeyCode::Down), now);
        handle_key_event(&mut app, key(KeyCode::Char('x')), now);

        assert_eq!(app.tokens_view.scroll(), 1);
        assert_eq!(app.editor.snapshot(), before);
    }

    #[test]
    fn test_run_key_submits() {
        let mut app = test_app();
        let now = Instant::now();
        handle_key_event(&mut app, key(KeyCode::F(5)), now);
        assert!(app.wait_for_analysis(std::time::Duration::from_secs(5)));
        let requests = app.client().transport().as_fake().unwrap().requests();
        assert_eq!(requests.len(), 1);
    }
}
