//! Panel rendering
//!
//! Layout, top to bottom:
//! - Header (title, decorative image URL if configured)
//! - Source editor
//! - Error banner (only while an error is set)
//! - Tokens | AST viewers side by side
//! - Status bar (key hints, requests in flight, copy confirmation)

use ratatui::style::Stylize;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::ui::results::ResultView;
use crate::ui::state::{App, Panel};

/// Render the whole UI
pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> std::io::Result<()> {
    terminal.draw(|f| draw(f, app))?;
    Ok(())
}

/// Draw one frame
pub fn draw(f: &mut Frame, app: &App) {
    let error_height = if app.analysis_error().is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(50),
            Constraint::Length(error_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_editor(f, app, chunks[1]);
    if error_height > 0 {
        render_error_banner(f, app, chunks[2]);
    }

    let result_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);
    render_result_view(
        f,
        &app.tokens_view,
        app.active_panel == Panel::Tokens,
        result_chunks[0],
    );
    render_result_view(
        f,
        &app.ast_view,
        app.active_panel == Panel::Ast,
        result_chunks[1],
    );

    render_status_bar(f, app, chunks[4]);
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let (title, border_style) = if focused {
        (format!(" [{}] ", title), Style::default().fg(Color::Green))
    } else {
        (format!(" {} ", title), Style::default())
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" LexZig ", Style::default().fg(Color::Black).bg(Color::Yellow).bold()),
        Span::raw(" lexical and syntax analysis for Zig"),
    ];
    if let Some(ref url) = app.image_url {
        spans.push(Span::styled("  ", Style::default()));
        spans.push(Span::styled(url.clone(), Style::default().fg(Color::DarkGray)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_editor(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.active_panel == Panel::Editor;
    let block = panel_block("Source", focused);
    let inner = block.inner(area);

    let source = app.editor.source();
    let scroll = app.editor.scroll_for(inner.height as usize);
    let lines: Vec<Line> = source
        .lines()
        .iter()
        .skip(scroll)
        .take(inner.height as usize)
        .map(|line| Line::from(line.as_str()))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);

    if focused && inner.height > 0 {
        let cursor = source.cursor();
        let x = inner.x.saturating_add(cursor.col as u16);
        let y = inner
            .y
            .saturating_add(cursor.row.saturating_sub(scroll) as u16);
        if x < inner.right() && y < inner.bottom() {
            f.set_cursor_position((x, y));
        }
    }
}

fn render_error_banner(f: &mut Frame, app: &App, area: Rect) {
    let detail = app.analysis_error().unwrap_or_default();
    let banner = Paragraph::new(Span::styled(
        detail.to_string(),
        Style::default().fg(Color::Red),
    ))
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(banner, area);
}

fn render_result_view(f: &mut Frame, view: &ResultView, focused: bool, area: Rect) {
    let block = panel_block(view.title(), focused);
    let paragraph = if view.is_empty() {
        Paragraph::new(Span::styled(
            "(run an analysis to see results)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(view.text()).scroll((view.scroll().min(u16::MAX as usize) as u16, 0))
    };
    f.render_widget(paragraph.block(block), area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " ^R run  ^Y copy  F2 focus  ^Q quit ",
        Style::default().fg(Color::DarkGray),
    )];

    if app.in_flight() > 0 {
        spans.push(Span::styled(
            format!(" Analysing... ({}) ", app.in_flight()),
            Style::default().fg(Color::Yellow),
        ));
    }
    if app.editor.copy_pending() {
        spans.push(Span::styled(" Copied! ", Style::default().fg(Color::Green).bold()));
    }
    if let Some(msg) = app.status_message() {
        spans.push(Span::styled(
            format!(" {} ", msg),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
