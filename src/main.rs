//! LexZig UI: terminal front end
//!
//! Event loop: render → poll input (100ms) → apply finished analyses →
//! expire the copy confirmation.
//!
//! EXIT: Ctrl+Q or Ctrl+C from any panel

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{poll, read, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use lexzig_ui::cli::{init_logging, Args, Settings, EXIT_CONFIG_ERROR};
use lexzig_ui::client::{AnalysisClient, Transport};
use lexzig_ui::editor::Osc52Clipboard;
use lexzig_ui::ui::{handle_key_event, render, App, AppState};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = match Settings::from_env(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let _log_guard = init_logging(&settings.log_file)
        .with_context(|| format!("cannot log to {}", settings.log_file.display()))?;
    tracing::info!(api_url = %settings.api_url, "starting lexzig-ui");

    let client = Arc::new(AnalysisClient::new(
        settings.api_url.clone(),
        Transport::default(),
    ));
    let app = App::new(client, Arc::new(Osc52Clipboard)).with_image_url(settings.image_url);

    run_tui(app).context("terminal UI failed")?;
    tracing::info!("exiting");
    Ok(())
}

/// Set up the terminal, run the loop, restore the terminal
fn run_tui(mut app: App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    while app.state() != AppState::Quitting {
        render(terminal, app)?;

        if poll(Duration::from_millis(100))? {
            if let Event::Key(key) = read()? {
                handle_key_event(app, key, Instant::now());
            }
        }

        // Non-blocking: applies every analysis that finished since last pass
        app.process_analysis_events();
        app.tick(Instant::now());
    }
    Ok(())
}
