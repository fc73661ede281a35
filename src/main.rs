//! todo-forms - terminal forms for a to-do service
//!
//! A Ratatui-based TUI for the login, signup and task forms, validating
//! input as it is typed and submitting to the to-do backend.

mod app;
mod backend;
mod cli;
mod config;
mod event;
mod platform;
mod state;
mod ticker;
mod ui;

use anyhow::Result;
use app::App;
use backend::BackendClient;
use clap::Parser;
use cli::Cli;
use config::ClientConfig;
use crossterm::{
    event::{self as term_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = ClientConfig::load()?;
    tracing::info!(base_url = config.base_url(), "Starting todo-forms");
    let backend = BackendClient::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    // Create app and run
    let mut app = App::new(Arc::new(backend), cli.launch());
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = ?err, "Exiting after error");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the data directory; the terminal belongs to the UI.
/// Falls back to stderr when no file can be opened.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "todo_forms=info".into());
    let log_file = ClientConfig::log_dir().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        File::create(dir.join("todo-forms.log")).ok()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match log_file {
        Some(file) => registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
        None => registry.with(fmt::layer().with_writer(io::stderr)).init(),
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Terminal polling blocks, so it runs off the async workers
        if let Some(Event::Key(key)) = tokio::task::spawn_blocking(next_terminal_event).await?? {
            app.handle_key(key);
        }

        // Results from background requests and the minute ticker
        app.drain_events();

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn next_terminal_event() -> io::Result<Option<Event>> {
    if term_event::poll(POLL_INTERVAL)? {
        term_event::read().map(Some)
    } else {
        Ok(None)
    }
}
