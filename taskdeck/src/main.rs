//! Taskdeck — terminal task-list client.
//!
//! Launches the TUI and talks to a Taskdeck API server. The task list on
//! screen is a mirror of the server's list: every add, toggle, edit, and
//! delete is dispatched as an HTTP request, and only the server's answer
//! mutates local state. Configuration via CLI flags, environment
//! variables, or config file (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Default server (http://127.0.0.1:5000)
//! cargo run --bin taskdeck
//!
//! # Explicit server
//! cargo run --bin taskdeck -- --server-url http://192.168.1.10:5000
//!
//! # Or via environment variable
//! TASKDECK_URL=http://192.168.1.10:5000 cargo run --bin taskdeck
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::api::ApiClient;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::net::{self, ApiCommand, ApiEvent};
use taskdeck::state::App;
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > env > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(server = %config.server_url, "taskdeck starting");

    // A bad server URL is the one startup error worth dying for.
    let client = match ApiClient::new(&config.server_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid server URL '{}': {e}", config.server_url);
            std::process::exit(1);
        }
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, client, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: ApiClient,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new();

    let (cmd_tx, mut evt_rx) = net::spawn_api(client, config.channel_capacity);

    // Load the list on startup. If the server is down this is logged by
    // the background task and the list simply stays empty.
    send_command(&cmd_tx, ApiCommand::Refresh);

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending ApiEvents (non-blocking).
        drain_api_events(&mut app, &mut evt_rx);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(cmd) = app.handle_key_event(key) {
                send_command(&cmd_tx, cmd);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Send a command to the API task, logging instead of blocking on failure.
fn send_command(tx: &mpsc::Sender<ApiCommand>, cmd: ApiCommand) {
    match tx.try_send(cmd) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(cmd)) => {
            tracing::warn!(?cmd, "command channel full, dropping command");
        }
        Err(mpsc::error::TrySendError::Closed(cmd)) => {
            tracing::warn!(?cmd, "command channel closed, dropping command");
        }
    }
}

/// Drain all pending `ApiEvent`s from the receiver and apply them to the app.
fn drain_api_events(app: &mut App, rx: &mut mpsc::Receiver<ApiEvent>) {
    while let Ok(event) = rx.try_recv() {
        app.apply_event(event);
    }
}
