mod app;
mod cli;
mod config;
mod domain;
mod input;
mod notifications;
mod persistence;
mod quotes;
mod relay;
mod report;
mod ticker;
mod tips;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::Parser;
use cli::Commands;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::ensure_flowtime_dir;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log file written while the dashboard owns the terminal
const LOG_FILE: &str = "flowtime.log";

#[derive(Parser)]
#[command(name = "flowtime")]
#[command(about = "Plan the day: tasks, time estimates, an hour grid and a focus timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "flowtime=info".into())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .init();
}

/// Send logs to the data directory; the returned guard flushes on drop
fn init_file_logging(dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(command) => {
            init_stderr_logging();
            cli::run(command)
        }
        None => run_tui(),
    }
}

fn run_tui() -> Result<()> {
    let dir = ensure_flowtime_dir()?;
    let _log_guard = init_file_logging(&dir);
    eprintln!("Using flowtime directory: {}", dir.display());

    let mut app = AppState::new(cli::open_store()?, cli::open_config()?)?;
    tracing::info!(tasks = app.repo.len(), "dashboard started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "dashboard stopped");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Pomodoro, quote rotation, toast expiry and estimate results
        app.tick();
    }
}
