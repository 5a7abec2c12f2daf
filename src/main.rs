use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use pitwall::app_state::AppState;
use pitwall::{constants, events, ui};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the generation backend.
    #[arg(long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for PITWALL_BACKEND_URL and friends)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to a file; the terminal belongs to ratatui. The filter comes from
    // RUST_LOG with a crate-local default.
    let file_appender = tracing_appender::rolling::never(".", "pitwall.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pitwall=info")),
        )
        .init();

    let backend_url = cli
        .backend_url
        .unwrap_or_else(|| constants::BACKEND_URL.clone());
    info!(%backend_url, "Starting pitwall");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(backend_url);
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    loop {
        // Pick up settlements from any in-flight request so the draw below
        // reflects them.
        app.process_backend_messages();

        terminal.draw(|f| ui::draw_ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if events::handle_key_event(app, key) {
                    info!("Exit requested");
                    return Ok(());
                }
            }
        }
    }
}
