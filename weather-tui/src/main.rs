//! Binary crate for the terminal weather widget.
//!
//! This crate focuses on:
//! - Terminal setup and restore
//! - The widget event loop (input, fetch dispatch, state)
//! - Rendering the search bar and result panel

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing_subscriber::EnvFilter;
use weather_core::{Config, WeatherClient};

mod app;
mod ui;

/// Terminal widget showing current weather for a city.
#[derive(Debug, Parser)]
#[command(name = "weather-tui", version, about = "Current weather lookup widget")]
struct Args {
    /// City searched on startup, overriding the configured default.
    #[arg(long)]
    city: Option<String>,
}

/// Diagnostics go to a file: stderr belongs to the alternate screen
/// while the widget runs.
fn init_logging() -> Result<()> {
    let log_file = std::fs::File::create("weather-tui.log")
        .context("Failed to create log file: weather-tui.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let mut config = Config::load()?;
    if let Some(city) = args.city {
        config.default_city = city;
    }
    let client = WeatherClient::new(&config);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app::run_app(&mut terminal, client, &config).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}
