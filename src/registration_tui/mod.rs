//! Registration Terminal User Interface (TUI)
//!
//! Renders the contest registration page in the terminal and drives the
//! form controller from keyboard input.

pub mod app;
pub mod components;
pub mod events;
pub mod pickers;
pub mod traits;
pub mod ui;

pub use app::App;
pub use events::AppEvent;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use crate::config::Config;

/// Set up the terminal, run the form until the user quits, restore the terminal
pub async fn run_tui(config: Config) -> Result<()> {
    info!("Starting registration TUI");

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => info!("Registration TUI exited"),
        Err(ref e) => error!("Registration TUI encountered an error: {}", e),
    }

    result
}
