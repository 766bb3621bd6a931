//! Hiyaku - Entry Point
//!
//! Initializes logging and the terminal, restores the last state and runs
//! the input loop.

use std::io;
use std::fs::OpenOptions;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use hiyaku::config::Settings;
use hiyaku::save;
use hiyaku::ui::App;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    // Logging reads its filter from settings, so load errors are reported after init
    let loaded = Settings::load();
    let settings = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("hiyaku.log")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter.as_str())
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    log::info!("Starting Hiyaku v{}", env!("CARGO_PKG_VERSION"));
    if let Err(e) = &loaded {
        log::warn!("Using default settings: {}", e);
    }

    let state_path = save::state_path();
    let state = save::load_or_default(&state_path);
    let mut app = App::new(state, settings, Some(state_path));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Hiyaku shut down cleanly");
    result
}

/// Main input loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press && app.handle_input(key)? {
                    break;
                }
            }
        }
    }

    Ok(())
}
