//! ShoreSquad - 24-hour weather forecast in the terminal
//!
//! A terminal UI widget that displays the island-wide 24-hour forecast and a
//! live UTC clock, with a retry control when the forecast cannot be loaded.

use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use shoresquad::app::App;
use shoresquad::cli::Cli;
use shoresquad::config::Config;
use shoresquad::{logging, ui};

/// How often the screen is redrawn while waiting for input
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Draws the app's screen
fn draw(terminal: &mut Tui, app_screen: &shoresquad::view::SharedScreen) -> io::Result<()> {
    terminal.draw(|frame| ui::render(frame, &app_screen.lock()))?;
    Ok(())
}

/// Returns the next key press, waiting at most `timeout`
fn next_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(key));
            }
        }
    }
    Ok(None)
}

/// Runs the startup sequence while keeping the screen live
///
/// Returns `None` if the user quit before loading finished.
async fn start(terminal: &mut Tui, mut app: App) -> io::Result<Option<App>> {
    let screen = app.screen();
    let mut init = tokio::spawn(async move {
        app.init().await;
        app
    });

    loop {
        draw(terminal, &screen)?;

        // Only quit is allowed during loading
        if let Some(key) = next_key(Duration::ZERO)? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                // Dropping the app inside the aborted task stops its clock.
                init.abort();
                return Ok(None);
            }
        }

        tokio::select! {
            joined = &mut init => return joined.map(Some).map_err(io::Error::other),
            _ = tokio::time::sleep(FRAME_INTERVAL) => {}
        }
    }
}

/// Main event loop; a retry builds a brand-new app from the same config
async fn run(terminal: &mut Tui, config: &Config) -> io::Result<()> {
    loop {
        let Some(mut app) = start(terminal, App::new(config)).await? else {
            return Ok(());
        };

        loop {
            draw(terminal, &app.screen())?;

            if let Some(key) = next_key(FRAME_INTERVAL)? {
                app.handle_key(key);
            }

            if app.should_quit {
                app.shutdown().await;
                return Ok(());
            }

            if app.restart_requested {
                tracing::info!("Restarting widget");
                app.shutdown().await;
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    match logging::init(&cli.log_level, cli.log_file.clone()) {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "Logging to file"),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
    tracing::info!(
        endpoint = %config.endpoint_url,
        cache_duration = ?config.cache_duration,
        "Starting"
    );

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result?;
    Ok(())
}
