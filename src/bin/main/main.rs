pub mod app;
pub mod event;
pub mod game_ui;
pub mod tui;
pub mod update;

use app::App;
use clap::Parser;
use color_eyre::Result;
use event::{Event, EventHandler};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::File, path::PathBuf, sync::Mutex};
use tilesweep::config::{DEFAULT_HEIGHT, DEFAULT_MINE_COUNT, DEFAULT_WIDTH};
use tilesweep::GameConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tui::Tui;
use update::{update, update_mouse};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    height: u16,
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: u16,
    #[arg(short, long, default_value_t = DEFAULT_MINE_COUNT)]
    mines: u32,
    /// Write the diagnostic events into this file. Nothing is logged unless it's provided, since the terminal itself
    /// is occupied by the interface.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    // Create the terminal application.
    let config = GameConfig::new(args.width, args.height, args.mines)?;
    let mut app = App::new(config);
    debug!(?config, "starting the game");

    // Initialize the terminal user interface.
    let backend = CrosstermBackend::new(std::io::stderr());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new(250);
    let mut tui = Tui::new(terminal, events);
    tui.enter()?;

    // Start the main loop and exit the user interface afterwards, whatever the outcome of the loop.
    run_then_exit(&mut tui, |tui| run(tui, &mut app), Tui::exit)
}

/// Runs `body` and then `exit`, no matter whether `body` has failed. The error of `body` is reported first.
fn run_then_exit<T>(
    target: &mut T,
    body: impl FnOnce(&mut T) -> Result<()>,
    exit: impl FnOnce(&mut T) -> Result<()>,
) -> Result<()> {
    let result = body(target);
    let exited = exit(target);
    result.and(exited)
}

/// The main loop: draws the app and dispatches the events to it until it's told to quit.
fn run(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Render the user interface.
        tui.draw(app)?;
        // Handle events.
        match tui.events.next()? {
            Event::Tick => {}
            Event::Key(key_event) => update(app, key_event),
            Event::Mouse(mouse_event) => update_mouse(app, mouse_event),
            // the layout is recomputed on every draw
            Event::Resize(_, _) => {}
        };
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::run_then_exit;
    use color_eyre::eyre::eyre;

    #[test]
    fn the_exit_runs_after_a_failed_loop() {
        let mut calls = Vec::new();

        let result = run_then_exit(
            &mut calls,
            |calls| {
                calls.push("loop");
                Err(eyre!("the events channel is closed"))
            },
            |calls| {
                calls.push("exit");
                Ok(())
            },
        );

        assert_eq!(calls, ["loop", "exit"]);
        assert_eq!(result.unwrap_err().to_string(), "the events channel is closed");
    }

    #[test]
    fn the_exit_error_is_reported_after_a_clean_loop() {
        let mut calls: Vec<&str> = Vec::new();

        let result = run_then_exit(&mut calls, |_| Ok(()), |_| Err(eyre!("couldn't restore the terminal")));

        assert!(result.is_err());
        assert!(calls.is_empty());
    }
}
