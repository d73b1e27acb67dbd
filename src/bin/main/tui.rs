//! The terminal user interface: owns the terminal and the events handler.

use crate::event::EventHandler;
use color_eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::{io, panic};

pub type CrosstermTerminal = Terminal<CrosstermBackend<io::Stderr>>;

/// Anything that knows how to draw itself into a frame.
pub trait Render {
    fn render(&mut self, frame: &mut Frame);
}

pub struct Tui {
    terminal: CrosstermTerminal,
    pub events: EventHandler,
}

impl Tui {
    pub fn new(terminal: CrosstermTerminal, events: EventHandler) -> Self {
        Tui { terminal, events }
    }

    /// Switches the terminal into the raw mode, enters the alternate screen and captures the mouse.
    ///
    /// Also installs a panic hook which puts the terminal back before the panic gets reported.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;

        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic| {
            // nothing more can be done about a failure here, the original hook still has to run
            let _ = Self::reset();
            panic_hook(panic);
        }));

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn draw(&mut self, app: &mut impl Render) -> Result<()> {
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    fn reset() -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Puts the terminal back into the state it's been in before [`Tui::enter`].
    pub fn exit(&mut self) -> Result<()> {
        Self::reset()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}
