//! The terminal events handler.

use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// The terminal events the main loop reacts to.
#[derive(Clone, Copy, Debug)]
pub enum Event {
    /// Emitted every `tick_rate` milliseconds, so that the screen gets redrawn even without any input.
    Tick,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Polls the terminal for events on a separate thread and forwards them to the main loop through a channel.
#[derive(Debug)]
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Spawns the (detached) polling thread. The thread stops as soon as the receiving side is gone or the terminal can
    /// no longer be read.
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate);
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();

            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                let Ok(has_event) = event::poll(timeout) else {
                    break;
                };

                if has_event {
                    let forwarded = match event::read() {
                        // only the presses, the releases and repeats are reported on some platforms as well
                        Ok(CrosstermEvent::Key(e)) if e.kind == KeyEventKind::Press => Some(Event::Key(e)),
                        Ok(CrosstermEvent::Mouse(e)) => Some(Event::Mouse(e)),
                        Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                        Ok(_) => None,
                        Err(_) => break,
                    };

                    if let Some(event) = forwarded {
                        if sender.send(event).is_err() {
                            break;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        break;
                    }

                    last_tick = Instant::now();
                }
            }
        });

        EventHandler { receiver }
    }

    /// Blocks until the next event arrives.
    pub fn next(&self) -> Result<Event> {
        Ok(self.receiver.recv()?)
    }
}
