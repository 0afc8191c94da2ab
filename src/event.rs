//! Terminal event pump for the tray.
//!
//! A background thread polls crossterm for input and emits a `Tick` at the
//! configured rate. Ticks are what advance the poll timer, so they are sent
//! even while the user is idle.

use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Events that drive the tray.
#[derive(Debug)]
pub enum Event {
    /// Key press (releases and repeats are dropped).
    Key(KeyEvent),
    /// Pointer movement or clicks, used for hover and activation.
    Mouse(MouseEvent),
    /// Terminal window resize event.
    Resize(u16, u16),
    /// Periodic tick.
    Tick,
}

/// Receives terminal events from the pump thread.
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Spawn the pump with the given tick rate in milliseconds.
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms.max(1));
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(evt) = forwarded {
                        if sender.send(evt).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { receiver }
    }

    /// Blocks until the next event is available.
    ///
    /// # Errors
    ///
    /// Returns an error if the pump thread has stopped.
    pub fn next(&self) -> Result<Event> {
        Ok(self.receiver.recv()?)
    }
}
