//! Terminal input
//!
//! A reader thread blocks on crossterm and forwards key presses over a
//! channel, with a tick between them so the UI can pick up workflow updates
//! while no key is pressed.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tracing::warn;

/// What the UI loop wakes up for
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    /// The terminal was resized; the next draw adapts
    Resize,
    Tick,
}

pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Start the reader thread
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        thread::Builder::new()
            .name("terminal-input".into())
            .spawn(move || {
                if let Err(err) = pump(&sender, tick_rate) {
                    warn!(error = %err, "terminal input stopped");
                }
            })?;
        Ok(Self { receiver })
    }

    /// Block until the next event
    ///
    /// Fails once the reader thread has stopped.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

/// Forward terminal input until the receiving side goes away
fn pump(sender: &mpsc::Sender<Event>, tick_rate: Duration) -> io::Result<()> {
    let mut next_tick = Instant::now() + tick_rate;
    loop {
        if event::poll(next_tick.saturating_duration_since(Instant::now()))? {
            let forwarded = match event::read()? {
                // Windows reports key releases as well
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
                CrosstermEvent::Resize(..) => Some(Event::Resize),
                _ => None,
            };
            if let Some(event) = forwarded {
                if sender.send(event).is_err() {
                    return Ok(());
                }
            }
        }

        if Instant::now() >= next_tick {
            if sender.send(Event::Tick).is_err() {
                return Ok(());
            }
            next_tick = Instant::now() + tick_rate;
        }
    }
}
