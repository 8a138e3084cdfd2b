use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEventKind};
use log::debug;
use rand::Rng;

use crate::app::{App, Command};

/// What the game loop reacts to. Keys arrive already translated into commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(Command),
    Resize,
    Tick,
    /// The input source is gone; nothing more will arrive.
    Closed,
}

/// Channel-backed event source. The terminal reader and tests both feed one.
pub struct EventSource {
    rx: Receiver<GameEvent>,
}

impl EventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }

    /// Spawns a thread translating crossterm input into game events.
    pub fn terminal() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // Windows reports key releases too; only presses edit the guess
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    match Command::from_key(key) {
                        Some(command) => GameEvent::Command(command),
                        None => continue,
                    }
                }
                Ok(CtEvent::Resize(_, _)) => GameEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }

    fn next(&self, tick: Duration) -> GameEvent {
        match self.rx.recv_timeout(tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => GameEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => GameEvent::Closed,
        }
    }
}

/// Drives an [`App`] from an [`EventSource`], redrawing only when something changed.
pub struct Runner {
    events: EventSource,
    tick: Duration,
}

impl Runner {
    pub fn new(events: EventSource, tick: Duration) -> Self {
        Self { events, tick }
    }

    /// Next event, or `Tick` if none arrived within the tick interval.
    pub fn step(&self) -> GameEvent {
        self.events.next(self.tick)
    }

    /// Runs until the player quits or the source closes.
    pub fn run<R, F>(&self, app: &mut App<R>, mut redraw: F) -> io::Result<()>
    where
        R: Rng,
        F: FnMut(&App<R>) -> io::Result<()>,
    {
        redraw(app)?;
        loop {
            let changed = match self.step() {
                GameEvent::Closed => {
                    debug!("event source closed");
                    return Ok(());
                }
                GameEvent::Tick => app.on_tick(),
                GameEvent::Resize => true,
                GameEvent::Command(command) => {
                    if !app.apply(command) {
                        return Ok(());
                    }
                    true
                }
            };
            if changed {
                redraw(app)?;
            }
        }
    }
}
