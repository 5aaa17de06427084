//! Blocking and bounded keyboard reads over crossterm.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::map::command_for_key;
use crate::types::Command;

/// Key-press reader.
///
/// Only `KeyEventKind::Press` events are returned. Releases and auto-repeat,
/// resize and focus events are consumed and ignored.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    pub fn new() -> Self {
        Self
    }

    /// Wait up to `timeout` for one key press.
    pub fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(None);
            }
            if let Some(key) = press(event::read()?) {
                return Ok(Some(key));
            }
            if remaining.is_zero() {
                return Ok(None);
            }
        }
    }

    /// Wait for one in-game command, ignoring unmapped keys, for at most `timeout`.
    pub fn poll_command(&mut self, timeout: Duration) -> Result<Option<Command>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.poll_key(remaining)? {
                Some(key) => {
                    if let Some(cmd) = command_for_key(key) {
                        return Ok(Some(cmd));
                    }
                    if remaining.is_zero() {
                        return Ok(None);
                    }
                }
                None => return Ok(None),
            }
        }
    }

    /// Block until a key is pressed.
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Some(key) = press(event::read()?) {
                return Ok(key);
            }
        }
    }
}

fn press(ev: Event) -> Option<KeyEvent> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}
