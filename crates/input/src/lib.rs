//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s for a running game
//! and [`MenuKey`]s for the menu screens, and provides a bounded keyboard poller
//! that never waits past its timeout.

pub mod keyboard;
pub mod map;

pub use tui_snake_types as types;

pub use keyboard::KeyboardInput;
pub use map::{command_for_key, direction_for_key, is_interrupt, menu_key, should_quit, MenuKey};
