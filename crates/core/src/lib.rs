//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the snake rules, state management, and simulation logic.
//! It has **no dependencies** on the terminal, audio, or the filesystem:
//!
//! - **Deterministic**: same seed and same `dt` sequence produce identical runs
//! - **Testable**: every rule is reachable by constructing a [`GameState`] directly
//! - **Portable**: renders to a plain [`Frame`] that any front end can draw
//!
//! # Module Structure
//!
//! - [`snake`]: body segments with O(1) membership tests and reversal rules
//! - [`game_state`]: the per-tick step, lives, timers, items, and frames
//! - [`spawn`]: bounded rejection sampling for food and power items
//! - [`scoring`]: per-mode point tables and tick-delay decay
//! - [`achievements`]: per-run achievement triggers and latch
//! - [`frame`]: the render-ready picture of a game
//! - [`stats`]: end-of-run summary
//!
//! # Game Rules
//!
//! | Mode | Lives | Ends when | Food | Speed-up per food |
//! |------|-------|-----------|------|-------------------|
//! | Classic | 3 | last life lost | 10 | ×0.98 |
//! | Time Attack | 1 | collision, or 60 s elapsed (a win) | 15 | ×0.98 |
//! | Survival | 1 | collision | 20 | ×0.97 |
//!
//! The tick delay never drops below 20 ms. A power item (10% chance per tick
//! while none is on the board) either adds points or removes points and one
//! segment, never shrinking the snake below three.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tui_snake_core::{GameState, StepResult};
//! use tui_snake_types::{Direction, Mode, Settings};
//!
//! let mut game = GameState::with_seed(Mode::Classic, Settings::default(), 42).unwrap();
//! game.set_direction(Direction::Up);
//!
//! let step = game.advance(game.delay()).unwrap();
//! assert_eq!(step, StepResult::Continue);
//! assert_eq!(game.elapsed(), Duration::from_millis(100));
//!
//! let frame = game.render();
//! assert_eq!(frame.score, game.score());
//! ```
//!
//! # Timing
//!
//! The game does not own a clock. The caller sleeps [`GameState::delay`] between
//! steps and passes the measured interval to [`GameState::advance`].

pub mod achievements;
pub mod frame;
pub mod game_state;
pub mod scoring;
pub mod snake;
pub mod spawn;
pub mod stats;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use achievements::{AchievementLatch, TriggerInput};
pub use frame::{CellKind, Frame, StatusLine, FRAME_H, FRAME_W};
pub use game_state::{GameEvent, GameState, PowerItem, StepResult};
pub use snake::Snake;
pub use spawn::SpawnError;
pub use stats::RunStats;
