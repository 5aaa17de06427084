//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! - [`GameView`] turns a core [`Frame`](tui_snake_core::Frame) into cells, two
//!   columns per board cell so the board looks square
//! - [`MenuView`] draws the menu and record screens
//! - [`TerminalRenderer`] owns raw mode and the alternate screen

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use menu_view::{MenuScreen, MenuView};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
