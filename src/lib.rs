//! Terminal Snake (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_snake::{core,engine,input,store,term,types}`
//! and holds the binary's wiring: CLI configuration, logging, audio, and the menus.

pub use tui_snake_core as core;
pub use tui_snake_engine as engine;
pub use tui_snake_input as input;
pub use tui_snake_store as store;
pub use tui_snake_term as term;
pub use tui_snake_types as types;

pub mod app;
pub mod audio;
pub mod config;
pub mod logging;
pub mod runtime;
