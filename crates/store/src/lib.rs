//! Store module - settings, scores, and achievements on disk
//!
//! Everything persisted lives as pretty-printed JSON in one data directory:
//!
//! | File | Contents |
//! |------|----------|
//! | `settings.json` | gameplay [`Settings`](crate::types::Settings) |
//! | `scores.json` | last and best score per mode, plus combined sums |
//! | `achievements.json` | lifetime totals and unlocked achievements with timestamps |
//!
//! # Data directory
//!
//! Resolved by [`resolve_data_dir`]: an explicit path (`--data-dir` or
//! `SNAKE_DATA_DIR`), else the platform data directory joined with `tui-snake`,
//! else the working directory.
//!
//! # Failure handling
//!
//! - A missing file is created with defaults.
//! - An unreadable or invalid file is logged at `warn` and defaults are used.
//! - Every write goes to a temp file in the same directory and is renamed into
//!   place, so an interrupted save never leaves a truncated file.

pub mod achievements;
pub mod paths;
pub mod records;
pub mod scores;
pub mod settings;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use achievements::{AchievementStore, StatsBook, Unlocked, TIME_FORMAT};
pub use paths::{read_json, resolve_data_dir, write_json_atomic};
pub use records::{RecordOutcome, Records};
pub use scores::{ScoreBoard, ScoreEntry, ScoreStore};
pub use settings::SettingsStore;
