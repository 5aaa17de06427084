//! Engine module - the real-time loop that drives a [`GameState`]
//!
//! The loop owns no I/O of its own. Everything it touches is handed in as a
//! collaborator at construction:
//!
//! | Trait | Used for | Failure policy |
//! |-------|----------|----------------|
//! | [`Renderer`] | drawing each frame (and banners) | logged, tick continues |
//! | [`InputSource`] | one bounded wait for a command per tick | logged, treated as no input |
//! | [`AudioCue`] | fire-and-forget sound effects | backend logs its own failures |
//! | [`AchievementSink`] | reporting per-run unlocks | idempotent |
//! | [`StatsSink`] | persisting a completed run | called by the loop's caller |
//! | [`Clock`] | reading time and sleeping | - |
//!
//! Tests drive the loop with scripted input and a manual clock, so a full run
//! executes in microseconds of wall time.
//!
//! [`GameState`]: tui_snake_core::GameState

use std::time::{Duration, Instant};

use tui_snake_core::{Frame, RunStats};
use tui_snake_types::{Achievement, Command, Effect};

pub mod game_loop;

pub use game_loop::{
    GameLoop, LoopConfig, RunOutcome, BANNER_GAME_OVER, BANNER_LIFE_LOST, BANNER_TIME_UP,
};

/// Draws frames. `banner` is an overlay message such as "GAME OVER".
pub trait Renderer {
    fn draw(&mut self, frame: &Frame, banner: Option<&str>) -> anyhow::Result<()>;
}

/// Produces player commands.
pub trait InputSource {
    /// Wait up to `timeout` for one command. Must not block past `timeout`.
    fn poll_command(&mut self, timeout: Duration) -> anyhow::Result<Option<Command>>;
}

pub trait AudioCue {
    fn play_effect(&mut self, effect: Effect);
}

pub trait AchievementSink {
    /// Record an unlock. Unlocking an already-unlocked achievement is a no-op.
    fn unlock(&mut self, achievement: Achievement);
}

pub trait StatsSink {
    /// Persist a completed run. Never called for aborted runs.
    fn record_run(&mut self, stats: &RunStats) -> anyhow::Result<()>;
}

/// Source of time for the loop.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, d: Duration);
}

/// Wall-clock time with real sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, d: Duration) {
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }
}

/// Discards effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudio;

impl AudioCue for NoAudio {
    fn play_effect(&mut self, effect: Effect) {
        tracing::trace!(?effect, "audio muted");
    }
}
