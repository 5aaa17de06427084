//! The per-run tick loop.
//!
//! One call to [`GameLoop::run`] plays a single run to completion:
//!
//! 1. wait up to the current tick delay for a command
//! 2. advance the game by the measured interval
//! 3. forward events to audio and the achievement sink
//! 4. draw, then sleep off whatever is left of the tick

use std::time::Duration;

use tui_snake_core::{Frame, GameEvent, GameState, RunStats, StepResult};
use tui_snake_types::{Command, Effect, LIFE_LOST_PAUSE_MS};

use crate::{AchievementSink, AudioCue, Clock, InputSource, Renderer};

pub const BANNER_LIFE_LOST: &str = "LIFE LOST";
pub const BANNER_GAME_OVER: &str = "GAME OVER";
pub const BANNER_TIME_UP: &str = "TIME'S UP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// How long the "LIFE LOST" banner stays up. Not counted as run time.
    pub life_lost_pause: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            life_lost_pause: Duration::from_millis(LIFE_LOST_PAUSE_MS),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The game reached GameOver; stats should be recorded.
    Completed(RunStats),
    /// The player quit mid-run; nothing is recorded.
    Aborted,
}

pub struct GameLoop<'a> {
    renderer: &'a mut dyn Renderer,
    input: &'a mut dyn InputSource,
    audio: &'a mut dyn AudioCue,
    achievements: &'a mut dyn AchievementSink,
    clock: &'a mut dyn Clock,
    config: LoopConfig,
    frame: Frame,
}

impl<'a> GameLoop<'a> {
    pub fn new(
        renderer: &'a mut dyn Renderer,
        input: &'a mut dyn InputSource,
        audio: &'a mut dyn AudioCue,
        achievements: &'a mut dyn AchievementSink,
        clock: &'a mut dyn Clock,
    ) -> Self {
        Self {
            renderer,
            input,
            audio,
            achievements,
            clock,
            config: LoopConfig::default(),
            frame: Frame::default(),
        }
    }

    pub fn with_config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    /// Play `state` until GameOver or Quit.
    pub fn run(&mut self, state: &mut GameState) -> RunOutcome {
        tracing::info!(mode = state.mode().as_str(), "run started");
        self.draw(state, None);
        let mut last_step = self.clock.now();

        loop {
            let tick_start = self.clock.now();
            let delay = state.delay();

            match self.input.poll_command(delay) {
                Ok(Some(Command::Turn(dir))) => state.set_direction(dir),
                Ok(Some(Command::Quit)) => {
                    tracing::info!(score = state.score(), "run aborted");
                    return RunOutcome::Aborted;
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(error = %err, "input poll failed"),
            }

            let now = self.clock.now();
            let dt = now.saturating_duration_since(last_step);
            last_step = now;

            let step = match state.advance(dt) {
                Ok(step) => step,
                Err(err) => {
                    tracing::error!(error = %err, "tick failed, ending run");
                    self.draw(state, Some(BANNER_GAME_OVER));
                    self.audio.play_effect(Effect::GameOver);
                    return RunOutcome::Completed(state.run_stats());
                }
            };
            self.dispatch_events(state);

            match step {
                StepResult::Continue => self.draw(state, None),
                StepResult::LifeLost { lives_left } => {
                    tracing::info!(lives_left, score = state.score(), "life lost");
                    self.draw(state, Some(BANNER_LIFE_LOST));
                    self.clock.sleep(self.config.life_lost_pause);
                    last_step = self.clock.now();
                    continue;
                }
                StepResult::GameOver(stats) => {
                    let banner = if stats.time_up {
                        BANNER_TIME_UP
                    } else {
                        BANNER_GAME_OVER
                    };
                    self.draw(state, Some(banner));
                    self.audio.play_effect(Effect::GameOver);
                    tracing::info!(
                        score = stats.score,
                        food = stats.food_eaten,
                        secs = stats.duration.as_secs(),
                        won = stats.won,
                        "run completed"
                    );
                    return RunOutcome::Completed(stats);
                }
            }

            let spent = self.clock.now().saturating_duration_since(tick_start);
            self.clock.sleep(delay.saturating_sub(spent));
        }
    }

    fn dispatch_events(&mut self, state: &GameState) {
        for event in state.events() {
            match *event {
                GameEvent::AteFood => self.audio.play_effect(Effect::Eat),
                GameEvent::PowerUp => self.audio.play_effect(Effect::PowerUp),
                GameEvent::PowerDown => self.audio.play_effect(Effect::PowerDown),
                GameEvent::AchievementUnlocked(a) => {
                    tracing::info!(achievement = a.name(), "achievement unlocked");
                    self.achievements.unlock(a);
                }
                GameEvent::PowerItemSpawned(kind) => {
                    tracing::debug!(?kind, "power item spawned");
                }
                // Handled by the step result.
                GameEvent::LifeLost | GameEvent::GameOver => {}
            }
        }
    }

    fn draw(&mut self, state: &GameState, banner: Option<&str>) {
        state.render_into(&mut self.frame);
        if let Err(err) = self.renderer.draw(&self.frame, banner) {
            tracing::warn!(error = %err, "draw failed");
        }
    }
}
