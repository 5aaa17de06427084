//! Terminal, keyboard, and store implementations of the engine's collaborator traits.

use std::time::Duration;

use anyhow::Result;

use crate::core::{Frame, RunStats};
use crate::engine::{AchievementSink, InputSource, Renderer, StatsSink};
use crate::input::KeyboardInput;
use crate::store::{AchievementStore, Records};
use crate::term::{FrameBuffer, GameView, TerminalRenderer};
use crate::types::{Achievement, Command, Theme};

/// Draws game frames through the diffing terminal renderer.
pub struct TermRenderer<'a> {
    term: &'a mut TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    theme: Theme,
}

impl<'a> TermRenderer<'a> {
    pub fn new(term: &'a mut TerminalRenderer, theme: Theme) -> Self {
        let vp = term.viewport();
        Self {
            term,
            view: GameView::default(),
            fb: FrameBuffer::new(vp.width, vp.height),
            theme,
        }
    }
}

impl Renderer for TermRenderer<'_> {
    fn draw(&mut self, frame: &Frame, banner: Option<&str>) -> Result<()> {
        let vp = self.term.viewport();
        self.view
            .render_into(frame, self.theme, banner, vp, &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }
}

pub struct KeyboardCommands<'a>(pub &'a mut KeyboardInput);

impl InputSource for KeyboardCommands<'_> {
    fn poll_command(&mut self, timeout: Duration) -> Result<Option<Command>> {
        self.0.poll_command(timeout)
    }
}

/// Saves achievements the moment they unlock, so an aborted run keeps them.
pub struct AchievementRecorder<'a>(pub &'a mut AchievementStore);

impl AchievementSink for AchievementRecorder<'_> {
    fn unlock(&mut self, achievement: Achievement) {
        if let Err(err) = self.0.add(achievement) {
            tracing::warn!(
                achievement = achievement.name(),
                error = %format!("{err:#}"),
                "could not save achievement"
            );
        }
    }
}

pub struct RecordsSink<'a>(pub &'a mut Records);

impl StatsSink for RecordsSink<'_> {
    fn record_run(&mut self, stats: &RunStats) -> Result<()> {
        self.0.record_run(stats).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, Mode};

    #[test]
    fn recorder_is_idempotent_through_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AchievementStore::open(dir.path());
        {
            let mut sink = AchievementRecorder(&mut store);
            sink.unlock(Achievement::FoodFrenzy);
            sink.unlock(Achievement::FoodFrenzy);
        }
        assert_eq!(store.book().achievements.len(), 1);
    }

    #[test]
    fn records_sink_persists_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut records = Records::open(dir.path());
        let stats = RunStats {
            mode: Mode::Survival,
            difficulty: Difficulty::Normal,
            score: 80,
            food_eaten: 4,
            power_ups: 0,
            power_downs: 0,
            collisions: 1,
            max_length: 7,
            duration: Duration::from_secs(12),
            time_up: false,
            won: false,
            achievements: vec![],
        };
        RecordsSink(&mut records).record_run(&stats).unwrap();
        assert_eq!(records.scores.board().survival.high, 80);
        assert_eq!(records.achievements.book().total_games, 1);
    }
}
