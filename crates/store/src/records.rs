use std::path::Path;

use anyhow::Result;

use crate::achievements::AchievementStore;
use crate::core::RunStats;
use crate::scores::ScoreStore;
use crate::settings::SettingsStore;
use crate::types::Achievement;

/// All persisted state under one data directory.
#[derive(Debug, Clone)]
pub struct Records {
    pub settings: SettingsStore,
    pub scores: ScoreStore,
    pub achievements: AchievementStore,
}

/// What changed when a run was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordOutcome {
    pub new_high: bool,
    /// Achievements saved for the first time by this call.
    pub unlocked: Vec<Achievement>,
}

impl Records {
    pub fn open(dir: &Path) -> Self {
        tracing::info!(dir = %dir.display(), "opening records");
        Self {
            settings: SettingsStore::open(dir),
            scores: ScoreStore::open(dir),
            achievements: AchievementStore::open(dir),
        }
    }

    /// Persist a completed run: scores, lifetime stats, and any achievements the
    /// run unlocked (including Persistence).
    ///
    /// Every store is updated even if an earlier one fails to save; the first
    /// save error is returned after all of them have been tried.
    pub fn record_run(&mut self, stats: &RunStats) -> Result<RecordOutcome> {
        let mut outcome = RecordOutcome {
            new_high: stats.score > self.scores.board().entry(stats.mode).high,
            ..RecordOutcome::default()
        };
        let mut failure: Option<anyhow::Error> = None;
        let mut note = |store: &'static str, err: anyhow::Error| {
            tracing::warn!(store, error = %format!("{err:#}"), "could not save run");
            failure.get_or_insert(err);
        };

        if let Err(err) = self.scores.record(stats.mode, stats.score) {
            note("scores", err);
        }
        for a in &stats.achievements {
            match self.achievements.add(*a) {
                Ok(true) => outcome.unlocked.push(*a),
                Ok(false) => {}
                Err(err) => note("achievements", err),
            }
        }
        match self.achievements.record_game(stats.score) {
            Ok(true) => outcome.unlocked.push(Achievement::Persistence),
            Ok(false) => {}
            Err(err) => note("achievements", err),
        }

        tracing::info!(
            mode = stats.mode.as_str(),
            score = stats.score,
            new_high = outcome.new_high,
            "run recorded"
        );
        match failure {
            Some(err) => Err(err),
            None => Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Difficulty, Mode};
    use std::time::Duration;

    fn run(mode: Mode, score: u32, achievements: Vec<Achievement>) -> RunStats {
        RunStats {
            mode,
            difficulty: Difficulty::Normal,
            score,
            food_eaten: score / 10,
            power_ups: 0,
            power_downs: 0,
            collisions: 1,
            max_length: 3 + (score / 10) as usize,
            duration: Duration::from_secs(30),
            time_up: false,
            won: false,
            achievements,
        }
    }

    #[test]
    fn record_run_updates_every_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut records = Records::open(dir.path());

        let out = records
            .record_run(&run(Mode::Classic, 150, vec![Achievement::LongSnake]))
            .unwrap();
        assert!(out.new_high);
        assert_eq!(out.unlocked, vec![Achievement::LongSnake]);

        let out = records
            .record_run(&run(Mode::Classic, 90, vec![Achievement::LongSnake]))
            .unwrap();
        assert!(!out.new_high);
        assert!(out.unlocked.is_empty());

        let reopened = Records::open(dir.path());
        assert_eq!(reopened.scores.board().classic.high, 150);
        assert_eq!(reopened.scores.board().classic.last, 90);
        assert_eq!(reopened.achievements.book().total_games, 2);
        assert!(reopened
            .achievements
            .book()
            .is_unlocked(Achievement::LongSnake));
    }

    #[test]
    fn score_save_failure_still_counts_the_game() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the score file makes every score save fail.
        std::fs::create_dir(dir.path().join(crate::paths::SCORES_FILE)).unwrap();
        let mut records = Records::open(dir.path());

        let result = records.record_run(&run(Mode::Classic, 60, vec![Achievement::LongSnake]));
        assert!(result.is_err());
        assert_eq!(records.scores.board().classic.high, 60);

        let reopened = Records::open(dir.path());
        let book = reopened.achievements.book();
        assert_eq!(book.total_games, 1);
        assert_eq!(book.best_score, 60);
        assert!(book.is_unlocked(Achievement::LongSnake));
    }

    #[test]
    fn tenth_run_reports_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let mut records = Records::open(dir.path());
        for _ in 0..9 {
            let out = records.record_run(&run(Mode::Survival, 20, vec![])).unwrap();
            assert!(!out.unlocked.contains(&Achievement::Persistence));
        }
        let out = records.record_run(&run(Mode::Survival, 20, vec![])).unwrap();
        assert_eq!(out.unlocked, vec![Achievement::Persistence]);
    }
}
