//! Last and best score per mode, plus combined sums.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::paths::{load_or_default, write_json_atomic, SCORES_FILE};
use crate::types::Mode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub last: u32,
    pub high: u32,
}

/// On disk as `{"classic": {"last": 0, "high": 0}, ..., "combined": {...}}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBoard {
    pub classic: ScoreEntry,
    pub time_attack: ScoreEntry,
    pub survival: ScoreEntry,
    /// Sums of the three modes' `last` and `high`.
    pub combined: ScoreEntry,
}

impl ScoreBoard {
    pub fn entry(&self, mode: Mode) -> ScoreEntry {
        match mode {
            Mode::Classic => self.classic,
            Mode::TimeAttack => self.time_attack,
            Mode::Survival => self.survival,
        }
    }

    fn entry_mut(&mut self, mode: Mode) -> &mut ScoreEntry {
        match mode {
            Mode::Classic => &mut self.classic,
            Mode::TimeAttack => &mut self.time_attack,
            Mode::Survival => &mut self.survival,
        }
    }

    /// Record a finished run. Returns `true` on a new high score for `mode`.
    pub fn record(&mut self, mode: Mode, score: u32) -> bool {
        let entry = self.entry_mut(mode);
        entry.last = score;
        let is_high = score > entry.high;
        if is_high {
            entry.high = score;
        }

        let modes = [self.classic, self.time_attack, self.survival];
        self.combined = ScoreEntry {
            last: modes.iter().map(|e| e.last).fold(0, u32::saturating_add),
            high: modes.iter().map(|e| e.high).fold(0, u32::saturating_add),
        };
        is_high
    }
}

#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
    board: ScoreBoard,
}

impl ScoreStore {
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(SCORES_FILE);
        let board = load_or_default(&path);
        Self { path, board }
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    /// Record and save. Returns `true` on a new high score.
    pub fn record(&mut self, mode: Mode, score: u32) -> Result<bool> {
        let is_high = self.board.record(mode, score);
        write_json_atomic(&self.path, &self.board)?;
        Ok(is_high)
    }
}
