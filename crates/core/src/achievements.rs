//! Per-tick achievement triggers with a per-run latch.
//!
//! Persistence is a lifetime statistic and is evaluated by the stats store, not here.

use std::time::Duration;

use crate::types::{
    Achievement, Difficulty, Mode, COMBO_MASTER_SCORE, FOOD_FRENZY_STREAK, LONG_SNAKE_LENGTH,
    MARATHON_SECS, SPEED_DEMON_SCORE,
};

/// Counters the triggers look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerInput {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub score: u32,
    pub length: usize,
    pub consecutive_food: u32,
    pub elapsed: Duration,
}

/// Whether `achievement` is satisfied right now.
pub fn is_triggered(achievement: Achievement, input: &TriggerInput) -> bool {
    match achievement {
        Achievement::FoodFrenzy => input.consecutive_food >= FOOD_FRENZY_STREAK,
        Achievement::LongSnake => input.length >= LONG_SNAKE_LENGTH,
        Achievement::Marathon => {
            input.mode == Mode::Survival && input.elapsed >= Duration::from_secs(MARATHON_SECS)
        }
        Achievement::ComboMaster => {
            input.mode == Mode::TimeAttack && input.score >= COMBO_MASTER_SCORE
        }
        Achievement::SpeedDemon => {
            input.mode == Mode::Classic
                && input.difficulty == Difficulty::Hard
                && input.score >= SPEED_DEMON_SCORE
        }
        Achievement::Persistence => false,
    }
}

/// "Already unlocked this run" set, one bit per achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AchievementLatch {
    bits: u8,
}

impl AchievementLatch {
    pub fn contains(&self, a: Achievement) -> bool {
        self.bits & a.bit() != 0
    }

    /// Set the latch. Returns `true` only the first time.
    pub fn insert(&mut self, a: Achievement) -> bool {
        let fresh = !self.contains(a);
        self.bits |= a.bit();
        fresh
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Achievement> + '_ {
        Achievement::ALL.into_iter().filter(|a| self.contains(*a))
    }

    /// Evaluate all triggers and latch the ones that fire, calling `on_unlock`
    /// for each newly latched achievement.
    pub fn evaluate(&mut self, input: &TriggerInput, mut on_unlock: impl FnMut(Achievement)) {
        for a in Achievement::ALL {
            if !self.contains(a) && is_triggered(a, input) {
                self.insert(a);
                on_unlock(a);
            }
        }
    }
}
