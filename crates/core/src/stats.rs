use std::time::Duration;

use crate::types::{Achievement, Difficulty, Mode};

/// Summary of a finished (or in-progress) run.
///
/// `duration` is the accumulated simulation time; `won` is set only when a Time
/// Attack run survives to the limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub score: u32,
    pub food_eaten: u32,
    pub power_ups: u32,
    pub power_downs: u32,
    pub collisions: u32,
    pub max_length: usize,
    pub duration: Duration,
    pub time_up: bool,
    pub won: bool,
    /// Achievements unlocked during this run, in declaration order.
    pub achievements: Vec<Achievement>,
}

impl RunStats {
    pub fn power_items(&self) -> u32 {
        self.power_ups + self.power_downs
    }
}
