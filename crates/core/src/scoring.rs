//! Scoring module - per-mode point tables and tick-delay policy
//!
//! | Mode | Food | Power-up | Power-down |
//! |------|------|----------|------------|
//! | Classic | 10 | 20 | -5 |
//! | Time Attack | 15 | 25 | -7 |
//! | Survival | 20 | 30 | -10 |

use std::time::Duration;

use crate::types::{
    Mode, Settings, MIN_TICK_DELAY_MS, SPEEDUP_FACTOR, SURVIVAL_SPEEDUP_FACTOR,
};

/// Points for eating food
pub fn food_points(mode: Mode) -> u32 {
    match mode {
        Mode::Classic => 10,
        Mode::TimeAttack => 15,
        Mode::Survival => 20,
    }
}

/// Bonus for collecting a power-up
pub fn power_up_points(mode: Mode) -> u32 {
    match mode {
        Mode::Classic => 20,
        Mode::TimeAttack => 25,
        Mode::Survival => 30,
    }
}

/// Penalty for collecting a power-down (applied with saturation at 0)
pub fn power_down_penalty(mode: Mode) -> u32 {
    match mode {
        Mode::Classic => 5,
        Mode::TimeAttack => 7,
        Mode::Survival => 10,
    }
}

/// Per-food delay multiplier
pub fn speedup_factor(mode: Mode) -> f64 {
    match mode {
        Mode::Survival => SURVIVAL_SPEEDUP_FACTOR,
        Mode::Classic | Mode::TimeAttack => SPEEDUP_FACTOR,
    }
}

pub fn min_tick_delay() -> Duration {
    Duration::from_millis(MIN_TICK_DELAY_MS)
}

/// Tick delay at the start of a life
pub fn initial_delay(settings: &Settings) -> Duration {
    Duration::from_millis(settings.initial_delay_ms())
}

/// Delay after one food, floored at [`min_tick_delay`].
///
/// Never increases: a delay already at the floor stays there.
pub fn decayed_delay(delay: Duration, mode: Mode) -> Duration {
    let nanos = (delay.as_nanos() as f64 * speedup_factor(mode)).round() as u64;
    Duration::from_nanos(nanos).max(min_tick_delay()).min(delay)
}
