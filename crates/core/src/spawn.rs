//! Item placement by rejection sampling
//!
//! Draws uniform interior coordinates until one is free. Sampling is bounded;
//! after `MAX_SAMPLES` misses a row-major scan finds any free cell, and only a
//! completely full board is reported as an error.

use std::fmt;

use rand::Rng;

use crate::types::{Point, PLAY_HEIGHT, PLAY_WIDTH};

/// Random draws before falling back to a scan.
pub const MAX_SAMPLES: u32 = 1024;

/// No free interior cell remained for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    BoardFull,
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::BoardFull => write!(f, "no free cell left to place an item"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Pick a free interior cell. `occupied` returns true for cells that must be avoided.
pub fn spawn_free<R: Rng + ?Sized>(
    rng: &mut R,
    occupied: impl Fn(Point) -> bool,
) -> Result<Point, SpawnError> {
    for _ in 0..MAX_SAMPLES {
        let p = Point::new(rng.gen_range(1..=PLAY_WIDTH), rng.gen_range(1..=PLAY_HEIGHT));
        if !occupied(p) {
            return Ok(p);
        }
    }

    tracing::debug!("rejection sampling exhausted, scanning for a free cell");
    for y in 1..=PLAY_HEIGHT {
        for x in 1..=PLAY_WIDTH {
            let p = Point::new(x, y);
            if !occupied(p) {
                return Ok(p);
            }
        }
    }

    Err(SpawnError::BoardFull)
}
