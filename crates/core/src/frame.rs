use std::fmt;

use crate::types::{Direction, Mode, PLAY_HEIGHT, PLAY_WIDTH};

pub const FRAME_W: usize = PLAY_WIDTH as usize;
pub const FRAME_H: usize = PLAY_HEIGHT as usize;

/// Contents of one interior cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Head,
    Body,
    Food,
    PowerUp,
    PowerDown,
}

/// Mode-specific status text shown under the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLine {
    Classic { lives: u8, elapsed_secs: u64 },
    TimeAttack { remaining_secs: u64 },
    Survival { elapsed_secs: u64 },
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Classic {
                lives,
                elapsed_secs,
            } => write!(f, "Lives: {} | Time: {}s", lives, elapsed_secs),
            StatusLine::TimeAttack { remaining_secs } => {
                write!(f, "Time Left: {}s", remaining_secs)
            }
            StatusLine::Survival { elapsed_secs } => write!(f, "Survived: {}s", elapsed_secs),
        }
    }
}

/// Read-only picture of a [`crate::GameState`], row-major over the interior.
///
/// `cells[y][x]` is the board cell `(x + 1, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub cells: [[CellKind; FRAME_W]; FRAME_H],
    pub mode: Mode,
    pub score: u32,
    pub length: usize,
    pub direction: Direction,
    pub elapsed_ms: u64,
    pub status: StatusLine,
    pub game_over: bool,
    pub time_up: bool,
}

impl Frame {
    pub fn clear(&mut self) {
        self.cells = [[CellKind::Empty; FRAME_W]; FRAME_H];
        self.score = 0;
        self.length = 0;
        self.elapsed_ms = 0;
        self.game_over = false;
        self.time_up = false;
    }

    /// Cell at board coordinates; `None` outside the interior.
    pub fn at(&self, x: i16, y: i16) -> Option<CellKind> {
        if x < 1 || y < 1 {
            return None;
        }
        self.cells
            .get((y - 1) as usize)
            .and_then(|row| row.get((x - 1) as usize))
            .copied()
    }

    /// Top-line text, e.g. `Score: 40 | Lives: 2 | Time: 31s`.
    pub fn status_text(&self) -> String {
        format!("Score: {} | {}", self.score, self.status)
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| **c == kind)
            .count()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            cells: [[CellKind::Empty; FRAME_W]; FRAME_H],
            mode: Mode::Classic,
            score: 0,
            length: 0,
            direction: Direction::Right,
            elapsed_ms: 0,
            status: StatusLine::Classic {
                lives: 0,
                elapsed_secs: 0,
            },
            game_over: false,
            time_up: false,
        }
    }
}
