//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (core simulation, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! The board is a fixed grid with a one-cell wall border:
//!
//! - **Width**: 40 columns (indexed 0-39, walls at 0 and 39)
//! - **Height**: 20 rows (indexed 0-19, walls at 0 and 19)
//! - **Playable interior**: x in 1..=38, y in 1..=18
//!
//! # Mode Rules
//!
//! | Mode | Food | Power-up | Power-down | Lives | Ends when |
//! |------|------|----------|------------|-------|-----------|
//! | Classic | 10 | 20 | 5 | 3 | last life lost |
//! | Time Attack | 15 | 25 | 7 | 1 | collision or 60s elapsed |
//! | Survival | 20 | 30 | 10 | 1 | collision |
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_TICK_DELAY_MS` | 20 | Floor for the per-tick delay |
//! | `TIME_ATTACK_LIMIT_SECS` | 60 | Time Attack countdown |
//! | `LIFE_LOST_PAUSE_MS` | 1000 | Pause after losing a Classic life |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, Mode, Point, PLAY_WIDTH};
//!
//! let head = Point::new(5, 5);
//! assert_eq!(head.step(Direction::Up), Point::new(5, 4));
//!
//! assert!(Direction::Left.is_opposite(Direction::Right));
//! assert_eq!(Mode::from_str("time_attack"), Some(Mode::TimeAttack));
//! assert_eq!(PLAY_WIDTH, 38);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells, walls included (40 columns)
pub const BOARD_WIDTH: i16 = 40;

/// Board height in cells, walls included (20 rows)
pub const BOARD_HEIGHT: i16 = 20;

/// Playable interior width (board minus the two wall columns)
pub const PLAY_WIDTH: i16 = BOARD_WIDTH - 2;

/// Playable interior height (board minus the two wall rows)
pub const PLAY_HEIGHT: i16 = BOARD_HEIGHT - 2;

/// Snake length after every reset; power-downs never shrink below it.
pub const START_LENGTH: usize = 3;

/// Lives granted at the start of a Classic run.
pub const CLASSIC_LIVES: u8 = 3;

/// Time Attack countdown in seconds.
pub const TIME_ATTACK_LIMIT_SECS: u64 = 60;

/// Floor for the tick delay (20ms).
pub const MIN_TICK_DELAY_MS: u64 = 20;

/// Delay multiplier applied per food when gradual speed-up is on.
pub const SPEEDUP_FACTOR: f64 = 0.98;

/// Survival speeds up faster.
pub const SURVIVAL_SPEEDUP_FACTOR: f64 = 0.97;

/// Per-tick chance of spawning a power item while none is live.
pub const POWER_ITEM_CHANCE: f64 = 0.1;

/// Pause shown after a Classic life is lost.
pub const LIFE_LOST_PAUSE_MS: u64 = 1000;

/// Consecutive foods needed for Food Frenzy.
pub const FOOD_FRENZY_STREAK: u32 = 10;

/// Length needed for Long Snake.
pub const LONG_SNAKE_LENGTH: usize = 15;

/// Survival seconds needed for Marathon.
pub const MARATHON_SECS: u64 = 300;

/// Time Attack score needed for Combo Master.
pub const COMBO_MASTER_SCORE: u32 = 500;

/// Classic/Hard score needed for Speed Demon.
pub const SPEED_DEMON_SCORE: u32 = 200;

/// Lifetime completed games needed for Persistence.
pub const PERSISTENCE_GAMES: u32 = 10;


/// A grid coordinate. Signed so a step past the wall is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring point one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the point lies inside the walls.
    pub fn is_interior(self) -> bool {
        (1..=PLAY_WIDTH).contains(&self.x) && (1..=PLAY_HEIGHT).contains(&self.y)
    }

    /// Map a point that stepped over a wall back into the interior (toroidal board).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::{Point, PLAY_WIDTH};
    ///
    /// assert_eq!(Point::new(0, 5).wrapped(), Point::new(PLAY_WIDTH, 5));
    /// assert_eq!(Point::new(PLAY_WIDTH + 1, 5).wrapped(), Point::new(1, 5));
    /// ```
    pub fn wrapped(self) -> Self {
        Self {
            x: (self.x - 1).rem_euclid(PLAY_WIDTH) + 1,
            y: (self.y - 1).rem_euclid(PLAY_HEIGHT) + 1,
        }
    }
}

/// Movement direction in screen coordinates (Up is -y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta `(dx, dy)`.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The exact reverse direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Game modes.
///
/// - **Classic**: three lives, the board resets on each lost life
/// - **TimeAttack**: one life, 60 second countdown, finishing the clock is a win
/// - **Survival**: one life, speeds up faster and scores more per food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Classic,
    TimeAttack,
    Survival,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Classic, Mode::TimeAttack, Mode::Survival];

    /// Parse a mode (case-insensitive, `-` and `_` interchangeable)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Mode;
    ///
    /// assert_eq!(Mode::from_str("classic"), Some(Mode::Classic));
    /// assert_eq!(Mode::from_str("Time-Attack"), Some(Mode::TimeAttack));
    /// assert_eq!(Mode::from_str("arcade"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "classic" => Some(Mode::Classic),
            "time_attack" | "timeattack" => Some(Mode::TimeAttack),
            "survival" => Some(Mode::Survival),
            _ => None,
        }
    }

    /// Snake-case key used in files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::TimeAttack => "time_attack",
            Mode::Survival => "survival",
        }
    }

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::TimeAttack => "Time Attack",
            Mode::Survival => "Survival",
        }
    }

    pub fn starting_lives(&self) -> u8 {
        match self {
            Mode::Classic => CLASSIC_LIVES,
            Mode::TimeAttack | Mode::Survival => 1,
        }
    }

    /// Whether the wall-wrap setting is honoured in this mode.
    ///
    /// Time Attack always has solid walls so timed scores stay comparable.
    pub fn allows_wall_wrap(&self) -> bool {
        !matches!(self, Mode::TimeAttack)
    }
}

/// Power item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerKind {
    /// Bonus points
    PowerUp,
    /// Point penalty and one segment shorter (never below the start length)
    PowerDown,
}

/// Achievements that can be unlocked.
///
/// Serialized by display name, which is also the key in the achievements file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    #[serde(rename = "Food Frenzy")]
    FoodFrenzy,
    #[serde(rename = "Long Snake")]
    LongSnake,
    #[serde(rename = "Marathon")]
    Marathon,
    #[serde(rename = "Combo Master")]
    ComboMaster,
    #[serde(rename = "Speed Demon")]
    SpeedDemon,
    #[serde(rename = "Persistence")]
    Persistence,
}

impl Achievement {
    pub const ALL: [Achievement; 6] = [
        Achievement::FoodFrenzy,
        Achievement::LongSnake,
        Achievement::Marathon,
        Achievement::ComboMaster,
        Achievement::SpeedDemon,
        Achievement::Persistence,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FoodFrenzy => "Food Frenzy",
            Achievement::LongSnake => "Long Snake",
            Achievement::Marathon => "Marathon",
            Achievement::ComboMaster => "Combo Master",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::Persistence => "Persistence",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FoodFrenzy => "Eat 10 food items consecutively without missing.",
            Achievement::LongSnake => "Grow your snake to 15 segments.",
            Achievement::Marathon => "Survive 5 minutes in Survival mode.",
            Achievement::ComboMaster => "Score at least 500 points in Time Attack mode.",
            Achievement::SpeedDemon => {
                "Score at least 200 points in a Classic game on Hard difficulty."
            }
            Achievement::Persistence => "Play 10 or more games in total.",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Bit used by per-run latches.
    pub fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

/// Snake speed tier (base tick delay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SpeedTier {
    pub fn base_delay_ms(&self) -> u64 {
        match self {
            SpeedTier::Slow => 200,
            SpeedTier::Normal => 100,
            SpeedTier::Fast => 50,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedTier::Slow => "Slow",
            SpeedTier::Normal => "Normal",
            SpeedTier::Fast => "Fast",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SpeedTier::Slow => SpeedTier::Normal,
            SpeedTier::Normal => SpeedTier::Fast,
            SpeedTier::Fast => SpeedTier::Slow,
        }
    }
}

/// Difficulty tier (multiplies the base delay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn delay_factor(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.25,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.75,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Background colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Default,
    Blue,
    Red,
    Green,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Default => "Default",
            Theme::Blue => "Blue",
            Theme::Red => "Red",
            Theme::Green => "Green",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Theme::Default => Theme::Blue,
            Theme::Blue => Theme::Red,
            Theme::Red => Theme::Green,
            Theme::Green => Theme::Default,
        }
    }
}

/// Gameplay settings, read by the core on every reset.
///
/// Missing fields deserialize to their defaults; unknown tier names are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shrink the tick delay a little on every food.
    pub gradual_speedup: bool,
    pub speed: SpeedTier,
    pub difficulty: Difficulty,
    pub theme: Theme,
    /// Toroidal walls (Classic and Survival only).
    pub wall_wrap: bool,
    /// Every direction key moves the opposite way.
    pub invert_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gradual_speedup: true,
            speed: SpeedTier::Normal,
            difficulty: Difficulty::Normal,
            theme: Theme::Default,
            wall_wrap: false,
            invert_controls: false,
        }
    }
}

impl Settings {
    /// Starting tick delay in milliseconds (speed x difficulty, floored).
    pub fn initial_delay_ms(&self) -> u64 {
        let ms = self.speed.base_delay_ms() as f64 * self.difficulty.delay_factor();
        (ms.round() as u64).max(MIN_TICK_DELAY_MS)
    }
}

/// Player commands produced by input mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request a new heading
    Turn(Direction),
    /// Leave the current run
    Quit,
}

/// Fire-and-forget sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Eat,
    PowerUp,
    PowerDown,
    GameOver,
}

impl Effect {
    /// Asset file name under the assets directory
    pub fn asset_name(&self) -> &'static str {
        match self {
            Effect::Eat => "eat.wav",
            Effect::PowerUp => "power-up.wav",
            Effect::PowerDown => "power-down.wav",
            Effect::GameOver => "game-over.wav",
        }
    }
}
