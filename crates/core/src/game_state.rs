//! Game state module - manages the complete game state
//!
//! This module ties together the snake, item spawning, scoring, and achievement
//! triggers. It advances the simulation one discrete step per [`GameState::advance`]
//! call and produces [`Frame`]s for rendering. No I/O happens here; time enters
//! only as the `dt` passed to `advance`.

use std::time::Duration;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::achievements::{AchievementLatch, TriggerInput};
use crate::frame::{CellKind, Frame, StatusLine};
use crate::scoring::{
    decayed_delay, food_points, initial_delay, power_down_penalty, power_up_points,
};
use crate::snake::Snake;
use crate::spawn::{spawn_free, SpawnError};
use crate::stats::RunStats;
use crate::types::*;

/// Events recorded per tick; sized well above the worst case (one item event,
/// five achievements, one terminal event).
const MAX_EVENTS: usize = 16;

/// Live power item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowerItem {
    pub pos: Point,
    pub kind: PowerKind,
}

/// Outcome of one [`GameState::advance`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// Normal tick; keep going
    Continue,
    /// Classic only: a life was spent and the board was reset, score kept
    LifeLost { lives_left: u8 },
    /// The run is over; final statistics attached
    GameOver(RunStats),
}

impl StepResult {
    pub fn is_game_over(&self) -> bool {
        matches!(self, StepResult::GameOver(_))
    }
}

/// Side effects of the last tick, for audio and achievement reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AteFood,
    PowerUp,
    PowerDown,
    PowerItemSpawned(PowerKind),
    AchievementUnlocked(Achievement),
    LifeLost,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    mode: Mode,
    settings: Settings,
    rng: StdRng,
    snake: Snake,
    food: Point,
    power_item: Option<PowerItem>,
    score: u32,
    lives: u8,
    /// Current tick delay; shrinks on food when gradual speed-up is enabled.
    delay: Duration,
    /// Run time accumulated from `advance(dt)`; survives lost lives.
    elapsed: Duration,
    /// Foods eaten without a non-food move in between (resets per life).
    consecutive_food: u32,
    food_eaten: u32,
    power_ups: u32,
    power_downs: u32,
    collisions: u32,
    max_length: usize,
    time_up: bool,
    over: bool,
    latch: AchievementLatch,
    events: ArrayVec<GameEvent, MAX_EVENTS>,
}

impl GameState {
    /// Create a game for `mode`, drawing all randomness from `rng`.
    pub fn new(mode: Mode, settings: Settings, rng: StdRng) -> Result<Self, SpawnError> {
        let mut state = Self {
            mode,
            settings,
            rng,
            snake: Snake::new(start_point(), Direction::Right, START_LENGTH),
            food: Point::default(),
            power_item: None,
            score: 0,
            lives: mode.starting_lives(),
            delay: initial_delay(&settings),
            elapsed: Duration::ZERO,
            consecutive_food: 0,
            food_eaten: 0,
            power_ups: 0,
            power_downs: 0,
            collisions: 0,
            max_length: START_LENGTH,
            time_up: false,
            over: false,
            latch: AchievementLatch::default(),
            events: ArrayVec::new(),
        };
        state.reset(false)?;
        Ok(state)
    }

    /// Create a game with a seeded RNG.
    pub fn with_seed(mode: Mode, settings: Settings, seed: u64) -> Result<Self, SpawnError> {
        Self::new(mode, settings, StdRng::seed_from_u64(seed))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn power_item(&self) -> Option<PowerItem> {
        self.power_item
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn consecutive_food(&self) -> u32 {
        self.consecutive_food
    }

    pub fn time_up(&self) -> bool {
        self.time_up
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Events recorded by the most recent `advance`.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Whether heads leaving the interior re-enter on the opposite side.
    pub fn wraps(&self) -> bool {
        self.settings.wall_wrap && self.mode.allows_wall_wrap()
    }

    /// Reinitialize the board.
    ///
    /// Always: centred length-3 snake heading right, no power item, fresh food,
    /// tick delay from settings, consecutive-food counter cleared.
    /// With `preserve_score == false` the whole run restarts (score, lives, clock,
    /// run counters, achievement latch).
    pub fn reset(&mut self, preserve_score: bool) -> Result<(), SpawnError> {
        if !preserve_score {
            self.score = 0;
            self.lives = self.mode.starting_lives();
            self.elapsed = Duration::ZERO;
            self.food_eaten = 0;
            self.power_ups = 0;
            self.power_downs = 0;
            self.collisions = 0;
            self.max_length = START_LENGTH;
            self.time_up = false;
            self.over = false;
            self.latch.clear();
        }

        self.snake = Snake::new(start_point(), Direction::Right, START_LENGTH);
        self.power_item = None;
        self.consecutive_food = 0;
        self.delay = initial_delay(&self.settings);

        let snake = &self.snake;
        self.food = spawn_free(&mut self.rng, |p| snake.contains(p))?;
        Ok(())
    }

    /// Request a new heading. Inversion is applied first; reversals are ignored.
    pub fn set_direction(&mut self, candidate: Direction) {
        let dir = if self.settings.invert_controls {
            candidate.opposite()
        } else {
            candidate
        };
        self.snake.turn(dir);
    }

    /// Advance the simulation by one step. `dt` is the time since the previous step.
    pub fn advance(&mut self, dt: Duration) -> Result<StepResult, SpawnError> {
        self.events.clear();
        if self.over {
            return Ok(StepResult::GameOver(self.run_stats()));
        }
        self.elapsed += dt;

        // Walls first, then the body check against the (possibly wrapped) head.
        let mut head = self.snake.next_head();
        if !head.is_interior() {
            if !self.wraps() {
                return self.collide();
            }
            head = head.wrapped();
        }
        if self.snake.contains(head) {
            return self.collide();
        }

        self.snake.push_head(head);
        if head == self.food {
            self.eat_food()?;
        } else {
            self.snake.pop_tail();
            self.consecutive_food = 0;
        }

        if let Some(item) = self.power_item.filter(|item| item.pos == head) {
            self.power_item = None;
            self.collect(item.kind);
        }
        self.max_length = self.max_length.max(self.snake.len());

        self.maybe_spawn_power_item()?;
        self.evaluate_achievements();

        if self.mode == Mode::TimeAttack
            && self.elapsed >= Duration::from_secs(TIME_ATTACK_LIMIT_SECS)
        {
            self.time_up = true;
            self.over = true;
            self.push_event(GameEvent::GameOver);
            return Ok(StepResult::GameOver(self.run_stats()));
        }

        Ok(StepResult::Continue)
    }

    fn eat_food(&mut self) -> Result<(), SpawnError> {
        self.score = self.score.saturating_add(food_points(self.mode));
        self.food_eaten += 1;
        self.consecutive_food += 1;
        self.push_event(GameEvent::AteFood);

        let snake = &self.snake;
        let item = self.power_item.map(|i| i.pos);
        self.food = spawn_free(&mut self.rng, |p| snake.contains(p) || Some(p) == item)?;

        if self.settings.gradual_speedup {
            self.delay = decayed_delay(self.delay, self.mode);
        }
        Ok(())
    }

    fn collect(&mut self, kind: PowerKind) {
        match kind {
            PowerKind::PowerUp => {
                self.score = self.score.saturating_add(power_up_points(self.mode));
                self.power_ups += 1;
                self.push_event(GameEvent::PowerUp);
            }
            PowerKind::PowerDown => {
                self.score = self.score.saturating_sub(power_down_penalty(self.mode));
                if self.snake.len() > START_LENGTH {
                    self.snake.pop_tail();
                }
                self.power_downs += 1;
                self.push_event(GameEvent::PowerDown);
            }
        }
    }

    fn maybe_spawn_power_item(&mut self) -> Result<(), SpawnError> {
        if self.power_item.is_some() || !self.rng.gen_bool(POWER_ITEM_CHANCE) {
            return Ok(());
        }
        let kind = if self.rng.gen_bool(0.5) {
            PowerKind::PowerUp
        } else {
            PowerKind::PowerDown
        };
        let snake = &self.snake;
        let food = self.food;
        let pos = spawn_free(&mut self.rng, |p| snake.contains(p) || p == food)?;
        self.power_item = Some(PowerItem { pos, kind });
        self.push_event(GameEvent::PowerItemSpawned(kind));
        Ok(())
    }

    fn evaluate_achievements(&mut self) {
        let input = TriggerInput {
            mode: self.mode,
            difficulty: self.settings.difficulty,
            score: self.score,
            length: self.snake.len(),
            consecutive_food: self.consecutive_food,
            elapsed: self.elapsed,
        };
        let events = &mut self.events;
        self.latch.evaluate(&input, |a| {
            tracing::debug!(achievement = a.name(), "achievement unlocked");
            let _ = events.try_push(GameEvent::AchievementUnlocked(a));
        });
    }

    /// Fatal collision: spend a Classic life if one is left, otherwise end the run.
    /// Score is never touched here.
    fn collide(&mut self) -> Result<StepResult, SpawnError> {
        self.collisions += 1;

        if self.mode == Mode::Classic && self.lives > 1 {
            self.lives -= 1;
            self.push_event(GameEvent::LifeLost);
            self.reset(true)?;
            return Ok(StepResult::LifeLost {
                lives_left: self.lives,
            });
        }

        self.lives = self.lives.saturating_sub(1);
        self.over = true;
        self.push_event(GameEvent::GameOver);
        Ok(StepResult::GameOver(self.run_stats()))
    }

    fn push_event(&mut self, event: GameEvent) {
        let _ = self.events.try_push(event);
    }

    /// Statistics for the run so far.
    pub fn run_stats(&self) -> RunStats {
        RunStats {
            mode: self.mode,
            difficulty: self.settings.difficulty,
            score: self.score,
            food_eaten: self.food_eaten,
            power_ups: self.power_ups,
            power_downs: self.power_downs,
            collisions: self.collisions,
            max_length: self.max_length,
            duration: self.elapsed,
            time_up: self.time_up,
            won: self.time_up,
            achievements: self.latch.iter().collect(),
        }
    }

    pub fn render_into(&self, out: &mut Frame) {
        out.clear();

        let mut put = |p: Point, kind: CellKind| {
            if p.is_interior() {
                out.cells[(p.y - 1) as usize][(p.x - 1) as usize] = kind;
            }
        };
        put(self.food, CellKind::Food);
        if let Some(item) = self.power_item {
            let kind = match item.kind {
                PowerKind::PowerUp => CellKind::PowerUp,
                PowerKind::PowerDown => CellKind::PowerDown,
            };
            put(item.pos, kind);
        }
        for p in self.snake.segments().skip(1) {
            put(p, CellKind::Body);
        }
        put(self.snake.head(), CellKind::Head);

        out.mode = self.mode;
        out.score = self.score;
        out.length = self.snake.len();
        out.direction = self.snake.direction();
        out.elapsed_ms = self.elapsed.as_millis() as u64;
        out.game_over = self.over;
        out.time_up = self.time_up;
        out.status = match self.mode {
            Mode::Classic => StatusLine::Classic {
                lives: self.lives,
                elapsed_secs: self.elapsed.as_secs(),
            },
            Mode::TimeAttack => StatusLine::TimeAttack {
                remaining_secs: Duration::from_secs(TIME_ATTACK_LIMIT_SECS)
                    .saturating_sub(self.elapsed)
                    .as_secs(),
            },
            Mode::Survival => StatusLine::Survival {
                elapsed_secs: self.elapsed.as_secs(),
            },
        };
    }

    pub fn render(&self) -> Frame {
        let mut f = Frame::default();
        self.render_into(&mut f);
        f
    }
}

fn start_point() -> Point {
    Point::new(BOARD_WIDTH / 2, BOARD_HEIGHT / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    fn new_state(mode: Mode) -> GameState {
        GameState::with_seed(mode, Settings::default(), 12345).unwrap()
    }

    /// Put food directly ahead of the head and clear any power item.
    fn food_ahead(state: &mut GameState) {
        state.power_item = None;
        state.food = state.snake.next_head();
    }

    /// Park food in a corner away from the snake's path.
    fn food_elsewhere(state: &mut GameState) {
        state.food = Point::new(1, 1);
    }

    fn assert_disjoint(state: &GameState) {
        assert!(!state.snake.contains(state.food), "food on snake");
        if let Some(item) = state.power_item {
            assert!(!state.snake.contains(item.pos), "item on snake");
            assert_ne!(item.pos, state.food, "item on food");
            assert!(item.pos.is_interior());
        }
        assert!(state.food.is_interior());
    }

    #[test]
    fn test_reset_centres_snake() {
        let state = new_state(Mode::Classic);
        let segs: Vec<_> = state.snake.segments().collect();
        assert_eq!(
            segs,
            vec![Point::new(20, 10), Point::new(19, 10), Point::new(18, 10)]
        );
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.lives, 3);
        assert_eq!(state.delay, Duration::from_millis(100));
        assert!(state.power_item.is_none());
        assert_disjoint(&state);
    }

    #[test]
    fn test_classic_food_scores_ten_and_grows() {
        let mut state = new_state(Mode::Classic);
        food_ahead(&mut state);
        let eaten_at = state.food;

        let result = state.advance(TICK).unwrap();

        assert_eq!(result, StepResult::Continue);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), eaten_at);
        assert_ne!(state.food, eaten_at);
        assert!(!state.snake.contains(state.food));
        assert!(state.events().contains(&GameEvent::AteFood));
    }

    #[test]
    fn test_food_points_per_mode() {
        for (mode, pts) in [(Mode::TimeAttack, 15), (Mode::Survival, 20)] {
            let mut state = new_state(mode);
            food_ahead(&mut state);
            state.advance(TICK).unwrap();
            assert_eq!(state.score, pts);
        }
    }

    #[test]
    fn test_move_without_food_keeps_length() {
        let mut state = new_state(Mode::Classic);
        food_elsewhere(&mut state);
        state.consecutive_food = 4;
        state.advance(TICK).unwrap();
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Point::new(21, 10));
        assert_eq!(state.consecutive_food, 0);
    }

    #[test]
    fn test_left_wall_without_wrap() {
        let mut state = new_state(Mode::Survival);
        state.score = 40;
        state.snake = Snake::new(Point::new(1, 5), Direction::Left, 3);
        state.food = Point::new(30, 15);
        state.power_item = None;

        let result = state.advance(TICK).unwrap();

        assert!(result.is_game_over());
        assert!(state.is_over());
        assert_eq!(state.score, 40);
        assert_eq!(state.snake.head(), Point::new(1, 5));
    }

    #[test]
    fn test_classic_wall_costs_a_life() {
        let mut state = new_state(Mode::Classic);
        state.score = 70;
        state.snake = Snake::new(Point::new(1, 5), Direction::Left, 3);
        state.food = Point::new(30, 15);
        state.power_item = None;

        let result = state.advance(TICK).unwrap();

        assert_eq!(result, StepResult::LifeLost { lives_left: 2 });
        assert_eq!(state.score, 70);
        assert_eq!(state.lives, 2);
        assert_eq!(state.snake.head(), Point::new(20, 10));
        assert_eq!(state.snake.len(), 3);
        assert!(!state.is_over());
        assert!(state.events().contains(&GameEvent::LifeLost));
    }

    #[test]
    fn test_classic_last_life_ends_game() {
        let mut state = new_state(Mode::Classic);
        state.lives = 1;
        state.snake = Snake::new(Point::new(1, 5), Direction::Left, 3);
        state.food = Point::new(30, 15);
        state.power_item = None;

        let result = state.advance(TICK).unwrap();
        match result {
            StepResult::GameOver(stats) => {
                assert!(!stats.won);
                assert_eq!(stats.collisions, 1);
            }
            other => panic!("expected game over, got {:?}", other),
        }
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_life_lost_only_in_classic() {
        for mode in [Mode::TimeAttack, Mode::Survival] {
            let mut state = new_state(mode);
            state.snake = Snake::new(Point::new(38, 5), Direction::Right, 3);
            state.food = Point::new(10, 15);
            state.power_item = None;
            assert!(state.advance(TICK).unwrap().is_game_over());
        }
    }

    #[test]
    fn test_self_collision() {
        let mut state = new_state(Mode::Survival);
        state.snake = Snake::new(Point::new(10, 10), Direction::Left, 5);
        // Up, right, then down runs the head back into its own body.
        state.food = Point::new(30, 3);
        state.power_item = None;
        state.set_direction(Direction::Up);
        assert_eq!(state.advance(TICK).unwrap(), StepResult::Continue);
        state.power_item = None;
        state.set_direction(Direction::Right);
        assert_eq!(state.advance(TICK).unwrap(), StepResult::Continue);
        state.power_item = None;
        state.set_direction(Direction::Down);
        // Head at (11,9) moving down hits (11,10).
        assert!(state.advance(TICK).unwrap().is_game_over());
    }

    #[test]
    fn test_wall_wrap_reenters_opposite_side() {
        let settings = Settings {
            wall_wrap: true,
            ..Settings::default()
        };
        let mut state = GameState::with_seed(Mode::Classic, settings, 3).unwrap();
        state.snake = Snake::new(Point::new(1, 5), Direction::Left, 3);
        state.food = Point::new(20, 15);
        state.power_item = None;

        assert_eq!(state.advance(TICK).unwrap(), StepResult::Continue);
        assert_eq!(state.snake.head(), Point::new(PLAY_WIDTH, 5));
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_wall_wrap_ignored_in_time_attack() {
        let settings = Settings {
            wall_wrap: true,
            ..Settings::default()
        };
        let mut state = GameState::with_seed(Mode::TimeAttack, settings, 3).unwrap();
        state.snake = Snake::new(Point::new(5, 1), Direction::Up, 3);
        state.food = Point::new(20, 15);
        state.power_item = None;
        assert!(state.advance(TICK).unwrap().is_game_over());
    }

    #[test]
    fn test_wrap_then_self_collision() {
        let settings = Settings {
            wall_wrap: true,
            ..Settings::default()
        };
        let mut state = GameState::with_seed(Mode::Survival, settings, 3).unwrap();
        // Snake spans the whole row so the wrapped head lands on its own tail.
        state.snake = Snake::new(
            Point::new(PLAY_WIDTH, 4),
            Direction::Right,
            PLAY_WIDTH as usize,
        );
        state.food = Point::new(20, 15);
        state.power_item = None;
        assert!(state.advance(TICK).unwrap().is_game_over());
    }

    #[test]
    fn test_reverse_direction_is_ignored() {
        let mut state = new_state(Mode::Classic);
        state.set_direction(Direction::Left);
        assert_eq!(state.snake.direction(), Direction::Right);
        state.set_direction(Direction::Left);
        assert_eq!(state.snake.direction(), Direction::Right);

        state.set_direction(Direction::Down);
        assert_eq!(state.snake.direction(), Direction::Down);
    }

    #[test]
    fn test_reverse_of_pending_direction_is_ignored() {
        let mut state = new_state(Mode::Classic);
        state.set_direction(Direction::Up);
        state.set_direction(Direction::Down);
        assert_eq!(state.snake.direction(), Direction::Up);

        state.food = Point::new(30, 3);
        state.power_item = None;
        assert_eq!(state.advance(TICK).unwrap(), StepResult::Continue);
        assert_eq!(state.snake.head(), Point::new(20, 9));
    }

    #[test]
    fn test_inverted_controls() {
        let settings = Settings {
            invert_controls: true,
            ..Settings::default()
        };
        let mut state = GameState::with_seed(Mode::Classic, settings, 1).unwrap();
        state.set_direction(Direction::Up);
        assert_eq!(state.snake.direction(), Direction::Down);
        // Inverted "right" is left, which is a reversal.
        state.set_direction(Direction::Right);
        assert_eq!(state.snake.direction(), Direction::Down);
    }

    #[test]
    fn test_power_up_bonus() {
        let mut state = new_state(Mode::Survival);
        state.food = Point::new(1, 1);
        state.power_item = Some(PowerItem {
            pos: state.snake.next_head(),
            kind: PowerKind::PowerUp,
        });
        state.advance(TICK).unwrap();
        assert_eq!(state.score, 30);
        assert_eq!(state.snake.len(), 3);
        assert!(state.events().contains(&GameEvent::PowerUp));
        assert_eq!(state.run_stats().power_ups, 1);
    }

    #[test]
    fn test_power_down_at_min_length() {
        let mut state = new_state(Mode::Classic);
        state.score = 3;
        state.food = Point::new(1, 1);
        state.power_item = Some(PowerItem {
            pos: state.snake.next_head(),
            kind: PowerKind::PowerDown,
        });

        state.advance(TICK).unwrap();

        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
        assert!(state.events().contains(&GameEvent::PowerDown));
    }

    #[test]
    fn test_power_down_shrinks_longer_snake() {
        let mut state = new_state(Mode::TimeAttack);
        state.snake = Snake::new(Point::new(20, 10), Direction::Right, 6);
        state.score = 100;
        state.food = Point::new(1, 1);
        state.power_item = Some(PowerItem {
            pos: state.snake.next_head(),
            kind: PowerKind::PowerDown,
        });

        state.advance(TICK).unwrap();

        assert_eq!(state.score, 93);
        assert_eq!(state.snake.len(), 5);
    }

    #[test]
    fn test_time_attack_ends_at_sixty_seconds() {
        let mut state = new_state(Mode::TimeAttack);
        state.food = Point::new(1, 1);
        state.elapsed = Duration::from_secs(TIME_ATTACK_LIMIT_SECS);

        let result = state.advance(Duration::ZERO).unwrap();

        match result {
            StepResult::GameOver(stats) => {
                assert!(stats.won);
                assert!(stats.time_up);
            }
            other => panic!("expected game over, got {:?}", other),
        }
        assert!(state.time_up());
    }

    #[test]
    fn test_time_attack_continues_before_limit() {
        let mut state = new_state(Mode::TimeAttack);
        state.food = Point::new(1, 1);
        state.elapsed = Duration::from_millis(59_800);
        assert_eq!(state.advance(TICK).unwrap(), StepResult::Continue);
        assert!(state.advance(TICK).unwrap().is_game_over());
    }

    #[test]
    fn test_food_frenzy_fires_once() {
        let mut state = new_state(Mode::Classic);
        let mut fired = 0;
        for _ in 0..13 {
            food_ahead(&mut state);
            state.advance(TICK).unwrap();
            fired += state
                .events()
                .iter()
                .filter(|e| **e == GameEvent::AchievementUnlocked(Achievement::FoodFrenzy))
                .count();
        }
        assert!(state.consecutive_food >= 10);
        assert_eq!(fired, 1);
        assert!(state
            .run_stats()
            .achievements
            .contains(&Achievement::FoodFrenzy));
    }

    #[test]
    fn test_long_snake_unlocks_at_fifteen() {
        let mut state = new_state(Mode::Survival);
        state.snake = Snake::new(Point::new(20, 10), Direction::Right, 14);
        food_ahead(&mut state);
        state.advance(TICK).unwrap();
        assert!(state
            .events()
            .contains(&GameEvent::AchievementUnlocked(Achievement::LongSnake)));
    }

    #[test]
    fn test_speed_demon_on_hard_classic() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            ..Settings::default()
        };
        let mut state = GameState::with_seed(Mode::Classic, settings, 9).unwrap();
        state.score = 195;
        food_ahead(&mut state);
        state.advance(TICK).unwrap();
        assert!(state
            .events()
            .contains(&GameEvent::AchievementUnlocked(Achievement::SpeedDemon)));
    }

    #[test]
    fn test_gradual_speedup() {
        let mut state = new_state(Mode::Survival);
        food_ahead(&mut state);
        state.advance(TICK).unwrap();
        assert_eq!(state.delay, Duration::from_millis(97));

        let settings = Settings {
            gradual_speedup: false,
            ..Settings::default()
        };
        let mut state = GameState::with_seed(Mode::Survival, settings, 1).unwrap();
        food_ahead(&mut state);
        state.advance(TICK).unwrap();
        assert_eq!(state.delay, Duration::from_millis(100));
    }

    #[test]
    fn test_life_lost_restores_delay_and_keeps_counters() {
        let mut state = new_state(Mode::Classic);
        food_ahead(&mut state);
        state.advance(TICK).unwrap();
        assert!(state.delay < Duration::from_millis(100));

        state.snake = Snake::new(Point::new(38, 5), Direction::Right, 4);
        state.food = Point::new(10, 15);
        state.power_item = None;
        let result = state.advance(TICK).unwrap();

        assert_eq!(result, StepResult::LifeLost { lives_left: 2 });
        assert_eq!(state.delay, Duration::from_millis(100));
        assert_eq!(state.score, 10);
        assert_eq!(state.run_stats().food_eaten, 1);
        assert_eq!(state.elapsed, TICK * 2);
    }

    #[test]
    fn test_advance_after_game_over_is_inert() {
        let mut state = new_state(Mode::Survival);
        state.snake = Snake::new(Point::new(38, 5), Direction::Right, 3);
        state.food = Point::new(10, 15);
        state.power_item = None;
        assert!(state.advance(TICK).unwrap().is_game_over());

        let head = state.snake.head();
        let elapsed = state.elapsed;
        assert!(state.advance(TICK).unwrap().is_game_over());
        assert_eq!(state.snake.head(), head);
        assert_eq!(state.elapsed, elapsed);
    }

    #[test]
    fn test_reset_fresh_run_clears_everything() {
        let mut state = new_state(Mode::Classic);
        food_ahead(&mut state);
        state.advance(TICK).unwrap();
        state.lives = 1;

        state.reset(false).unwrap();

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.elapsed, Duration::ZERO);
        assert_eq!(state.run_stats().food_eaten, 0);
    }

    #[test]
    fn test_invariants_under_random_play() {
        use rand::seq::SliceRandom;

        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for (seed, mode, wrap) in [
            (1u64, Mode::Classic, false),
            (2, Mode::Survival, true),
            (3, Mode::TimeAttack, false),
            (4, Mode::Classic, true),
        ] {
            let settings = Settings {
                wall_wrap: wrap,
                ..Settings::default()
            };
            let mut state = GameState::with_seed(mode, settings, seed).unwrap();
            let mut steer = StdRng::seed_from_u64(seed + 100);
            let mut last_delay = state.delay;

            for _ in 0..2000 {
                if steer.gen_bool(0.3) {
                    let before = state.snake.direction();
                    let d = *dirs.choose(&mut steer).unwrap();
                    state.set_direction(d);
                    if d.is_opposite(state.snake.heading()) {
                        assert_eq!(state.snake.direction(), before);
                    }
                }

                let result = state.advance(TICK).unwrap();
                assert!(state.snake.len() >= START_LENGTH);
                assert_disjoint(&state);
                assert!(state.delay >= crate::scoring::min_tick_delay());

                match result {
                    StepResult::Continue => {
                        assert!(state.delay <= last_delay);
                        last_delay = state.delay;
                    }
                    StepResult::LifeLost { .. } => {
                        assert_eq!(mode, Mode::Classic);
                        last_delay = state.delay;
                    }
                    StepResult::GameOver(_) => break,
                }
            }
        }
    }

    #[test]
    fn test_render_marks_entities() {
        let mut state = new_state(Mode::Classic);
        state.power_item = Some(PowerItem {
            pos: Point::new(5, 5),
            kind: PowerKind::PowerDown,
        });
        state.food = Point::new(6, 6);

        let frame = state.render();

        assert_eq!(frame.at(20, 10), Some(CellKind::Head));
        assert_eq!(frame.at(19, 10), Some(CellKind::Body));
        assert_eq!(frame.at(18, 10), Some(CellKind::Body));
        assert_eq!(frame.at(6, 6), Some(CellKind::Food));
        assert_eq!(frame.at(5, 5), Some(CellKind::PowerDown));
        assert_eq!(frame.count(CellKind::Head), 1);
        assert_eq!(frame.count(CellKind::Body), 2);
        assert_eq!(
            frame.status,
            StatusLine::Classic {
                lives: 3,
                elapsed_secs: 0
            }
        );
        assert_eq!(frame.status_text(), "Score: 0 | Lives: 3 | Time: 0s");
    }

    #[test]
    fn test_render_time_attack_countdown() {
        let mut state = new_state(Mode::TimeAttack);
        state.elapsed = Duration::from_millis(12_300);
        let frame = state.render();
        assert_eq!(
            frame.status,
            StatusLine::TimeAttack { remaining_secs: 47 }
        );
    }
}
