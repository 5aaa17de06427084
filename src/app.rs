//! Menu screens and the run lifecycle.
//!
//! Screens are built by pure functions from the stored records, so they can be
//! tested without a terminal. [`App`] owns the keyboard and framebuffer and moves
//! between screens until the player quits.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyEvent;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::core::{GameState, RunStats};
use crate::engine::{AudioCue, GameLoop, RunOutcome, StatsSink, SystemClock};
use crate::input::{is_interrupt, menu_key, KeyboardInput, MenuKey};
use crate::runtime::{AchievementRecorder, KeyboardCommands, RecordsSink, TermRenderer};
use crate::store::{Records, ScoreBoard, StatsBook, TIME_FORMAT};
use crate::term::{FrameBuffer, MenuScreen, MenuView, TerminalRenderer};
use crate::types::{Achievement, Mode, Settings};

/// Menus redraw at this interval while idle, so a resize is picked up.
const REDRAW_EVERY: Duration = Duration::from_millis(250);

/// Keys pressed right as a run ends are dropped for this long.
const RESULTS_GRACE: Duration = Duration::from_millis(600);

pub const MAIN_ITEMS: [&str; 8] = [
    "Classic",
    "Time Attack",
    "Survival",
    "Settings",
    "High Scores",
    "Achievements",
    "Instructions",
    "Quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// What the player did on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    Item(usize),
    Key(char),
    Back,
    Exit,
}

impl From<Pick> for Flow {
    fn from(pick: Pick) -> Self {
        match pick {
            Pick::Exit => Flow::Exit,
            _ => Flow::Continue,
        }
    }
}

pub struct App<'a> {
    config: &'a AppConfig,
    records: &'a mut Records,
    audio: Box<dyn AudioCue>,
    term: &'a mut TerminalRenderer,
    keyboard: KeyboardInput,
    menu: MenuView,
    fb: FrameBuffer,
}

impl<'a> App<'a> {
    pub fn new(
        config: &'a AppConfig,
        records: &'a mut Records,
        audio: Box<dyn AudioCue>,
        term: &'a mut TerminalRenderer,
    ) -> Self {
        let vp = term.viewport();
        Self {
            config,
            records,
            audio,
            term,
            keyboard: KeyboardInput::new(),
            menu: MenuView,
            fb: FrameBuffer::new(vp.width, vp.height),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        if let Some(mode) = self.config.mode {
            if self.play(mode)? == Flow::Exit {
                return Ok(());
            }
        }

        let mut cursor = 0;
        loop {
            let flow = match self.pick(&mut cursor, main_menu)? {
                Pick::Item(0) => self.play(Mode::Classic)?,
                Pick::Item(1) => self.play(Mode::TimeAttack)?,
                Pick::Item(2) => self.play(Mode::Survival)?,
                Pick::Item(3) => self.settings()?,
                Pick::Item(4) => {
                    let screen = high_scores(self.records.scores.board());
                    self.show(&screen)?.into()
                }
                Pick::Item(5) => self.achievements()?,
                Pick::Item(6) => self.show(&instructions())?.into(),
                Pick::Item(_) | Pick::Back | Pick::Exit => Flow::Exit,
                Pick::Key(_) => Flow::Continue,
            };
            if flow == Flow::Exit {
                tracing::info!("leaving");
                return Ok(());
            }
        }
    }

    fn play(&mut self, mode: Mode) -> Result<Flow> {
        let settings = self.records.settings.get();
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = GameState::new(mode, settings, rng)?;

        let outcome = {
            let mut renderer = TermRenderer::new(&mut *self.term, settings.theme);
            let mut input = KeyboardCommands(&mut self.keyboard);
            let mut sink = AchievementRecorder(&mut self.records.achievements);
            let mut clock = SystemClock;
            GameLoop::new(
                &mut renderer,
                &mut input,
                &mut *self.audio,
                &mut sink,
                &mut clock,
            )
            .run(&mut state)
        };

        let stats = match outcome {
            RunOutcome::Aborted => return Ok(Flow::Continue),
            RunOutcome::Completed(stats) => stats,
        };

        let best_before = self.records.scores.board().entry(mode).high;
        if let Err(err) = RecordsSink(&mut *self.records).record_run(&stats) {
            tracing::warn!(error = %format!("{err:#}"), "could not record run");
        }

        self.drain_keys(RESULTS_GRACE)?;
        let screen = results(&stats, stats.score > best_before);
        Ok(self.show(&screen)?.into())
    }

    fn settings(&mut self) -> Result<Flow> {
        let mut cursor = 0;
        loop {
            let current = self.records.settings.get();
            let pick = self.pick(&mut cursor, move |c| settings_menu(&current, c))?;
            let store = &mut self.records.settings;
            let saved = match pick {
                Pick::Item(0) => store.update(|s| s.gradual_speedup = !s.gradual_speedup),
                Pick::Item(1) => store.update(|s| s.speed = s.speed.next()),
                Pick::Item(2) => store.update(|s| s.difficulty = s.difficulty.next()),
                Pick::Item(3) => store.update(|s| s.theme = s.theme.next()),
                Pick::Item(4) => store.update(|s| s.wall_wrap = !s.wall_wrap),
                Pick::Item(5) => store.update(|s| s.invert_controls = !s.invert_controls),
                Pick::Key('r') => store.reset(),
                Pick::Key(_) => Ok(()),
                Pick::Item(_) | Pick::Back => return Ok(Flow::Continue),
                Pick::Exit => return Ok(Flow::Exit),
            };
            if let Err(err) = saved {
                tracing::warn!(error = %format!("{err:#}"), "could not save settings");
            }
        }
    }

    fn achievements(&mut self) -> Result<Flow> {
        loop {
            let screen = achievements_menu(self.records.achievements.book());
            match self.show(&screen)? {
                Pick::Key('c') => {
                    if let Err(err) = self.records.achievements.clear() {
                        tracing::warn!(error = %format!("{err:#}"), "could not clear achievements");
                    }
                }
                Pick::Exit => return Ok(Flow::Exit),
                _ => return Ok(Flow::Continue),
            }
        }
    }

    /// Cursor-driven list screen.
    fn pick(&mut self, cursor: &mut usize, build: impl Fn(usize) -> MenuScreen) -> Result<Pick> {
        loop {
            let screen = build(*cursor);
            let len = screen.items.len();
            let key = self.wait_key(&screen)?;
            if is_interrupt(key) {
                return Ok(Pick::Exit);
            }
            match menu_key(key) {
                Some(MenuKey::Up) if len > 0 => *cursor = (*cursor + len - 1) % len,
                Some(MenuKey::Down) if len > 0 => *cursor = (*cursor + 1) % len,
                Some(MenuKey::Select) if len > 0 => return Ok(Pick::Item(*cursor)),
                Some(MenuKey::Index(i)) if i < len => {
                    *cursor = i;
                    return Ok(Pick::Item(i));
                }
                Some(MenuKey::Back) => return Ok(Pick::Back),
                Some(MenuKey::Char(c)) => return Ok(Pick::Key(c)),
                _ => {}
            }
        }
    }

    /// Text screen; any key leaves it.
    fn show(&mut self, screen: &MenuScreen) -> Result<Pick> {
        let key = self.wait_key(screen)?;
        if is_interrupt(key) {
            return Ok(Pick::Exit);
        }
        Ok(match menu_key(key) {
            Some(MenuKey::Char(c)) => Pick::Key(c),
            _ => Pick::Back,
        })
    }

    fn wait_key(&mut self, screen: &MenuScreen) -> Result<KeyEvent> {
        loop {
            let vp = self.term.viewport();
            self.menu.render_into(screen, vp, &mut self.fb);
            self.term.draw_swap(&mut self.fb)?;
            if let Some(key) = self.keyboard.poll_key(REDRAW_EVERY)? {
                return Ok(key);
            }
        }
    }

    fn drain_keys(&mut self, window: Duration) -> Result<()> {
        let deadline = Instant::now() + window;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() || self.keyboard.poll_key(left)?.is_none() {
                return Ok(());
            }
        }
    }
}

fn on_off(v: bool) -> &'static str {
    if v {
        "On"
    } else {
        "Off"
    }
}

pub fn main_menu(cursor: usize) -> MenuScreen {
    MenuScreen::new("S N A K E")
        .items(MAIN_ITEMS, cursor)
        .footer("Up/Down move | Enter select | 1-8 jump | q quit")
}

pub fn settings_menu(s: &Settings, cursor: usize) -> MenuScreen {
    MenuScreen::new("Settings")
        .items(
            [
                format!("Gradual speed-up: {}", on_off(s.gradual_speedup)),
                format!("Snake speed: {}", s.speed.label()),
                format!("Difficulty: {}", s.difficulty.label()),
                format!("Theme: {}", s.theme.label()),
                format!("Wall wrap: {}", on_off(s.wall_wrap)),
                format!("Invert controls: {}", on_off(s.invert_controls)),
                "Back".to_string(),
            ],
            cursor,
        )
        .line(format!("Starting tick: {} ms", s.initial_delay_ms()))
        .footer("Enter change | r reset to defaults | Esc back")
}

pub fn high_scores(board: &ScoreBoard) -> MenuScreen {
    let row = |name: &str, last: u32, high: u32| {
        format!("{name:<12} last {last:>6}   best {high:>6}")
    };
    let mut screen = MenuScreen::new("High Scores");
    for mode in Mode::ALL {
        let e = board.entry(mode);
        screen = screen.line(row(mode.title(), e.last, e.high));
    }
    screen
        .line("")
        .line(row("Combined", board.combined.last, board.combined.high))
        .footer("Press any key to return")
}

pub fn achievements_menu(book: &StatsBook) -> MenuScreen {
    let mut screen = MenuScreen::new("Achievements").line("Unlocked:");
    if book.achievements.is_empty() {
        screen = screen.line("  none yet");
    }
    for u in &book.achievements {
        screen = screen.line(format!(
            "  * {} ({})",
            u.name.name(),
            u.unlock_time.format(TIME_FORMAT)
        ));
    }

    let locked: Vec<Achievement> = book.locked().collect();
    if !locked.is_empty() {
        screen = screen.line("").line("Locked:");
        for a in locked {
            screen = screen.line(format!("  - {}: {}", a.name(), a.description()));
        }
    }

    let last = book
        .last_game_time
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "never".to_string());
    screen
        .line("")
        .line(format!(
            "Games: {}   Total score: {}   Best: {}",
            book.total_games, book.total_score, book.best_score
        ))
        .line(format!("Last game: {last}"))
        .footer("c clear achievements | any other key to return")
}

pub fn instructions() -> MenuScreen {
    MenuScreen::new("Instructions")
        .line("Steer with the arrow keys, WASD or HJKL. q or Esc ends the run.")
        .line("")
        .line("Classic      3 lives, 10 points per food")
        .line("Time Attack  60 seconds on the clock, 15 points per food")
        .line("Survival     one life, faster speed-up, 20 points per food")
        .line("")
        .line("♥ food: grow by one")
        .line("♦ power-up: bonus points")
        .line("▲ power-down: lose points and a segment")
        .line("")
        .line("Walls and your own body are fatal unless wall wrap is on.")
        .line("")
        .line(format!("tui-snake {}", env!("CARGO_PKG_VERSION")))
        .footer("Press any key to return")
}

pub fn results(stats: &RunStats, new_high: bool) -> MenuScreen {
    let title = if stats.time_up { "TIME'S UP" } else { "GAME OVER" };
    let score = if new_high {
        format!("Score: {} (new best!)", stats.score)
    } else {
        format!("Score: {}", stats.score)
    };
    let mut screen = MenuScreen::new(title)
        .line(format!("Mode: {}", stats.mode.title()))
        .line(score)
        .line(format!("Food eaten: {}", stats.food_eaten))
        .line(format!("Power items: {}", stats.power_items()))
        .line(format!("Longest snake: {}", stats.max_length))
        .line(format!("Time: {}s", stats.duration.as_secs()));
    if !stats.achievements.is_empty() {
        let names: Vec<&str> = stats.achievements.iter().map(|a| a.name()).collect();
        screen = screen.line(format!("Unlocked: {}", names.join(", ")));
    }
    screen.footer("Press any key to return to the main menu")
}
