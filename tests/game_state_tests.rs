use std::time::Duration;

use tui_snake::core::{CellKind, GameEvent, GameState, StepResult};
use tui_snake::types::{Direction, Mode, Point, Settings, TIME_ATTACK_LIMIT_SECS};

const TICK: Duration = Duration::from_millis(100);

fn play_until_over(game: &mut GameState, max_steps: usize) -> Vec<StepResult> {
    let mut steps = Vec::new();
    for _ in 0..max_steps {
        let step = game.advance(TICK).unwrap();
        let over = step.is_game_over();
        steps.push(step);
        if over {
            break;
        }
    }
    steps
}

#[test]
fn new_game_starts_centred_heading_right() {
    let game = GameState::with_seed(Mode::Classic, Settings::default(), 7).unwrap();
    assert_eq!(game.snake().head(), Point::new(20, 10));
    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.snake().direction(), Direction::Right);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.score(), 0);
    assert!(!game.snake().contains(game.food()));
    assert!(game.power_item().is_none());
}

#[test]
fn classic_spends_three_lives_against_the_wall() {
    let mut game = GameState::with_seed(Mode::Classic, Settings::default(), 11).unwrap();
    let steps = play_until_over(&mut game, 200);

    let lives_lost: Vec<u8> = steps
        .iter()
        .filter_map(|s| match s {
            StepResult::LifeLost { lives_left } => Some(*lives_left),
            _ => None,
        })
        .collect();
    assert_eq!(lives_lost, vec![2, 1]);

    match steps.last() {
        Some(StepResult::GameOver(stats)) => {
            assert_eq!(stats.collisions, 3);
            assert!(!stats.won);
            assert!(!stats.time_up);
        }
        other => panic!("expected game over, got {other:?}"),
    }
    assert_eq!(game.lives(), 0);
    assert!(game.is_over());
}

#[test]
fn survival_ends_on_first_collision() {
    let mut game = GameState::with_seed(Mode::Survival, Settings::default(), 3).unwrap();
    let steps = play_until_over(&mut game, 40);
    assert!(steps.iter().all(|s| !matches!(s, StepResult::LifeLost { .. })));
    assert!(matches!(steps.last(), Some(StepResult::GameOver(_))));
    assert!(game.events().contains(&GameEvent::GameOver));
}

#[test]
fn wall_wrap_keeps_survival_alive() {
    let settings = Settings {
        wall_wrap: true,
        ..Settings::default()
    };
    let mut game = GameState::with_seed(Mode::Survival, settings, 3).unwrap();
    for _ in 0..60 {
        let step = game.advance(TICK).unwrap();
        assert_eq!(step, StepResult::Continue);
    }
    assert!(game.snake().head().is_interior());
}

#[test]
fn time_attack_ignores_wall_wrap() {
    let settings = Settings {
        wall_wrap: true,
        ..Settings::default()
    };
    let game = GameState::with_seed(Mode::TimeAttack, settings, 3).unwrap();
    assert!(!game.wraps());
}

#[test]
fn time_attack_ends_when_the_clock_runs_out() {
    let mut game = GameState::with_seed(Mode::TimeAttack, Settings::default(), 5).unwrap();
    // One long step covers the whole limit.
    let step = game
        .advance(Duration::from_secs(TIME_ATTACK_LIMIT_SECS))
        .unwrap();
    match step {
        StepResult::GameOver(stats) => {
            assert!(stats.time_up);
            assert!(stats.won);
            assert_eq!(stats.mode, Mode::TimeAttack);
        }
        other => panic!("expected time up, got {other:?}"),
    }
    assert!(game.render().time_up);
}

#[test]
fn reversal_is_ignored_and_inversion_applies_first() {
    let mut game = GameState::with_seed(Mode::Classic, Settings::default(), 1).unwrap();
    game.set_direction(Direction::Left);
    assert_eq!(game.snake().direction(), Direction::Right);

    let inverted = Settings {
        invert_controls: true,
        ..Settings::default()
    };
    let mut game = GameState::with_seed(Mode::Classic, inverted, 1).unwrap();
    // Up inverts to Down, which is a legal turn from Right.
    game.set_direction(Direction::Up);
    assert_eq!(game.snake().direction(), Direction::Down);
    // Right inverts to Left, a reversal.
    game.set_direction(Direction::Right);
    assert_eq!(game.snake().direction(), Direction::Down);
}

#[test]
fn frame_matches_state() {
    let mut game = GameState::with_seed(Mode::Survival, Settings::default(), 9).unwrap();
    game.advance(TICK).unwrap();
    let frame = game.render();

    let head = game.snake().head();
    assert_eq!(frame.at(head.x, head.y), Some(CellKind::Head));
    assert_eq!(frame.count(CellKind::Head), 1);
    assert_eq!(frame.count(CellKind::Body), game.snake().len() - 1);
    assert_eq!(frame.count(CellKind::Food), 1);
    assert_eq!(frame.score, game.score());
    assert_eq!(frame.length, game.snake().len());
    assert!(frame.status_text().starts_with("Score: "));
    assert!(frame.status_text().contains("Survived: 0s"));
}

#[test]
fn same_seed_same_game() {
    let run = |seed| {
        let mut game = GameState::with_seed(Mode::Survival, Settings::default(), seed).unwrap();
        let mut foods = vec![game.food()];
        for _ in 0..15 {
            game.advance(TICK).unwrap();
            foods.push(game.food());
        }
        foods
    };
    assert_eq!(run(42), run(42));
}
