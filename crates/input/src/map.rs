//! Key mapping from terminal events to game commands and menu keys.

use crate::types::{Command, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys the menu screens understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Select,
    Back,
    /// `1`..=`9`, as a zero-based index
    Index(usize),
    /// Any other printable key, lower-cased (screen-specific actions such as `r`)
    Char(char),
}

/// Map a key to a turn; `None` for anything that is not a direction key.
pub fn direction_for_key(key: KeyEvent) -> Option<Direction> {
    match key.code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Direction::Right),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Direction::Up),
        _ => None,
    }
}

/// Map in-game keyboard input to a command.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }
    direction_for_key(key).map(Command::Turn)
}

/// Check if key should quit the current run.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Ctrl-C, which leaves the program from any screen.
pub fn is_interrupt(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map keyboard input on a menu screen.
pub fn menu_key(key: KeyEvent) -> Option<MenuKey> {
    if is_interrupt(key) {
        return Some(MenuKey::Back);
    }
    match key.code {
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(MenuKey::Up),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(MenuKey::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuKey::Select),
        KeyCode::Esc
        | KeyCode::Backspace
        | KeyCode::Char('q')
        | KeyCode::Char('Q') => Some(MenuKey::Back),
        KeyCode::Char(c @ '1'..='9') => Some(MenuKey::Index(c as usize - '1' as usize)),
        KeyCode::Char(c) => Some(MenuKey::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}
