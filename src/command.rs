use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Turn(Direction),
    /// Start, pause/resume, or play again, depending on the game state
    Space,
    Start,
    Pause,
    Reset,
    Theme,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        if ev.modifiers == KeyModifiers::CONTROL && ev.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'k' | 'W' | 'K') | KeyCode::Up => {
                Some(Command::Turn(Direction::Up))
            }
            KeyCode::Char('s' | 'j' | 'S' | 'J') | KeyCode::Down => {
                Some(Command::Turn(Direction::Down))
            }
            KeyCode::Char('a' | 'h' | 'A' | 'H') | KeyCode::Left => {
                Some(Command::Turn(Direction::Left))
            }
            KeyCode::Char('d' | 'l' | 'D' | 'L') | KeyCode::Right => {
                Some(Command::Turn(Direction::Right))
            }
            KeyCode::Char(' ') => Some(Command::Space),
            KeyCode::Enter | KeyCode::Char('n' | 'N') => Some(Command::Start),
            KeyCode::Esc | KeyCode::Char('p' | 'P') => Some(Command::Pause),
            KeyCode::Char('r' | 'R') => Some(Command::Reset),
            KeyCode::Char('t' | 'T') => Some(Command::Theme),
            KeyCode::Char('q' | 'Q') => Some(Command::Quit),
            _ => None,
        }
    }
}
