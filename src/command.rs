use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A user intent decoded from a key press
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Pause,
    Restart,
    Home,
    End,
    Next,
    Prev,
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'W' | 'k') | KeyCode::Up => Some(Command::Up),
            KeyCode::Char('s' | 'S' | 'j') | KeyCode::Down => Some(Command::Down),
            KeyCode::Char('a' | 'A' | 'h') | KeyCode::Left => Some(Command::Left),
            KeyCode::Char('d' | 'D' | 'l') | KeyCode::Right => Some(Command::Right),
            KeyCode::Enter => Some(Command::Enter),
            KeyCode::Char(' ' | 'p' | 'P') | KeyCode::Esc => Some(Command::Pause),
            KeyCode::Char('r' | 'R') => Some(Command::Restart),
            KeyCode::Home => Some(Command::Home),
            KeyCode::End => Some(Command::End),
            KeyCode::Tab => Some(Command::Next),
            KeyCode::BackTab => Some(Command::Prev),
            KeyCode::Char('q' | 'Q') => Some(Command::Q),
            _ => None,
        }
    }
}
