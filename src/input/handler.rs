use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Event};

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Map a key press to a game event; unbound keys give `None`
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<Event> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Event::Quit);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Some(Direction::Up.into()),
            KeyCode::Down => Some(Direction::Down.into()),
            KeyCode::Left => Some(Direction::Left.into()),
            KeyCode::Right => Some(Direction::Right.into()),

            // Controls
            KeyCode::Esc => Some(Event::Quit),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Event::Pause),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Event::Start),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Event::Restart),

            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
