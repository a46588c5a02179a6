/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns true if other is a quarter turn away from self
    pub fn is_orthogonal(&self, other: Direction) -> bool {
        *self != other && !self.is_opposite(other)
    }

    /// Returns the delta (di, dj) for moving in this direction.
    /// `i` grows to the right, `j` grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A user or system signal fed to the event router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Quit,
    Restart,
    Pause,
    Start,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

impl Event {
    /// The heading requested by a move event, `None` for control events
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Event::MoveUp => Some(Direction::Up),
            Event::MoveDown => Some(Direction::Down),
            Event::MoveLeft => Some(Direction::Left),
            Event::MoveRight => Some(Direction::Right),
            Event::Quit | Event::Restart | Event::Pause | Event::Start => None,
        }
    }
}

impl From<Direction> for Event {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Event::MoveUp,
            Direction::Down => Event::MoveDown,
            Direction::Left => Event::MoveLeft,
            Direction::Right => Event::MoveRight,
        }
    }
}
