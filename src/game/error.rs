use thiserror::Error;

/// Failures raised by the game core.
///
/// The display strings double as the message shown on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// A cell fell outside the board while painting the grid
    #[error("cell out of range")]
    CellOutOfRange,
    /// The next head position is outside the board
    #[error("wall hit")]
    WallHit,
    /// The next head position is on the snake's own body
    #[error("snake bite")]
    SnakeBite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(GameError::CellOutOfRange.to_string(), "cell out of range");
        assert_eq!(GameError::WallHit.to_string(), "wall hit");
        assert_eq!(GameError::SnakeBite.to_string(), "snake bite");
    }
}
