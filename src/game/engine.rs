use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::Event,
    board::Board,
    config::GameConfig,
    error::GameError,
    state::{Cell, Food, Snake},
};

/// Points awarded for each piece of food
pub const FOOD_SCORE: u32 = 10;

/// Outcome of a successful step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The snake moved one cell
    Moved,
    /// The snake ate and grew; food was placed elsewhere
    Ate,
    /// The snake ate and there is no free cell left for food
    BoardFilled,
}

/// What the router has to do after an event was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Release the tick loop and cancel the game
    Quit,
    /// Release a tick loop blocked on pause
    Resume,
    /// Paused flag set; nothing to release
    Paused,
    /// Heading changed
    Turned,
    /// Event had no effect
    Ignored,
}

/// The game engine: owns the snake, the food and the board snapshot,
/// and decides each tick what the next valid state is
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    snake: Snake,
    food: Food,
    board: Board,
    paused: bool,
}

impl GameEngine {
    /// Create a new game engine with an entropy-seeded generator
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a new game engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let snake = Snake::new();
        let food = Food::new();
        let board = Board::new(config.width, config.height, &snake, &food, config.speed);

        Self {
            config,
            rng,
            snake,
            food,
            board,
            paused: true,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replace snake and food, e.g. to set up a specific position
    pub fn place(&mut self, snake: Snake, food: Food) {
        self.snake = snake;
        self.food = food;
    }

    /// Rebuild snake, food and board; score, round and error are reset
    pub fn restart(&mut self) {
        self.snake = Snake::new();
        self.food = Food::new();
        self.board = Board::new(
            self.config.width,
            self.config.height,
            &self.snake,
            &self.food,
            self.config.speed,
        );
    }

    /// Apply one routed event to the shared state
    pub fn apply(&mut self, event: Event) -> Transition {
        match event {
            Event::Quit => {
                self.paused = false;
                Transition::Quit
            }
            Event::Restart => {
                self.paused = false;
                self.restart();
                Transition::Resume
            }
            Event::Pause => {
                self.paused = true;
                Transition::Paused
            }
            Event::Start => {
                self.paused = false;
                Transition::Resume
            }
            Event::MoveUp | Event::MoveDown | Event::MoveLeft | Event::MoveRight => {
                match event.direction() {
                    Some(wanted) if self.snake.heading.is_orthogonal(wanted) => {
                        self.snake.heading = wanted;
                        self.board.round += 1;
                        Transition::Turned
                    }
                    _ => {
                        debug!(?event, heading = ?self.snake.heading, "turn rejected");
                        Transition::Ignored
                    }
                }
            }
        }
    }

    /// Move the snake one cell along its heading.
    ///
    /// A collision leaves the snake untouched. Eating keeps the tail, adds
    /// to the score and relocates the food off the snake.
    pub fn advance(&mut self) -> Result<Advance, GameError> {
        let next = self.snake.head().moved_in_direction(self.snake.heading);

        if !self.is_in_bounds(next) {
            return Err(GameError::WallHit);
        }

        if self.snake.body_segments().contains(&next) {
            return Err(GameError::SnakeBite);
        }

        let outcome = if next == self.food.cell {
            self.board.score += FOOD_SCORE;
            info!(score = self.board.score, length = self.snake.len() + 1, "food eaten");
            match self.spawn_food() {
                Some(cell) => {
                    debug!(column = cell.column(), row = cell.row(), "food placed");
                    self.food.cell = cell;
                    Advance::Ate
                }
                None => Advance::BoardFilled,
            }
        } else {
            self.snake.body.remove(0);
            Advance::Moved
        };

        self.snake.body.push(next);

        Ok(outcome)
    }

    /// Repaint the board from the current snake and food
    pub fn paint(&mut self) -> Result<(), GameError> {
        self.board.paint(&self.snake, &self.food)
    }

    pub fn set_board_paused(&mut self, paused: bool) {
        self.board.is_paused = paused;
    }

    pub fn set_error_message(&mut self, message: impl Into<String>) {
        self.board.error_message = Some(message.into());
    }

    fn is_in_bounds(&self, cell: Cell) -> bool {
        let (i, j) = cell.coord();
        i >= 0 && j >= 0 && (i as usize) < self.config.width && (j as usize) < self.config.height
    }

    /// Pick a random cell that is neither the eaten food nor on the snake.
    /// Called before the new head is appended, so the eaten cell stands in
    /// for it.
    fn spawn_food(&mut self) -> Option<Cell> {
        let cells = self.config.width * self.config.height;
        if cells <= self.snake.len() + 1 {
            return None;
        }

        loop {
            let i = self.rng.gen_range(0..self.config.width) as i32;
            let j = self.rng.gen_range(0..self.config.height) as i32;
            let cell = Cell::new(i, j);

            if cell != self.food.cell && !self.snake.is_on_body(cell) {
                return Some(cell);
            }
        }
    }
}
