use super::action::Direction;

/// Number of segments a fresh snake starts with
pub const INITIAL_SNAKE_LENGTH: i32 = 4;

/// A coordinate on the game grid: `i` is the column, `j` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    i: i32,
    j: i32,
}

impl Cell {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Column and row, respectively
    pub fn coord(&self) -> (i32, i32) {
        (self.i, self.j)
    }

    pub fn column(&self) -> i32 {
        self.i
    }

    pub fn row(&self) -> i32 {
        self.j
    }

    /// The neighbouring cell one step in `direction`
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (di, dj) = direction.delta();
        Self::new(self.i + di, self.j + dj)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Current direction of movement
    pub(crate) heading: Direction,
    /// Body segments, oldest first; the last element is the head
    pub(crate) body: Vec<Cell>,
}

impl Snake {
    /// The starting snake: four cells on row 3, columns 1 to 4, heading right
    pub fn new() -> Self {
        let body = (0..INITIAL_SNAKE_LENGTH)
            .map(|offset| Cell::new(1 + offset, 3))
            .collect();

        Self {
            heading: Direction::Right,
            body,
        }
    }

    /// Build a snake from explicit segments, oldest first.
    /// Returns `None` for an empty body.
    pub fn from_cells(heading: Direction, body: Vec<Cell>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { heading, body })
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Get the head position (most recently appended cell)
    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// All segments, oldest first, head last
    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    /// Segments excluding the head
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[..self.body.len() - 1]
    }

    /// Check whether a cell is on top of the snake, head included
    pub fn is_on_body(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the food currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub(crate) cell: Cell,
}

impl Food {
    /// Column 5, row 4: just off the starting snake's path
    pub const DEFAULT_CELL: Cell = Cell::new(5, 4);

    pub fn new() -> Self {
        Self {
            cell: Self::DEFAULT_CELL,
        }
    }

    pub fn at(cell: Cell) -> Self {
        Self { cell }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }
}

impl Default for Food {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_in_direction(Direction::Right), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.coord(), (5, 5));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.heading(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(4, 3));
        assert_eq!(
            snake.body(),
            &[
                Cell::new(1, 3),
                Cell::new(2, 3),
                Cell::new(3, 3),
                Cell::new(4, 3)
            ]
        );
        assert_eq!(snake.body_segments().len(), 3);
    }

    #[test]
    fn test_is_on_body() {
        let snake = Snake::new();
        assert!(snake.is_on_body(Cell::new(4, 3))); // head
        assert!(snake.is_on_body(Cell::new(1, 3))); // tail
        assert!(!snake.is_on_body(Cell::new(5, 3)));
        assert!(!snake.is_on_body(Food::DEFAULT_CELL));
    }

    #[test]
    fn test_from_cells_rejects_empty() {
        assert!(Snake::from_cells(Direction::Up, vec![]).is_none());

        let snake = Snake::from_cells(Direction::Up, vec![Cell::new(0, 1), Cell::new(0, 0)]);
        assert_eq!(snake.map(|s| s.head()), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_default_food() {
        assert_eq!(Food::new().cell(), Cell::new(5, 4));
    }
}
