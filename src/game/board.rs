use super::config::Speed;
use super::error::GameError;
use super::state::{Cell, Food, Snake};

/// Marker placed on a grid cell for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    SnakeHead,
    SnakeBody,
    Food,
}

/// Render-facing snapshot of the game.
///
/// Recomputed from the snake and food on every tick; it is never the source
/// of truth. `grid` is indexed `[column][row]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub round: u32,
    pub score: u32,
    pub length: usize,
    pub speed: Speed,
    pub head: Cell,
    pub food: Cell,
    pub is_paused: bool,
    pub error_message: Option<String>,
    pub grid: Vec<Vec<Option<Icon>>>,
}

impl Board {
    pub fn new(width: usize, height: usize, snake: &Snake, food: &Food, speed: Speed) -> Self {
        Self {
            width,
            height,
            round: 0,
            score: 0,
            length: snake.len(),
            speed,
            head: snake.head(),
            food: food.cell(),
            is_paused: true,
            error_message: None,
            grid: empty_grid(width, height),
        }
    }

    /// Redraw the grid from the current snake and food.
    ///
    /// On failure the grid is left empty and the error is returned; the
    /// caller decides what that means for the current tick.
    pub fn paint(&mut self, snake: &Snake, food: &Food) -> Result<(), GameError> {
        self.update(snake, food);

        let marked = self.mark_all(snake, food);
        if marked.is_err() {
            self.grid = empty_grid(self.width, self.height);
        }
        marked
    }

    fn mark_all(&mut self, snake: &Snake, food: &Food) -> Result<(), GameError> {
        self.mark(food.cell(), Icon::Food)?;
        self.mark(snake.head(), Icon::SnakeHead)?;
        for &cell in snake.body_segments() {
            self.mark(cell, Icon::SnakeBody)?;
        }
        Ok(())
    }

    /// Icon at a cell, `None` if empty or off the board
    pub fn icon_at(&self, cell: Cell) -> Option<Icon> {
        let (i, j) = self.index(cell)?;
        self.grid[i][j]
    }

    pub fn count_icons(&self, icon: Icon) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|slot| **slot == Some(icon))
            .count()
    }

    fn update(&mut self, snake: &Snake, food: &Food) {
        self.grid = empty_grid(self.width, self.height);
        self.head = snake.head();
        self.length = snake.len();
        self.food = food.cell();
    }

    fn mark(&mut self, cell: Cell, icon: Icon) -> Result<(), GameError> {
        let (i, j) = self.index(cell).ok_or(GameError::CellOutOfRange)?;
        self.grid[i][j] = Some(icon);
        Ok(())
    }

    fn index(&self, cell: Cell) -> Option<(usize, usize)> {
        let i = usize::try_from(cell.column()).ok()?;
        let j = usize::try_from(cell.row()).ok()?;
        (i < self.width && j < self.height).then_some((i, j))
    }
}

fn empty_grid(width: usize, height: usize) -> Vec<Vec<Option<Icon>>> {
    vec![vec![None; height]; width]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;

    fn board_for(snake: &Snake, food: &Food) -> Board {
        Board::new(26, 14, snake, food, Speed::Medium)
    }

    #[test]
    fn test_new_board() {
        let snake = Snake::new();
        let food = Food::new();
        let board = board_for(&snake, &food);

        assert_eq!(board.grid.len(), 26);
        assert!(board.grid.iter().all(|col| col.len() == 14));
        assert!(board.is_paused);
        assert_eq!(board.score, 0);
        assert_eq!(board.round, 0);
        assert_eq!(board.length, 4);
        assert_eq!(board.head, Cell::new(4, 3));
        assert_eq!(board.error_message, None);
        assert_eq!(board.count_icons(Icon::SnakeBody), 0);
    }

    #[test]
    fn test_paint_marks_every_segment() {
        let snake = Snake::new();
        let food = Food::new();
        let mut board = board_for(&snake, &food);

        board.paint(&snake, &food).unwrap();

        assert_eq!(board.count_icons(Icon::SnakeHead), 1);
        assert_eq!(board.count_icons(Icon::Food), 1);
        assert_eq!(board.count_icons(Icon::SnakeBody), snake.len() - 1);
        assert_eq!(board.icon_at(Cell::new(4, 3)), Some(Icon::SnakeHead));
        assert_eq!(board.icon_at(Cell::new(1, 3)), Some(Icon::SnakeBody));
        assert_eq!(board.icon_at(Cell::new(5, 4)), Some(Icon::Food));
    }

    #[test]
    fn test_paint_clears_previous_frame() {
        let snake = Snake::new();
        let food = Food::new();
        let mut board = board_for(&snake, &food);
        board.paint(&snake, &food).unwrap();

        let moved = Snake::from_cells(
            Direction::Right,
            vec![Cell::new(10, 10), Cell::new(11, 10)],
        )
        .unwrap();
        board.paint(&moved, &food).unwrap();

        assert_eq!(board.icon_at(Cell::new(4, 3)), None);
        assert_eq!(board.head, Cell::new(11, 10));
        assert_eq!(board.length, 2);
        assert_eq!(board.count_icons(Icon::SnakeBody), 1);
    }

    #[test]
    fn test_paint_out_of_range_leaves_grid_empty() {
        let snake = Snake::new();
        let food = Food::at(Cell::new(26, 2));
        let mut board = board_for(&snake, &food);

        assert_eq!(board.paint(&snake, &food), Err(GameError::CellOutOfRange));
        assert!(board.grid.iter().flatten().all(Option::is_none));
        assert_eq!(board.grid.len(), 26);
    }

    #[test]
    fn test_paint_rejects_negative_cells() {
        let snake =
            Snake::from_cells(Direction::Left, vec![Cell::new(0, 0), Cell::new(-1, 0)]).unwrap();
        let food = Food::new();
        let mut board = board_for(&snake, &food);

        assert_eq!(board.paint(&snake, &food), Err(GameError::CellOutOfRange));
        assert_eq!(board.icon_at(Cell::new(5, 4)), None);
    }
}
