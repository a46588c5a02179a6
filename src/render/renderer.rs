use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use crossterm::{
    event::{Event as TermEvent, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::io::{Stderr, stderr};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::Renderer;
use crate::game::{Board, Event, Icon};
use crate::input::InputHandler;

/// Width of the side panel holding stats and key legend
const PANEL_WIDTH: u16 = 22;

const RESTART_HINT: &str = "press \"R\" to restart";
const QUIT_HINT: &str = "or \"ESC\" to quit";
const PAUSED_TITLE: &str = "game paused";
const START_HINT: &str = "press \"S\" to start";

/// Draws the board in the terminal and turns key presses into events
pub struct TerminalRenderer {
    terminal: Mutex<Terminal<CrosstermBackend<Stderr>>>,
    input_handler: InputHandler,
}

impl TerminalRenderer {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self {
            terminal: Mutex::new(terminal),
            input_handler: InputHandler::new(),
        })
    }

    /// Give the terminal back in the state we found it
    pub fn restore(&self) -> Result<()> {
        let mut terminal = self
            .terminal
            .lock()
            .map_err(|_| anyhow!("terminal lock poisoned"))?;
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "could not restore terminal");
        }
    }
}

#[async_trait]
impl Renderer for TerminalRenderer {
    async fn listen(&self, events: mpsc::Sender<Event>) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            let event = match event_stream.next().await {
                Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    match self.input_handler.handle_key_event(key) {
                        Some(event) => event,
                        None => continue,
                    }
                }
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err).context("Failed to read terminal input"),
                // Input is gone; treat it as the player leaving
                None => Event::Quit,
            };

            if events.send(event).await.is_err() {
                debug!("event queue closed, listener stopping");
                return Ok(());
            }
            if event == Event::Quit {
                return Ok(());
            }
        }
    }

    fn render(&self, board: &Board) -> Result<()> {
        let mut terminal = self
            .terminal
            .lock()
            .map_err(|_| anyhow!("terminal lock poisoned"))?;
        terminal
            .draw(|frame| draw(frame, board))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

fn draw(frame: &mut Frame, board: &Board) {
    let grid_width = border_fit(board.width);
    let grid_height = border_fit(board.height);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Title
            Constraint::Length(grid_height), // Game area
            Constraint::Min(0),
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(grid_width),
            Constraint::Length(PANEL_WIDTH),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    let title_area = Rect {
        width: grid_width.saturating_add(PANEL_WIDTH).min(rows[0].width),
        ..rows[0]
    };
    frame.render_widget(render_title(), title_area);
    frame.render_widget(render_grid(board), columns[0]);
    frame.render_widget(render_panel(board), columns[1]);
}

/// Cells needed for `cells` plus a border on each side, clamped to `u16`
fn border_fit(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX).saturating_add(2)
}

fn render_title() -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        "Snaky Game",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
}

fn render_grid(board: &Board) -> Paragraph<'_> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain);

    // Messages replace the grid: error first, then pause
    if let Some(error) = &board.error_message {
        return message(board, &[error.as_str(), "", RESTART_HINT, QUIT_HINT]).block(block);
    }
    if board.is_paused {
        return message(board, &[PAUSED_TITLE, "", START_HINT, QUIT_HINT]).block(block);
    }

    let lines: Vec<Line> = (0..board.height)
        .map(|j| {
            let spans: Vec<Span> = (0..board.width)
                .map(|i| match board.grid[i][j] {
                    Some(Icon::SnakeHead) => Span::styled(
                        "o",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(Icon::SnakeBody) => Span::styled("x", Style::default().fg(Color::Green)),
                    Some(Icon::Food) => Span::styled(
                        "*",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    None => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    Paragraph::new(lines).block(block)
}

/// Lines centred on the grid area
fn message<'a>(board: &Board, text: &[&'a str]) -> Paragraph<'a> {
    let top = board.height.saturating_sub(text.len()) / 2;
    let lines: Vec<Line> = std::iter::repeat(Line::from(""))
        .take(top)
        .chain(text.iter().map(|line| Line::from(*line)))
        .collect();

    Paragraph::new(lines).alignment(Alignment::Center)
}

fn render_panel(board: &Board) -> Paragraph<'static> {
    let (head_i, head_j) = board.head.coord();
    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, Style::default().fg(Color::Yellow)),
            Span::raw(value),
        ])
    };

    let text = vec![
        stat("Size: ", format!("{} x {}", board.width, board.height)),
        stat("Speed: ", board.speed.to_string()),
        stat("Head: ", format!("{} x {}", head_i, head_j)),
        Line::from(""),
        stat("Round: ", board.round.to_string()),
        stat("Score: ", board.score.to_string()),
        stat("Length: ", board.length.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Arrow", Style::default().fg(Color::Cyan)),
            Span::raw(": move"),
        ]),
        Line::from(vec![
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(": pause"),
        ]),
        Line::from(vec![
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(": restart"),
        ]),
        Line::from(vec![
            Span::styled("ESC", Style::default().fg(Color::Red)),
            Span::raw(": quit"),
        ]),
    ];

    Paragraph::new(text).block(Block::default().borders(Borders::ALL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, Snake, Speed};
    use ratatui::backend::TestBackend;

    fn screen(board: &Board) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| draw(frame, board)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn running_board() -> Board {
        let snake = Snake::new();
        let food = Food::new();
        let mut board = Board::new(26, 14, &snake, &food, Speed::Slow);
        board.paint(&snake, &food).unwrap();
        board.is_paused = false;
        board
    }

    #[test]
    fn test_draws_snake_and_food() {
        let text = screen(&running_board());

        assert!(text.contains("Snaky Game"));
        assert!(text.contains("xxxo"));
        assert!(text.contains('*'));
        assert!(text.contains("Speed: slow"));
        assert!(text.contains("Length: 4"));
    }

    #[test]
    fn test_border_fit_saturates() {
        assert_eq!(border_fit(26), 28);
        assert_eq!(border_fit(65_534), u16::MAX);
        assert_eq!(border_fit(65_535), u16::MAX);
        assert_eq!(border_fit(1_000_000), u16::MAX);
    }

    #[test]
    fn test_oversized_board_does_not_overflow_layout() {
        let snake = Snake::new();
        let food = Food::new();
        let mut board = Board::new(65_535, 14, &snake, &food, Speed::Slow);
        board.paint(&snake, &food).unwrap();
        board.is_paused = true;

        let text = screen(&board);
        assert!(text.contains("Snaky Game"));
    }

    #[test]
    fn test_paused_board_hides_grid() {
        let mut board = running_board();
        board.is_paused = true;
        let text = screen(&board);

        assert!(text.contains(PAUSED_TITLE));
        assert!(text.contains(START_HINT));
        assert!(!text.contains("xxxo"));
    }

    #[test]
    fn test_error_wins_over_pause() {
        let mut board = running_board();
        board.is_paused = true;
        board.error_message = Some("wall hit".to_string());
        let text = screen(&board);

        assert!(text.contains("wall hit"));
        assert!(text.contains(RESTART_HINT));
        assert!(!text.contains(PAUSED_TITLE));
    }
}
