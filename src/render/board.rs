use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::game::{GameState, Position};

/// Terminal columns taken by one board cell
pub const CELL_COLUMNS: u16 = 2;
/// Terminal rows taken by one board cell
pub const CELL_ROWS: u16 = 1;

const HEAD_SYMBOL: &str = "■";
const BODY_SYMBOL: &str = "□";
const FOOD_SYMBOL: &str = "●";
const EMPTY_SYMBOL: &str = "·";

/// Offset of a cell's top-left corner inside the board area.
///
/// `None` for cells outside the visible board, which can happen right after
/// the board shrinks.
pub fn cell_origin(cell: Position) -> Option<(u16, u16)> {
    let x = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y = u16::try_from(cell.y).ok()?.checked_mul(CELL_ROWS)?;
    Some((x, y))
}

/// Snake and food painted onto the board area
pub struct BoardView<'a> {
    state: &'a GameState,
}

impl<'a> BoardView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let mut canvas = Canvas { area, buf };
        let empty = Style::default().fg(Color::DarkGray);

        // Only the part of the board that fits the area
        let (width, height) = state.board.extent();
        let width = width.min(i32::from(area.width / CELL_COLUMNS));
        let height = height.min(i32::from(area.height / CELL_ROWS));
        for y in 0..height {
            for x in 0..width {
                canvas.draw_cell(Position::new(x, y), EMPTY_SYMBOL, empty);
            }
        }

        // Food view
        let food = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        for &pos in state.food.iter().filter(|&&pos| state.is_in_bounds(pos)) {
            canvas.draw_cell(pos, FOOD_SYMBOL, food);
        }

        // Snake view, head last so it stays visible on top of food
        let body = Style::default().fg(Color::Green);
        for &pos in state.snake.segments().skip(1) {
            if state.is_in_bounds(pos) {
                canvas.draw_cell(pos, BODY_SYMBOL, body);
            }
        }
        let head = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if state.is_in_bounds(state.snake.head()) {
            canvas.draw_cell(state.snake.head(), HEAD_SYMBOL, head);
        }
    }
}

struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some((dx, dy)) = cell_origin(pos) else {
            return;
        };
        if dx >= self.area.width || dy >= self.area.height {
            return;
        }
        let (x, y) = (self.area.x + dx, self.area.y + dy);
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_symbol(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
