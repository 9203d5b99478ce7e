use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::board::{BoardView, CELL_COLUMNS, CELL_ROWS};
use crate::game::{BoardSize, GameState};
use crate::metrics::GameMetrics;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
/// One border line on each side of the board
const BORDER: u16 = 2;

/// Largest board that fits a terminal of `cols` x `rows` characters
pub fn board_for_terminal(cols: u16, rows: u16) -> BoardSize {
    let width = cols.saturating_sub(BORDER);
    let height = rows.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + BORDER);
    BoardSize::from_viewport(
        width.into(),
        height.into(),
        CELL_COLUMNS.into(),
        CELL_ROWS.into(),
    )
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let [header, game_area, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(state, metrics), header);

        if state.game_over {
            frame.render_widget(self.render_game_over(state, metrics), game_area);
        } else {
            let board_area = Self::center_board(game_area, state.board);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake ");
            let inner = block.inner(board_area);
            frame.render_widget(block, board_area);
            frame.render_widget(BoardView::new(state), inner);
        }

        frame.render_widget(self.render_controls(), footer);
    }

    fn center_board(area: Rect, board: BoardSize) -> Rect {
        let width = u16::try_from(board.width)
            .unwrap_or(u16::MAX)
            .saturating_mul(CELL_COLUMNS)
            .saturating_add(BORDER);
        let height = u16::try_from(board.height)
            .unwrap_or(u16::MAX)
            .saturating_mul(CELL_ROWS)
            .saturating_add(BORDER);

        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        area
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
                Span::raw("    "),
                Span::styled("Speed: ", label),
                Span::styled(format!("{}ms", state.speed_ms), value),
                Span::raw("    "),
                Span::styled("Best: ", label),
                Span::styled(metrics.high_score.to_string(), value),
                Span::raw("    "),
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), value),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if state.score > 0 && state.score == metrics.high_score {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default().fg(Color::Green),
            )));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" to restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn state() -> GameState {
        GameState::new(
            Snake::new(Position::new(3, 3)),
            vec![Position::new(1, 1)],
            Direction::Down,
            BoardSize::new(10, 8),
            200,
        )
    }

    #[test]
    fn test_board_for_terminal() {
        // 80 columns minus borders is 39 cells; 30 rows minus chrome is 22
        assert_eq!(board_for_terminal(80, 30), BoardSize::new(39, 22));
        assert!(board_for_terminal(2, 30).is_degenerate());
        assert!(board_for_terminal(80, 8).is_degenerate());
    }

    #[test]
    fn test_oversized_board_fills_the_area() {
        let area = Rect::new(0, 3, 60, 14);

        let centered = Renderer::center_board(area, BoardSize::new(70_000, 8));
        assert_eq!(centered.width, 60);
        assert_eq!(centered.height, 10);

        let centered = Renderer::center_board(area, BoardSize::new(10, 70_000));
        assert_eq!(centered.width, 22);
        assert_eq!(centered.height, 14);
    }

    #[test]
    fn test_board_fits_the_terminal_it_was_derived_from() {
        let mut terminal = Terminal::new(TestBackend::new(44, 20)).unwrap();
        let mut state = state();
        state.board = board_for_terminal(44, 20);
        state.snake = Snake::new(Position::new(
            state.board.width as i32 - 1,
            state.board.height as i32 - 1,
        ));

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &GameMetrics::new()))
            .unwrap();

        assert!(screen_text(&terminal).contains('■'));
    }

    #[test]
    fn test_renders_running_game() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = state();
        state.score = 7;

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &GameMetrics::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 7"));
        assert!(text.contains("200ms"));
        assert!(text.contains('■'));
        assert!(text.contains('●'));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_renders_game_over() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut state = state();
        state.score = 4;
        state.game_over = true;
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(4);

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &metrics))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 4"));
        assert!(text.contains("New high score!"));
    }
}
