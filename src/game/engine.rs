use super::{
    action::Direction,
    config::GameConfig,
    state::{BoardSize, GameState, Position, Snake},
};
use anyhow::{Context, Result};
use log::debug;
use rand::Rng;
use rand::rngs::ThreadRng;

/// Information about a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickInfo {
    /// Food cell the snake ate this tick
    pub eaten: Option<Position>,
    /// Cell where the snake ran into itself
    pub collision: Option<Position>,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Whether the game is over after this tick
    pub terminated: bool,
    /// Whether the tick period changed
    pub speed_changed: bool,
    /// Additional information about the tick
    pub info: TickInfo,
}

impl TickResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            speed_changed: false,
            info: TickInfo {
                eaten: None,
                collision: None,
            },
        }
    }

    pub fn ate_food(&self) -> bool {
        self.info.eaten.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    board: BoardSize,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let board = BoardSize::new(config.grid_width, config.grid_height);
        Self { config, board, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board used by the next reset
    pub fn board(&self) -> BoardSize {
        self.board
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start);
        let food = (0..self.config.food_count)
            .map(|_| self.random_cell())
            .collect();

        GameState::new(
            snake,
            food,
            Direction::default(),
            self.board,
            self.config.initial_speed_ms,
        )
    }

    /// Advance the game by one step
    pub fn tick(&mut self, state: &mut GameState) -> TickResult {
        if state.game_over {
            return TickResult::idle(true);
        }
        debug_assert!(!state.snake.is_empty());

        let new_head = state
            .snake
            .head()
            .wrapped_step(state.direction, state.board);

        if state.snake.occupies(new_head) {
            state.game_over = true;
            state.steps += 1;

            let mut result = TickResult::idle(true);
            result.info.collision = Some(new_head);
            return result;
        }

        state.snake.push_head(new_head);
        state.steps += 1;

        let Some(index) = state.food.iter().position(|&food| food == new_head) else {
            state.snake.drop_tail();
            return TickResult::idle(false);
        };

        state.score += 1;
        let previous_speed = state.speed_ms;
        state.speed_ms = state
            .speed_ms
            .saturating_sub(self.config.speed_step_ms)
            .max(self.config.min_speed_ms);

        let spawned = self.random_cell_on(state.board);
        state.food[index] = spawned;
        debug!(
            "Ate food at {:?}, score {}, speed {}ms, new food at {:?}",
            new_head, state.score, state.speed_ms, spawned
        );

        TickResult {
            terminated: false,
            speed_changed: state.speed_ms != previous_speed,
            info: TickInfo {
                eaten: Some(new_head),
                collision: None,
            },
        }
    }

    /// Change the board size for subsequent ticks and resets.
    ///
    /// Cells already outside the new bounds stay where they are; the snake is
    /// pulled back in by the next wrapped step.
    pub fn resize_board(&mut self, state: &mut GameState, board: BoardSize) -> Result<()> {
        board
            .check()
            .with_context(|| format!("cannot resize board to {}x{}", board.width, board.height))?;

        if board != state.board {
            debug!(
                "Board resized from {}x{} to {}x{}",
                state.board.width, state.board.height, board.width, board.height
            );
        }
        self.board = board;
        state.board = board;
        Ok(())
    }

    fn random_cell(&mut self) -> Position {
        self.random_cell_on(self.board)
    }

    /// Uniform over the board; does not avoid the snake or other food
    fn random_cell_on(&mut self, board: BoardSize) -> Position {
        let (width, height) = board.extent();
        let x = self.rng.gen_range(0..width);
        let y = self.rng.gen_range(0..height);
        Position::new(x, y)
    }
}
