use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Step one cell in `direction`, re-entering from the opposite edge
    /// when the step leaves the board
    pub fn wrapped_step(&self, direction: Direction, board: BoardSize) -> Self {
        let (dx, dy) = direction.delta();
        let next = self.moved_by(dx, dy);
        let (width, height) = board.extent();
        Self {
            x: next.x.rem_euclid(width),
            y: next.y.rem_euclid(height),
        }
    }
}

/// Largest board side; the board is drawn in a terminal
pub const MAX_BOARD_SIDE: usize = u16::MAX as usize;

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

impl BoardSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// How many whole cells fit into a viewport
    pub fn from_viewport(width: u32, height: u32, cell_width: u32, cell_height: u32) -> Self {
        Self {
            width: (width / cell_width.max(1)) as usize,
            height: (height / cell_height.max(1)) as usize,
        }
    }

    /// A board with no cells in some dimension cannot host a snake
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Reject boards that cannot host a snake or do not fit cell coordinates
    pub fn check(&self) -> Result<()> {
        ensure!(
            !self.is_degenerate(),
            "board must be at least 1x1, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.width <= MAX_BOARD_SIDE && self.height <= MAX_BOARD_SIDE,
            "board sides are limited to {MAX_BOARD_SIDE}, got {}x{}",
            self.width,
            self.height
        );
        Ok(())
    }

    /// Width and height as cell coordinates, saturating at `i32::MAX`
    pub fn extent(&self) -> (i32, i32) {
        (
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    pub fn contains(&self, pos: Position) -> bool {
        let (width, height) = self.extent();
        pos.x >= 0 && pos.x < width && pos.y >= 0 && pos.y < height
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<Position>,
}

impl Snake {
    /// A snake made of a single cell
    pub fn new(head: Position) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from head-first segments.
    ///
    /// Returns `None` for an empty segment list.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Add a new head in front of the current one
    pub fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    /// Drop the last segment, never the head
    pub fn drop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: BoardSize,
    pub snake: Snake,
    /// Food items; duplicates and overlaps with the snake are allowed
    pub food: Vec<Position>,
    /// Heading used by the next tick
    pub direction: Direction,
    pub score: u32,
    /// Milliseconds per tick, lower is faster
    pub speed_ms: u64,
    pub steps: u32,
    pub game_over: bool,
}

impl GameState {
    /// Create a new running game state
    pub fn new(
        snake: Snake,
        food: Vec<Position>,
        direction: Direction,
        board: BoardSize,
        speed_ms: u64,
    ) -> Self {
        Self {
            board,
            snake,
            food,
            direction,
            score: 0,
            speed_ms,
            steps: 0,
            game_over: false,
        }
    }

    /// Change heading from the next tick on. Reversing into the body is allowed.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn is_running(&self) -> bool {
        !self.game_over
    }

    /// Current tick period
    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.board.contains(pos)
    }
}
