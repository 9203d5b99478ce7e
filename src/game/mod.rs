//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board wraps around at every edge, so the only way to lose is to run into
//! the snake's own body.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, TickInfo, TickResult};
pub use state::{BoardSize, GameState, Position, Snake};
