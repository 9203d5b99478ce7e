//! Wrap Snake - Snake on a board without walls
//!
//! This library provides:
//! - Core game logic: wraparound movement, food, speed ramp (game module)
//! - A speed-following tick scheduler (schedule module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod schedule;
