//! Timing for the game loop
//!
//! A single periodic task drives the game. Its period follows the game speed
//! and is changed explicitly rather than by tearing the loop down.

pub mod ticker;

pub use ticker::TickScheduler;
