//! Core rules for grid snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends drive a [`BoardEngine`] with direction requests and ticks, and read
//! the board back after every step.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{BoardEngine, MAX_BOARD_CELLS, MAX_PENDING_DIRECTIONS, TickResult};
pub use error::EngineError;
pub use state::{CellState, Classification, Grid, Position};
