//! Grid Snake - rules engine for a grid-based snake game
//!
//! This library provides:
//! - The board engine: grid, snake body, food, direction buffering, scoring (game module)
//! - Presentation phases driven by an external clock (modes::lifecycle)
//! - A terminal front end: input mapping, ratatui rendering, tokio loop driver

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
