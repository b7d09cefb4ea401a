//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O or rendering dependencies.
//! Positions live on a toroidal grid: the snake leaves one edge and re-enters
//! from the opposite one.

pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use grid::{Grid, Position};
pub use state::{Food, GameState, Snake};
