//! Wrap Snake - Snake on a toroidal grid
//!
//! This library provides:
//! - Core game rules (game module)
//! - The fixed-cadence update/render loop (game_loop module)
//! - Draw-command rendering and a terminal pixel surface (render module)
//! - Keyboard intent capture (input module)
//! - Interactive and headless execution modes (modes module)

pub mod config;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod modes;
pub mod render;
