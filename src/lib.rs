//! Snaky - a terminal Snake game on a fixed, walled grid
//!
//! This library provides:
//! - Core game logic and the tick loop (game module)
//! - The renderer contract and its terminal implementation (render module)
//! - Keyboard mapping (input module)

pub mod game;
pub mod input;
pub mod render;
