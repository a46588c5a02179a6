//! Core game logic module for Snake
//!
//! The model (`state`, `board`) and the rules (`engine`) have no I/O and can
//! be driven directly; `runner` wires them to a [`Renderer`](crate::render::Renderer)
//! and runs the tick loop.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod runner;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Event};
pub use board::{Board, Icon};
pub use config::{GameConfig, MIN_HEIGHT, MIN_WIDTH, Speed};
pub use engine::{Advance, FOOD_SCORE, GameEngine, Transition};
pub use error::GameError;
pub use runner::{BOARD_FILLED_MESSAGE, Game};
pub use state::{Cell, Food, Snake};
