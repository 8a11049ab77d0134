//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from the caller, never read from a clock
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod board;
pub mod food;
pub mod snake;
pub mod state;
pub mod tick;

pub use board::{Board, Point};
pub use food::{Food, FoodEffect, FoodKind, FoodManager, kind_for_roll};
pub use snake::{Direction, Snake};
pub use state::{ActiveEffects, GameEvent, GameState};
pub use tick::step;
