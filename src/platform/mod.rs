//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock in ms)
//! - Input events (key codes to game commands)
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{Command, map_key};
