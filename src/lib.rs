//! Fruit Snake - a browser Snake game with power-up food
//!
//! Core modules:
//! - `sim`: Deterministic game state (board, snake, food, timed effects)
//! - `renderer`: SVG rendering of the board
//! - `platform`: Browser/native platform abstraction
//! - `audio`: Procedural sound cues for game events

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod screen;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Settings, Skin};

use sim::Point;

/// Game configuration constants
pub mod consts {
    /// Default board size in cells
    pub const COLS: i32 = 20;
    pub const ROWS: i32 = 15;
    /// Default cell size in pixels
    pub const CELL_SIZE: u32 = 30;

    /// Starting tick delay (ms)
    pub const BASE_TICK_MS: u32 = 140;
    /// Start screen fade-out before play begins (ms)
    pub const START_ANIMATION_MS: i32 = 800;

    /// Effect durations (ms of unpaused time)
    pub const INVERT_DURATION_MS: f64 = 30_000.0;
    pub const SHIELD_DURATION_MS: f64 = 20_000.0;
    pub const DOUBLE_POINTS_DURATION_MS: f64 = 15_000.0;

    /// Tick delay bounds (ms)
    pub const MIN_INVERTED_TICK_MS: u32 = 70;
    pub const MIN_TICK_MS: u32 = 80;
    pub const MAX_TICK_MS: u32 = 200;

    /// Tick delay multipliers
    pub const INVERTED_SPEED_MULTIPLIER: f64 = 0.75;
    pub const SPEED_UP_MULTIPLIER: f64 = 0.85;
    pub const SLOW_DOWN_MULTIPLIER: f64 = 1.2;
}

/// Board layout for a given screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub cols: i32,
    pub rows: i32,
    pub cell_size: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cols: consts::COLS,
            rows: consts::ROWS,
            cell_size: consts::CELL_SIZE,
        }
    }
}

impl BoardConfig {
    /// Pick a board size that fits the viewport
    pub fn responsive(screen_width: f64, screen_height: f64) -> Self {
        let (cols, rows, cell_size) = if screen_width <= 480.0 && screen_height > screen_width {
            (16, 12, 17)
        } else if screen_width <= 768.0 {
            (18, 14, 22)
        } else if screen_width <= 1024.0 {
            (19, 14, 28)
        } else {
            (consts::COLS, consts::ROWS, consts::CELL_SIZE)
        };
        Self {
            cols,
            rows,
            cell_size,
        }
    }

    pub fn board(&self) -> sim::Board {
        sim::Board::new(self.cols, self.rows)
    }

    /// Snake spawn point: a third of the way in, vertically centered
    pub fn start_position(&self) -> Point {
        Point::new(self.cols / 3, self.rows / 2)
    }

    pub fn validate(&self, base_tick_ms: u32) -> Result<(), ConfigError> {
        if self.cols < 10 || self.rows < 10 {
            return Err(ConfigError::BoardTooSmall {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if !(15..=50).contains(&self.cell_size) {
            return Err(ConfigError::CellSizeOutOfRange(self.cell_size));
        }
        if !(50..=500).contains(&base_tick_ms) {
            return Err(ConfigError::TickOutOfRange(base_tick_ms));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BoardTooSmall { cols: i32, rows: i32 },
    CellSizeOutOfRange(u32),
    TickOutOfRange(u32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::BoardTooSmall { cols, rows } => {
                write!(f, "Board too small: {}x{} (minimum 10x10)", cols, rows)
            }
            ConfigError::CellSizeOutOfRange(size) => {
                write!(f, "Cell size out of range: {} (15-50)", size)
            }
            ConfigError::TickOutOfRange(ms) => {
                write!(f, "Base tick out of range: {}ms (50-500)", ms)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
