//! Static play field bounds

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Grid cell coordinate, origin top-left, y grows downward
pub type Point = IVec2;

/// Immutable grid dimensions. Replaced wholesale when the board is resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Stable string key for a cell, used for blocked-cell sets
    pub fn key(&self, p: Point) -> String {
        format!("{},{}", p.x, p.y)
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// All cells in row-major order (y outer, x inner)
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}
