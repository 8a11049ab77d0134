//! Grid-to-pixel layout for the SVG board

use glam::Vec2;

use crate::sim::Point;

/// Axis-aligned rectangle in SVG user units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Straight line in SVG user units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
}

/// Pixel rectangle covering one cell
pub fn cell_rect(p: Point, cell: u32) -> Rect {
    let size = cell as f32;
    Rect {
        x: p.x as f32 * size,
        y: p.y as f32 * size,
        width: size,
        height: size,
    }
}

/// Pixel center of one cell (anchor for food glyphs)
pub fn cell_center(p: Point, cell: u32) -> Vec2 {
    let size = cell as f32;
    (p.as_vec2() + Vec2::splat(0.5)) * size
}

/// Vertical then horizontal grid lines, including the outer border
pub fn grid_lines(cols: i32, rows: i32, cell: u32) -> Vec<Line> {
    let size = cell as f32;
    let w = cols as f32 * size;
    let h = rows as f32 * size;

    let verticals = (0..=cols).map(|x| {
        let px = x as f32 * size;
        Line {
            start: Vec2::new(px, 0.0),
            end: Vec2::new(px, h),
        }
    });
    let horizontals = (0..=rows).map(|y| {
        let py = y as f32 * size;
        Line {
            start: Vec2::new(0.0, py),
            end: Vec2::new(w, py),
        }
    });

    verticals.chain(horizontals).collect()
}

/// `viewBox` attribute for the whole board
pub fn view_box(cols: i32, rows: i32, cell: u32) -> String {
    format!("0 0 {} {}", cols as u32 * cell, rows as u32 * cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_rect() {
        let r = cell_rect(Point::new(2, 3), 30);
        assert_eq!(r, Rect { x: 60.0, y: 90.0, width: 30.0, height: 30.0 });
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(cell_center(Point::new(0, 0), 20), Vec2::new(10.0, 10.0));
        assert_eq!(cell_center(Point::new(4, 1), 20), Vec2::new(90.0, 30.0));
    }

    #[test]
    fn test_grid_lines_cover_border() {
        let lines = grid_lines(20, 15, 30);
        assert_eq!(lines.len(), 21 + 16);
        let last_vertical = lines[20];
        assert_eq!(last_vertical.start, Vec2::new(600.0, 0.0));
        assert_eq!(last_vertical.end, Vec2::new(600.0, 450.0));
        let last = lines[lines.len() - 1];
        assert_eq!(last.start, Vec2::new(0.0, 450.0));
        assert_eq!(last.end, Vec2::new(600.0, 450.0));
    }

    #[test]
    fn test_view_box() {
        assert_eq!(view_box(20, 15, 30), "0 0 600 450");
        assert_eq!(view_box(16, 12, 17), "0 0 272 204");
    }
}
