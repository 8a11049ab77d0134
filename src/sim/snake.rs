//! The snake body and its movement rules

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::board::Point;

/// Travel direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Geometric opposite (also the mapping used while controls are inverted)
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// One-cell step in this direction (screen coordinates, y down)
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Ordered body segments, head first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
}

impl Snake {
    /// Three collinear segments trailing behind `start`, opposite to `direction`
    pub fn new(start: Point, direction: Direction) -> Self {
        let back = direction.opposite().offset();
        let body = (0..3).map(|i| start + back * i).collect();
        Self { body, direction }
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Change heading unless `dir` would reverse into the neck
    pub fn set_direction(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.direction = dir;
        }
    }

    /// Where the head lands on the next move
    pub fn next_head(&self) -> Point {
        self.head() + self.direction.offset()
    }

    /// Advance one cell. No bounds or collision checks here.
    pub fn move_forward(&mut self, grow: bool) {
        let next = self.next_head();
        self.body.push_front(next);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn occupies(&self, p: Point) -> bool {
        self.body.iter().any(|s| *s == p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    #[test]
    fn test_initial_body() {
        let snake = Snake::new(Point::new(10, 7), Direction::Right);
        assert_eq!(snake.len(), 3);
        let body: Vec<Point> = snake.body().iter().copied().collect();
        assert_eq!(
            body,
            vec![Point::new(10, 7), Point::new(9, 7), Point::new(8, 7)]
        );
    }

    #[test]
    fn test_initial_body_trails_opposite_of_travel() {
        let snake = Snake::new(Point::new(5, 5), Direction::Up);
        assert_eq!(snake.tail(), Point::new(5, 7));

        let snake = Snake::new(Point::new(5, 5), Direction::Left);
        assert_eq!(snake.tail(), Point::new(7, 5));
    }

    #[test]
    fn test_next_head_is_pure() {
        let snake = Snake::new(Point::new(10, 7), Direction::Right);
        assert_eq!(snake.next_head(), Point::new(11, 7));
        assert_eq!(snake.next_head(), Point::new(11, 7));
        assert_eq!(snake.head(), Point::new(10, 7));
    }

    #[test]
    fn test_move_forward() {
        let mut snake = Snake::new(Point::new(10, 7), Direction::Right);
        snake.move_forward(false);
        assert_eq!(snake.head(), Point::new(11, 7));
        assert_eq!(snake.tail(), Point::new(9, 7));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_grow() {
        let mut snake = Snake::new(Point::new(10, 7), Direction::Right);
        snake.move_forward(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Point::new(8, 7));
    }

    #[test]
    fn test_change_direction() {
        let mut snake = Snake::new(Point::new(10, 7), Direction::Right);
        snake.set_direction(Direction::Up);
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.next_head(), Point::new(10, 6));
    }

    #[test]
    fn test_occupies() {
        let snake = Snake::new(Point::new(10, 7), Direction::Right);
        assert!(snake.occupies(snake.head()));
        assert!(snake.occupies(Point::new(8, 7)));
        assert!(!snake.occupies(Point::new(11, 7)));
    }

    proptest! {
        #[test]
        fn prop_no_reversal(dir in direction_strategy()) {
            let mut snake = Snake::new(Point::new(10, 10), dir);
            snake.set_direction(dir.opposite());
            prop_assert_eq!(snake.direction(), dir);
        }

        #[test]
        fn prop_growth_monotonic(moves in prop::collection::vec(any::<bool>(), 1..40)) {
            let mut snake = Snake::new(Point::new(0, 0), Direction::Right);
            for grow in moves {
                let before = snake.len();
                snake.move_forward(grow);
                let expected = if grow { before + 1 } else { before };
                prop_assert_eq!(snake.len(), expected);
            }
        }
    }
}
