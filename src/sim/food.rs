//! Food kinds and the single-item food spawner

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::board::{Board, Point};

/// Food types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Cherry,
    Banana,
    Coconut,
    Pineapple,
    Pizza,
    Mushroom,
}

/// Timed or permanent effect triggered by eating a food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodEffect {
    /// Controls inverted for a while
    Invert,
    /// Permanent tick speedup
    SpeedUp,
    /// Permanent tick slowdown
    SlowDown,
    /// Absorbs one fatal collision
    Shield,
    DoublePoints,
}

impl FoodKind {
    pub const ALL: [FoodKind; 6] = [
        FoodKind::Cherry,
        FoodKind::Banana,
        FoodKind::Coconut,
        FoodKind::Pineapple,
        FoodKind::Pizza,
        FoodKind::Mushroom,
    ];

    /// Base score value
    pub fn value(&self) -> u64 {
        match self {
            FoodKind::Cherry => 100,
            FoodKind::Banana => 120,
            FoodKind::Coconut => 150,
            FoodKind::Pineapple => 200,
            FoodKind::Pizza => 400,
            FoodKind::Mushroom => 350,
        }
    }

    pub fn effect(&self) -> Option<FoodEffect> {
        match self {
            FoodKind::Cherry => None,
            FoodKind::Banana => Some(FoodEffect::SlowDown),
            FoodKind::Coconut => Some(FoodEffect::Shield),
            FoodKind::Pineapple => Some(FoodEffect::DoublePoints),
            FoodKind::Pizza => Some(FoodEffect::SpeedUp),
            FoodKind::Mushroom => Some(FoodEffect::Invert),
        }
    }

    /// Spawn probability (all kinds sum to 1.0)
    pub fn probability(&self) -> f64 {
        match self {
            FoodKind::Cherry => 0.25,
            FoodKind::Banana => 0.25,
            FoodKind::Coconut => 0.10,
            FoodKind::Pineapple => 0.10,
            FoodKind::Pizza => 0.15,
            FoodKind::Mushroom => 0.15,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            FoodKind::Cherry => "🍒",
            FoodKind::Banana => "🍌",
            FoodKind::Coconut => "🥥",
            FoodKind::Pineapple => "🍍",
            FoodKind::Pizza => "🍕",
            FoodKind::Mushroom => "🍄",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodKind::Cherry => "cherry",
            FoodKind::Banana => "banana",
            FoodKind::Coconut => "coconut",
            FoodKind::Pineapple => "pineapple",
            FoodKind::Pizza => "pizza",
            FoodKind::Mushroom => "mushroom",
        }
    }
}

/// Cumulative spawn thresholds, in listing order
const KIND_THRESHOLDS: [(FoodKind, f64); 6] = [
    (FoodKind::Cherry, 0.25),
    (FoodKind::Banana, 0.50),
    (FoodKind::Coconut, 0.60),
    (FoodKind::Pineapple, 0.70),
    (FoodKind::Pizza, 0.85),
    (FoodKind::Mushroom, 1.00),
];

/// Map a uniform roll in [0, 1) onto a food kind.
/// A roll that slips past every band lands on the last-listed kind.
pub fn kind_for_roll(roll: f64) -> FoodKind {
    KIND_THRESHOLDS
        .iter()
        .find(|(_, threshold)| roll < *threshold)
        .map(|(kind, _)| *kind)
        .unwrap_or(FoodKind::Mushroom)
}

/// A food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Point,
    pub kind: FoodKind,
    pub value: u64,
    pub effect: Option<FoodEffect>,
}

impl Food {
    pub fn new(pos: Point, kind: FoodKind) -> Self {
        Self {
            pos,
            kind,
            value: kind.value(),
            effect: kind.effect(),
        }
    }
}

/// Holds at most one food item and places new ones
#[derive(Debug, Clone)]
pub struct FoodManager {
    food: Option<Food>,
    rng: Pcg32,
}

impl FoodManager {
    pub fn new(seed: u64) -> Self {
        Self {
            food: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Place a new food on a random free cell. Clears the food when the board is full.
    pub fn spawn(&mut self, board: &Board, blocked: &HashSet<String>) {
        let cells: Vec<Point> = board
            .cells()
            .filter(|p| !blocked.contains(&board.key(*p)))
            .collect();

        if cells.is_empty() {
            log::debug!("No free cell for food");
            self.food = None;
            return;
        }

        let pos = cells[self.rng.random_range(0..cells.len())];
        let kind = kind_for_roll(self.rng.random::<f64>());
        self.food = Some(Food::new(pos, kind));
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    /// Take the food if it sits at `p`
    pub fn consume_at(&mut self, p: Point) -> Option<Food> {
        match self.food {
            Some(food) if food.pos == p => self.food.take(),
            _ => None,
        }
    }

    /// Put a specific food on the board, replacing any existing one
    pub fn place(&mut self, food: Food) {
        self.food = Some(food);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(board: &Board, points: &[(i32, i32)]) -> HashSet<String> {
        points
            .iter()
            .map(|&(x, y)| board.key(Point::new(x, y)))
            .collect()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let total: f64 = FoodKind::ALL.iter().map(|k| k.probability()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_values_and_effects() {
        assert_eq!(FoodKind::Cherry.value(), 100);
        assert_eq!(FoodKind::Pizza.value(), 400);
        assert_eq!(FoodKind::Cherry.effect(), None);
        assert_eq!(FoodKind::Mushroom.effect(), Some(FoodEffect::Invert));
        assert_eq!(FoodKind::Coconut.effect(), Some(FoodEffect::Shield));
    }

    #[test]
    fn test_kind_for_roll_bands() {
        assert_eq!(kind_for_roll(0.0), FoodKind::Cherry);
        assert_eq!(kind_for_roll(0.2499), FoodKind::Cherry);
        assert_eq!(kind_for_roll(0.25), FoodKind::Banana);
        assert_eq!(kind_for_roll(0.55), FoodKind::Coconut);
        assert_eq!(kind_for_roll(0.65), FoodKind::Pineapple);
        assert_eq!(kind_for_roll(0.80), FoodKind::Pizza);
        assert_eq!(kind_for_roll(0.99), FoodKind::Mushroom);
    }

    #[test]
    fn test_kind_for_roll_falls_back_to_last_kind() {
        assert_eq!(kind_for_roll(1.0), FoodKind::Mushroom);
        assert_eq!(kind_for_roll(f64::NAN), FoodKind::Mushroom);
    }

    #[test]
    fn test_spawn_avoids_blocked_cells() {
        let board = Board::new(5, 5);
        let blocked = keys(&board, &[(0, 0), (1, 1), (2, 2)]);
        let mut fm = FoodManager::new(7);
        for _ in 0..50 {
            fm.spawn(&board, &blocked);
            let food = fm.food().copied().expect("free cells remain");
            assert!(!blocked.contains(&board.key(food.pos)));
            assert!(board.in_bounds(food.pos));
            assert!(food.value > 0);
            assert_eq!(food.value, food.kind.value());
        }
    }

    #[test]
    fn test_spawn_single_free_cell() {
        let board = Board::new(2, 2);
        let blocked = keys(&board, &[(0, 0), (1, 0), (0, 1)]);
        let mut fm = FoodManager::new(1);
        fm.spawn(&board, &blocked);
        assert_eq!(fm.food().map(|f| f.pos), Some(Point::new(1, 1)));
    }

    #[test]
    fn test_spawn_full_board_clears_food() {
        let board = Board::new(2, 1);
        let mut fm = FoodManager::new(3);
        fm.spawn(&board, &HashSet::new());
        assert!(fm.food().is_some());

        let blocked = keys(&board, &[(0, 0), (1, 0)]);
        fm.spawn(&board, &blocked);
        assert!(fm.food().is_none());
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let board = Board::new(20, 15);
        let mut a = FoodManager::new(42);
        let mut b = FoodManager::new(42);
        for _ in 0..10 {
            a.spawn(&board, &HashSet::new());
            b.spawn(&board, &HashSet::new());
            assert_eq!(a.food(), b.food());
        }
    }

    #[test]
    fn test_consume_at() {
        let mut fm = FoodManager::new(0);
        fm.place(Food::new(Point::new(3, 4), FoodKind::Cherry));

        assert!(fm.consume_at(Point::new(4, 4)).is_none());
        assert_eq!(fm.food().map(|f| f.pos), Some(Point::new(3, 4)));

        let eaten = fm.consume_at(Point::new(3, 4)).expect("food at position");
        assert_eq!(eaten.kind, FoodKind::Cherry);
        assert!(fm.food().is_none());
        assert!(fm.consume_at(Point::new(3, 4)).is_none());
    }
}
