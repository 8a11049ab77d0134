//! Game state and core simulation types
//!
//! All timestamps are milliseconds on the caller's clock (`Date.now()` in the
//! browser). Effect expiries are compared against *adjusted* time, which is
//! the caller's clock minus every millisecond spent paused.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::board::{Board, Point};
use super::food::{Food, FoodKind, FoodManager};
use super::snake::{Direction, Snake};
use crate::consts::*;

/// Notable things that happened inside the simulation, for audio/HUD cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStart,
    Pause,
    Resume,
    /// Shield absorbed a fatal collision
    Block,
    /// Shield absorbed a harmful food effect
    Heal,
    Dead,
    FoodEaten(FoodKind),
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::GameStart => "gameStart",
            GameEvent::Pause => "pause",
            GameEvent::Resume => "resume",
            GameEvent::Block => "block",
            GameEvent::Heal => "heal",
            GameEvent::Dead => "dead",
            GameEvent::FoodEaten(kind) => kind.as_str(),
        }
    }
}

/// Which timed effects are currently running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub invert: bool,
    pub shield: bool,
    pub double_points: bool,
}

impl ActiveEffects {
    pub fn any(&self) -> bool {
        self.invert || self.shield || self.double_points
    }
}

/// Complete game state for one board
#[derive(Debug, Clone)]
pub struct GameState {
    pub(super) board: Board,
    pub(super) snake: Snake,
    pub(super) food: FoodManager,
    /// Seed for food placement; each run derives its own stream from it
    seed: u64,
    runs: u64,
    pub(super) score: u64,
    pub(super) alive: bool,
    pub(super) speed_ms: u32,
    base_speed_ms: u32,
    pub(super) invert_until: f64,
    pub(super) shield_active: bool,
    pub(super) shield_until: f64,
    pub(super) double_points_until: f64,
    /// One accepted direction change per tick
    pub(super) can_turn: bool,
    pause_start: Option<f64>,
    total_pause_time: f64,
    pub(super) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a running game with a fresh snake and one food on the board
    pub fn new(board: Board, start: Point, direction: Direction, base_tick_ms: u32, seed: u64) -> Self {
        let mut state = Self {
            board,
            snake: Snake::new(start, direction),
            food: FoodManager::new(food_seed(seed, 0)),
            seed,
            runs: 0,
            score: 0,
            alive: true,
            speed_ms: base_tick_ms,
            base_speed_ms: base_tick_ms,
            invert_until: 0.0,
            shield_active: false,
            shield_until: 0.0,
            double_points_until: 0.0,
            can_turn: true,
            pause_start: None,
            total_pause_time: 0.0,
            events: Vec::new(),
        };
        state.spawn_food();
        state
    }

    /// Advance one tick (see [`super::tick::step`])
    pub fn step(&mut self, now: f64) {
        super::tick::step(self, now);
    }

    // === Read-only views ===

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_paused(&self) -> bool {
        self.pause_start.is_some()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Body segments, head first
    pub fn snake_body(&self) -> Vec<Point> {
        self.snake.body().iter().copied().collect()
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.food()
    }

    pub fn current_speed(&self) -> u32 {
        self.speed_ms
    }

    pub fn base_speed(&self) -> u32 {
        self.base_speed_ms
    }

    pub fn invert_until(&self) -> f64 {
        self.invert_until
    }

    pub fn shield_active(&self) -> bool {
        self.shield_active
    }

    pub fn shield_until(&self) -> f64 {
        self.shield_until
    }

    pub fn double_points_until(&self) -> f64 {
        self.double_points_until
    }

    pub fn total_pause_time(&self) -> f64 {
        self.total_pause_time
    }

    /// Caller time with paused spans removed
    pub fn adjusted_now(&self, now: f64) -> f64 {
        now - self.total_pause_time
    }

    /// Shield is up and will absorb the next collision or harmful effect
    pub(super) fn shielded(&self, adjusted: f64) -> bool {
        self.shield_active && adjusted < self.shield_until
    }

    /// Inverted controls apply (a running shield suppresses them)
    pub(super) fn inverted(&self, adjusted: f64) -> bool {
        adjusted < self.invert_until && !self.shielded(adjusted)
    }

    pub fn active_effects(&self, now: f64) -> ActiveEffects {
        let adjusted = self.adjusted_now(now);
        ActiveEffects {
            invert: adjusted < self.invert_until,
            shield: self.shielded(adjusted),
            double_points: adjusted < self.double_points_until,
        }
    }

    /// Delay before the next `step`; faster while controls are inverted
    pub fn tick_ms(&self, now: f64) -> u32 {
        let adjusted = self.adjusted_now(now);
        if self.inverted(adjusted) {
            scale_speed(self.speed_ms, INVERTED_SPEED_MULTIPLIER).max(MIN_INVERTED_TICK_MS)
        } else {
            self.speed_ms
        }
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Mutators ===

    /// Request a new heading. Only the first request between two ticks counts,
    /// even when the snake ignores it as a reversal.
    pub fn set_direction(&mut self, dir: Direction, now: f64) {
        if !self.can_turn {
            return;
        }
        let adjusted = self.adjusted_now(now);
        let dir = if self.inverted(adjusted) {
            dir.opposite()
        } else {
            dir
        };
        self.snake.set_direction(dir);
        self.can_turn = false;
    }

    /// Begin a paused span. Ignored if already paused.
    pub fn pause(&mut self, now: f64) {
        if self.pause_start.is_some() {
            return;
        }
        self.pause_start = Some(now);
        self.events.push(GameEvent::Pause);
    }

    /// End a paused span; time spent paused stops counting toward effects.
    /// Without a preceding pause this changes nothing.
    pub fn resume(&mut self, now: f64) {
        if self.end_pause(now) {
            self.events.push(GameEvent::Resume);
        }
    }

    /// Start (or restart) play, closing any open paused span
    pub fn start(&mut self, now: f64) {
        self.end_pause(now);
        self.events.push(GameEvent::GameStart);
    }

    fn end_pause(&mut self, now: f64) -> bool {
        match self.pause_start.take() {
            Some(started) => {
                self.total_pause_time += (now - started).max(0.0);
                true
            }
            None => false,
        }
    }

    /// Back to a fresh, running game on the same board
    pub fn reset(&mut self, start: Point, direction: Direction) {
        self.runs += 1;
        self.snake = Snake::new(start, direction);
        self.food = FoodManager::new(food_seed(self.seed, self.runs));
        self.score = 0;
        self.alive = true;
        self.speed_ms = self.base_speed_ms;
        self.invert_until = 0.0;
        self.shield_active = false;
        self.shield_until = 0.0;
        self.double_points_until = 0.0;
        self.can_turn = true;
        self.pause_start = None;
        self.total_pause_time = 0.0;
        self.events.clear();
        self.spawn_food();
        log::info!("Game reset (run {})", self.runs);
    }

    /// Swap in a new board and start over on it
    pub fn resize(&mut self, board: Board, start: Point, direction: Direction) {
        log::info!(
            "Board resized {}x{} -> {}x{}",
            self.board.width(),
            self.board.height(),
            board.width(),
            board.height()
        );
        self.board = board;
        self.reset(start, direction);
    }

    /// Replace whatever food is on the board
    pub fn place_food(&mut self, food: Food) {
        self.food.place(food);
    }

    /// Keys of every cell the snake covers
    pub(super) fn occupied_keys(&self) -> HashSet<String> {
        self.snake
            .body()
            .iter()
            .map(|p| self.board.key(*p))
            .collect()
    }

    pub(super) fn spawn_food(&mut self) {
        let blocked = self.occupied_keys();
        self.food.spawn(&self.board, &blocked);
    }
}

/// Floor of `speed * factor`
pub(super) fn scale_speed(speed_ms: u32, factor: f64) -> u32 {
    (speed_ms as f64 * factor).floor() as u32
}

fn food_seed(seed: u64, run: u64) -> u64 {
    seed ^ run.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
