//! Fixed tick simulation step
//!
//! Moves the snake one cell, resolves collisions and food, applies effects.

use super::food::{Food, FoodKind};
use super::state::{GameEvent, GameState, scale_speed};
use crate::consts::*;

/// Advance the game by one tick at caller time `now`
pub fn step(state: &mut GameState, now: f64) {
    if !state.alive {
        return;
    }

    let adjusted = state.adjusted_now(now);
    let next = state.snake.next_head();

    if !state.board.in_bounds(next) || state.snake.occupies(next) {
        if state.shielded(adjusted) {
            // Bounce: the collision is spent on the shield and the head stays put
            state.shield_active = false;
            state.shield_until = 0.0;
            state.can_turn = true;
            state.events.push(GameEvent::Block);
            log::debug!("Shield absorbed collision at ({}, {})", next.x, next.y);
        } else {
            state.alive = false;
            state.events.push(GameEvent::Dead);
            log::info!(
                "Snake died at ({}, {}) with score {} and length {}",
                next.x,
                next.y,
                state.score,
                state.snake.len()
            );
        }
        return;
    }

    let eaten = state.food.consume_at(next);
    state.snake.move_forward(eaten.is_some());

    if let Some(food) = eaten {
        eat(state, &food, adjusted);
        state.spawn_food();
    }

    state.can_turn = true;
}

/// Score the food and apply its effect
fn eat(state: &mut GameState, food: &Food, adjusted: f64) {
    let doubled = adjusted < state.double_points_until;
    state.score += if doubled { food.value * 2 } else { food.value };

    let shielded = state.shielded(adjusted);
    match food.kind {
        FoodKind::Mushroom => {
            if shielded {
                state.events.push(GameEvent::Heal);
            } else {
                state.invert_until = adjusted + INVERT_DURATION_MS;
            }
        }
        FoodKind::Pizza => {
            if shielded {
                state.events.push(GameEvent::Heal);
            } else {
                state.speed_ms = scale_speed(state.speed_ms, SPEED_UP_MULTIPLIER).max(MIN_TICK_MS);
            }
        }
        FoodKind::Banana => {
            if !shielded {
                state.speed_ms =
                    scale_speed(state.speed_ms, SLOW_DOWN_MULTIPLIER).min(MAX_TICK_MS);
            }
        }
        FoodKind::Pineapple => {
            state.double_points_until = adjusted + DOUBLE_POINTS_DURATION_MS;
        }
        FoodKind::Coconut => {
            state.shield_active = true;
            state.shield_until = adjusted + SHIELD_DURATION_MS;
        }
        FoodKind::Cherry => {}
    }

    log::debug!(
        "Ate {} for {}{} (score {})",
        food.kind.as_str(),
        food.value,
        if doubled { " x2" } else { "" },
        state.score
    );
    state.events.push(GameEvent::FoodEaten(food.kind));
}
