//! Procedural spawn scheduling
//!
//! One spawn attempt when the cadence timer runs out; everything the
//! attempt produces (obstacle, trailing power-up, coins) is decided
//! here from the session's single random source.

use glam::Vec2;
use rand::Rng;

use super::events::DeferredAction;
use super::state::{Coin, GameState, Obstacle, PowerUp, PowerUpKind};
use crate::consts::*;

/// Ticks between spawn attempts at the given scroll speed
pub fn spawn_interval(game_speed: f32) -> u32 {
    let scaled = (SPAWN_INTERVAL_NUMERATOR / game_speed).floor() as u32;
    scaled.max(SPAWN_MIN_INTERVAL)
}

/// Advance the cadence timer and, when it expires, make one
/// probabilistic spawn attempt. The timer resets after every attempt,
/// successful or not.
pub fn run_scheduler(state: &mut GameState) {
    state.spawn_timer += 1;
    if state.spawn_timer <= spawn_interval(state.game_speed) {
        return;
    }
    state.spawn_timer = 0;

    // Rocketing raises the odds: more obstacles to plow through
    let chance = if state.bull.is_rocketing() {
        SPAWN_CHANCE_ROCKETING
    } else {
        SPAWN_CHANCE
    };
    if state.rng.random::<f64>() < chance {
        spawn_obstacle(state);
    }
}

/// Spawn one obstacle at the right edge and schedule its followers.
pub(crate) fn spawn_obstacle(state: &mut GameState) {
    let x = state.config.canvas_width;
    let gap_y = random_gap_y(state);
    state.obstacle_counter += 1;
    let oscillating = state.obstacle_counter % MOVING_OBSTACLE_EVERY == 0;
    state.obstacles.push(Obstacle {
        x,
        gap_y,
        initial_gap_y: gap_y,
        oscillating,
        phase: 0.0,
        passed: false,
    });

    // Every 3rd-or-4th obstacle trails a power-up
    let cadence = 3 + state.rng.random_range(0..2u32);
    if state.obstacle_counter % cadence == 0 {
        state.deferred.schedule(
            state.tick_count + POWERUP_SPAWN_DELAY_TICKS,
            state.generation,
            DeferredAction::SpawnPowerUp {
                x: x + POWERUP_LEAD_DISTANCE,
            },
        );
    }

    // Coins ride along independently of the power-up cadence
    if state.rng.random::<f64>() < COIN_CHANCE {
        spawn_coin(state, x + COIN_LEAD_DISTANCE);
        if state.rng.random::<f64>() < SECOND_COIN_CHANCE {
            state.deferred.schedule(
                state.tick_count + SECOND_COIN_DELAY_TICKS,
                state.generation,
                DeferredAction::SpawnCoin { x },
            );
        }
    }
}

pub(crate) fn spawn_power_up(state: &mut GameState, x: f32) {
    let kind = power_up_kind_for_roll(state.rng.random::<f32>());
    let y = random_pickup_y(state);
    state.power_ups.push(PowerUp {
        pos: Vec2::new(x, y),
        kind,
    });
}

pub(crate) fn spawn_coin(state: &mut GameState, x: f32) {
    let y = random_pickup_y(state);
    state.coins.push(Coin {
        pos: Vec2::new(x, y),
    });
}

/// Cumulative thresholds on one draw: shield 50%, leverage 35%, rocket 15%
pub fn power_up_kind_for_roll(roll: f32) -> PowerUpKind {
    if roll < POWERUP_SHIELD_THRESHOLD {
        PowerUpKind::Shield
    } else if roll < POWERUP_LEVERAGE_THRESHOLD {
        PowerUpKind::Leverage
    } else {
        PowerUpKind::Rocket
    }
}

/// Gap placement uniform within the band that keeps both pillars legal
fn random_gap_y(state: &mut GameState) -> f32 {
    let min = MIN_PILLAR_HEIGHT;
    let max = state.config.canvas_height - MIN_PILLAR_HEIGHT - OBSTACLE_GAP;
    state.rng.random_range(min..=max)
}

fn random_pickup_y(state: &mut GameState) -> f32 {
    let max = state.config.canvas_height - 2.0 * PICKUP_SPAWN_MARGIN;
    state.rng.random_range(PICKUP_SPAWN_MARGIN..=PICKUP_SPAWN_MARGIN + max)
}
