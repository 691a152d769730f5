//! Collision detection for the bull against pillars and pickups
//!
//! Obstacles test an inset bull hitbox (10% margin per side) against the
//! two pillar rectangles; pickups use the full bounding box against
//! their own square. The asymmetry is intentional: pillar hits are
//! slightly more forgiving than pickups.

use glam::Vec2;

use super::state::{Bull, Coin, Obstacle, PowerUp};
use crate::consts::*;

fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// The bull's inset hitbox used against obstacles
fn bull_hitbox(bull: &Bull) -> (Vec2, Vec2) {
    let inset = Vec2::new(
        BULL_WIDTH * OBSTACLE_HITBOX_MARGIN,
        BULL_HEIGHT * OBSTACLE_HITBOX_MARGIN,
    );
    (bull.pos + inset, Vec2::new(BULL_WIDTH, BULL_HEIGHT) - inset * 2.0)
}

/// The bull's full bounding box used against pickups
fn bull_bounds(bull: &Bull) -> (Vec2, Vec2) {
    (bull.pos, Vec2::new(BULL_WIDTH, BULL_HEIGHT))
}

/// Does the bull hit either pillar of this obstacle?
pub fn obstacle_hits_bull(obstacle: &Obstacle, bull: &Bull, canvas_height: f32) -> bool {
    let (pos, size) = bull_hitbox(bull);
    let top = rects_overlap(
        pos,
        size,
        Vec2::new(obstacle.x, 0.0),
        Vec2::new(OBSTACLE_WIDTH, obstacle.gap_y),
    );
    let bottom_y = obstacle.gap_y + OBSTACLE_GAP;
    let bottom = rects_overlap(
        pos,
        size,
        Vec2::new(obstacle.x, bottom_y),
        Vec2::new(OBSTACLE_WIDTH, canvas_height - bottom_y),
    );
    top || bottom
}

pub fn powerup_hits_bull(power_up: &PowerUp, bull: &Bull) -> bool {
    let (pos, size) = bull_bounds(bull);
    rects_overlap(pos, size, power_up.pos, Vec2::splat(POWERUP_SIZE))
}

pub fn coin_hits_bull(coin: &Coin, bull: &Bull) -> bool {
    let (pos, size) = bull_bounds(bull);
    rects_overlap(pos, size, coin.pos, Vec2::splat(COIN_SIZE))
}
