//! Daily Bull - a market-themed endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `config`: Validated physical configuration
//! - `highscores`: Leaderboard with tolerant JSON persistence
//!
//! Rendering, sound synthesis, and input devices live in the host. The
//! host drives [`sim::tick()`] once per rendered frame, reads entity
//! poses straight off the state, and drains [`sim::AudioCue`]s for its
//! synthesizer.

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use highscores::HighScores;

/// Game tuning constants
pub mod consts {
    /// Default playfield dimensions (pixels)
    pub const DEFAULT_CANVAS_WIDTH: f32 = 800.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

    /// Bull sprite size
    pub const BULL_WIDTH: f32 = 50.0;
    pub const BULL_HEIGHT: f32 = 35.0;
    /// Horizontal lane, as a fraction of canvas width
    pub const BULL_X_FRACTION: f32 = 0.2;

    /// Gravity per tick
    pub const GRAVITY: f32 = 0.6;
    /// Jump impulse (negative = up)
    pub const BASE_JUMP_STRENGTH: f32 = -10.0;
    /// Jump impulse multiplier while leveraged
    pub const LEVERAGE_JUMP_MULTIPLIER: f32 = 1.5;
    pub const LEVERAGE_DURATION_TICKS: u32 = 300;
    pub const ROCKET_DURATION_TICKS: u32 = 180;
    /// Fixed ascent rate while rocketing (gravity suspended)
    pub const ROCKET_ASCENT_VELOCITY: f32 = -2.0;
    /// Velocity kick applied when rocket mode expires
    pub const ROCKET_EXIT_KICK: f32 = -5.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_GAP: f32 = 220.0;
    /// Each pillar must keep at least this much height
    pub const MIN_PILLAR_HEIGHT: f32 = 50.0;
    /// Every Nth obstacle oscillates its gap
    pub const MOVING_OBSTACLE_EVERY: u32 = 4;
    /// Oscillation amplitude around the initial gap position
    pub const GAP_OSCILLATION_RANGE: f32 = 40.0;
    /// Oscillation phase advance per tick
    pub const GAP_OSCILLATION_STEP: f32 = 0.02;

    /// Pickup geometry
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const COIN_SIZE: f32 = 20.0;
    /// Power-ups spawn this far ahead of their obstacle
    pub const POWERUP_LEAD_DISTANCE: f32 = 150.0;
    /// First coin of a pair trails its obstacle by this much
    pub const COIN_LEAD_DISTANCE: f32 = 75.0;
    pub const POWERUP_SPAWN_DELAY_TICKS: u64 = 6;
    pub const SECOND_COIN_DELAY_TICKS: u64 = 30;
    /// Vertical margin keeping pickups away from the screen edges
    pub const PICKUP_SPAWN_MARGIN: f32 = 50.0;
    /// Power-up kind thresholds on a single [0,1) draw:
    /// shield below the first, leverage below the second, rocket above
    pub const POWERUP_SHIELD_THRESHOLD: f32 = 0.5;
    pub const POWERUP_LEVERAGE_THRESHOLD: f32 = 0.85;
    /// Chance an obstacle spawn brings a coin, and that coin a second one
    pub const COIN_CHANCE: f64 = 0.7;
    pub const SECOND_COIN_CHANCE: f64 = 0.5;

    /// Spawn cadence: attempt when the timer exceeds
    /// `max(SPAWN_MIN_INTERVAL, SPAWN_INTERVAL_NUMERATOR / game_speed)`
    pub const SPAWN_MIN_INTERVAL: u32 = 40;
    pub const SPAWN_INTERVAL_NUMERATOR: f32 = 300.0;
    pub const SPAWN_CHANCE: f64 = 0.7;
    /// Raised while rocketing to feed the plow
    pub const SPAWN_CHANCE_ROCKETING: f64 = 0.9;

    /// Scoring and difficulty
    pub const BASE_SPEED: f32 = 3.0;
    pub const BASE_YIELD_RATE: f64 = 0.01;
    pub const PASS_SCORE: f64 = 1.5;
    pub const ROCKET_SMASH_SCORE: f64 = 5.0;
    pub const COIN_VALUE: f64 = 1.0;
    pub const MILESTONE_INTERVAL: f64 = 100.0;
    pub const LEVERAGE_SPEED_MULTIPLIER: f32 = 1.5;
    pub const ROCKET_SPEED_MULTIPLIER: f32 = 3.0;
    pub const LEVERAGE_YIELD_MULTIPLIER: f64 = 2.0;
    pub const ROCKET_YIELD_MULTIPLIER: f64 = 5.0;
    /// Speed and yield growth per score point, outside any mode
    pub const SPEED_SCORE_FACTOR: f32 = 0.005;
    pub const YIELD_SCORE_FACTOR: f64 = 0.001;

    /// Inflation event
    pub const INFLATION_CHANCE: f64 = 0.001;
    pub const INFLATION_DURATION_TICKS: u32 = 300;
    pub const INFLATION_GRAVITY_FACTOR: f32 = 1.3;

    /// Session outcome
    pub const CONTINUE_SCORE_THRESHOLD: f64 = 50.0;
    /// On continue, obstacles closer than this are swept away
    pub const CONTINUE_CLEAR_DISTANCE: f32 = 300.0;

    /// Fractional inset per side of the bull's obstacle hitbox
    pub const OBSTACLE_HITBOX_MARGIN: f32 = 0.1;
}
