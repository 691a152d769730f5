//! Physical configuration for a session
//!
//! Validated once at session start; the simulation itself never fails.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physical parameters of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Playfield width (pixels)
    pub canvas_width: f32,
    /// Playfield height (pixels)
    pub canvas_height: f32,
    /// Gravity applied per tick (before the inflation factor)
    pub gravity: f32,
    /// Base scroll speed before difficulty scaling
    pub base_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            gravity: GRAVITY,
            base_speed: BASE_SPEED,
        }
    }
}

impl SimConfig {
    /// Minimum canvas height that still fits an obstacle gap
    pub fn min_canvas_height() -> f32 {
        2.0 * MIN_PILLAR_HEIGHT + OBSTACLE_GAP
    }

    /// Reject impossible physical configurations
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas_width > 0.0) || !self.canvas_width.is_finite() {
            return Err(ConfigError::InvalidCanvasWidth(self.canvas_width));
        }
        let required = Self::min_canvas_height();
        if !self.canvas_height.is_finite() || self.canvas_height < required {
            return Err(ConfigError::CanvasTooSmall {
                required,
                actual: self.canvas_height,
            });
        }
        if !(self.gravity > 0.0) || !self.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if !(self.base_speed > 0.0) || !self.base_speed.is_finite() {
            return Err(ConfigError::InvalidBaseSpeed(self.base_speed));
        }
        Ok(())
    }
}

/// Session-start configuration errors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Canvas cannot fit two minimum pillars plus the gap
    CanvasTooSmall { required: f32, actual: f32 },
    InvalidCanvasWidth(f32),
    InvalidGravity(f32),
    InvalidBaseSpeed(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::CanvasTooSmall { required, actual } => write!(
                f,
                "canvas height {actual} cannot fit the minimum obstacle layout ({required} required)"
            ),
            ConfigError::InvalidCanvasWidth(w) => write!(f, "invalid canvas width: {w}"),
            ConfigError::InvalidGravity(g) => write!(f, "invalid gravity: {g}"),
            ConfigError::InvalidBaseSpeed(s) => write!(f, "invalid base speed: {s}"),
        }
    }
}

impl std::error::Error for ConfigError {}
