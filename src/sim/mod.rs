//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per host frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod spawn;
pub mod state;
pub mod tick;

pub use events::{AudioCue, DeferredAction, DeferredQueue};
pub use spawn::{power_up_kind_for_roll, spawn_interval};
pub use state::{
    ActiveMode, Bull, Coin, GameOverReport, GamePhase, GameState, Obstacle, PowerUp, PowerUpKind,
    QUOTES, oscillated_gap,
};
pub use tick::{TickInput, tick};
