//! Deferred events and the audio boundary
//!
//! The original host staggered follow-up spawns and multi-tone cues with
//! wall-clock timers. Here every delayed effect is an entry in a queue
//! keyed by the monotonic tick counter and stamped with the session
//! generation, so a timer from a superseded run can never touch live
//! state.

use serde::{Deserialize, Serialize};

/// Discrete sound cues for the host's synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    Jump,
    Collect,
    Milestone,
    RocketStart,
    Crash,
    CoinPickup,
}

/// A delayed state mutation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Power-up drop trailing an obstacle spawn
    SpawnPowerUp { x: f32 },
    /// Second coin of a pair
    SpawnCoin { x: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct DeferredEvent {
    due_tick: u64,
    generation: u32,
    action: DeferredAction,
}

/// Tick-keyed, generation-guarded event queue
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeferredQueue {
    events: Vec<DeferredEvent>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, due_tick: u64, generation: u32, action: DeferredAction) {
        self.events.push(DeferredEvent {
            due_tick,
            generation,
            action,
        });
    }

    /// Remove and return every action due at `now` for the live
    /// generation, in scheduling order. Stale-generation events are
    /// discarded no matter when they were due.
    pub fn drain_due(&mut self, now: u64, generation: u32) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.events.retain(|event| {
            if event.generation != generation {
                return false;
            }
            if event.due_tick <= now {
                due.push(event.action);
                return false;
            }
            true
        });
        due
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
