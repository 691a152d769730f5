//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{AudioCue, DeferredQueue};
use crate::config::{ConfigError, SimConfig};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Session created, waiting for the start command
    Ready,
    /// Active gameplay
    Running,
    /// Run ended
    GameOver,
}

/// Mode precedence for difficulty and collision resolution.
///
/// The bull can hold a live leverage timer while rocketing; this
/// accessor is the single place that precedence is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMode {
    Normal,
    Leveraged,
    Rocketing,
}

/// The player's bull
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bull {
    /// Position of the sprite's top-left corner; x is a fixed lane
    pub pos: Vec2,
    /// Vertical velocity (negative = up)
    pub vel: f32,
    /// Eased tilt for rendering, derived from velocity
    pub rotation: f32,
    /// Current jump impulse (base, or base * 1.5 while leveraged)
    pub jump_strength: f32,
    /// One-hit shield overlay; cleared by consuming an obstacle hit
    pub shielded: bool,
    /// Remaining leverage ticks
    pub leverage_ticks: Option<u32>,
    /// Remaining rocket ticks
    pub rocket_ticks: Option<u32>,
}

impl Bull {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.canvas_width * BULL_X_FRACTION,
                config.canvas_height / 2.0,
            ),
            vel: 0.0,
            rotation: 0.0,
            jump_strength: BASE_JUMP_STRENGTH,
            shielded: false,
            leverage_ticks: None,
            rocket_ticks: None,
        }
    }

    pub fn is_rocketing(&self) -> bool {
        self.rocket_ticks.is_some()
    }

    pub fn is_leveraged(&self) -> bool {
        self.leverage_ticks.is_some()
    }

    /// Rocketing > Leveraged > Normal
    pub fn active_mode(&self) -> ActiveMode {
        if self.is_rocketing() {
            ActiveMode::Rocketing
        } else if self.is_leveraged() {
            ActiveMode::Leveraged
        } else {
            ActiveMode::Normal
        }
    }

    /// Apply the jump impulse. No-op while rocketing.
    pub fn jump(&mut self) {
        if !self.is_rocketing() {
            self.vel = self.jump_strength;
        }
    }

    /// Advance one tick of vertical physics.
    ///
    /// Returns true when the bull crossed the floor (terminal).
    pub fn update(&mut self, gravity: f32, inflation_factor: f32, canvas_height: f32) -> bool {
        if let Some(ticks) = self.rocket_ticks.as_mut() {
            // Fixed ascent; gravity and impulses are suspended
            self.vel = ROCKET_ASCENT_VELOCITY;
            self.pos.y += self.vel;
            *ticks -= 1;
            if *ticks == 0 {
                self.deactivate_rocket();
            }
            if self.pos.y < 0.0 {
                self.pos.y = 0.0;
            }
            self.ease_rotation();
            return false;
        }

        self.vel += gravity * inflation_factor;
        self.pos.y += self.vel;

        if let Some(ticks) = self.leverage_ticks.as_mut() {
            *ticks -= 1;
            if *ticks == 0 {
                self.deactivate_leverage();
            }
        }

        self.ease_rotation();

        if self.pos.y + BULL_HEIGHT / 2.0 > canvas_height {
            self.pos.y = canvas_height - BULL_HEIGHT / 2.0;
            return true;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel = 0.0;
        }
        false
    }

    pub fn activate_shield(&mut self) {
        self.shielded = true;
    }

    /// Re-collection refreshes the timer; effects never stack.
    pub fn activate_leverage(&mut self) {
        self.leverage_ticks = Some(LEVERAGE_DURATION_TICKS);
        self.jump_strength = BASE_JUMP_STRENGTH * LEVERAGE_JUMP_MULTIPLIER;
    }

    fn deactivate_leverage(&mut self) {
        self.leverage_ticks = None;
        self.jump_strength = BASE_JUMP_STRENGTH;
    }

    /// Rocket mode forces the shield on for its whole duration.
    pub fn activate_rocket(&mut self) {
        self.rocket_ticks = Some(ROCKET_DURATION_TICKS);
        self.shielded = true;
    }

    fn deactivate_rocket(&mut self) {
        self.rocket_ticks = None;
        self.shielded = false;
        self.vel = ROCKET_EXIT_KICK;
    }

    fn ease_rotation(&mut self) {
        let target = if self.is_rocketing() {
            -0.6
        } else {
            (self.vel * 0.05).clamp(-0.4, 0.4)
        };
        self.rotation += (target - self.rotation) * 0.2;
    }
}

/// A pillar pair with a gap the bull must pass through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Top of the gap (top pillar spans 0..gap_y)
    pub gap_y: f32,
    /// Gap position at spawn, the oscillation midpoint
    pub initial_gap_y: f32,
    /// Sinusoidally perturbs the gap when set
    pub oscillating: bool,
    pub phase: f32,
    /// Scored once when the trailing edge clears the bull
    pub passed: bool,
}

impl Obstacle {
    pub fn update(&mut self, speed: f32, canvas_height: f32) {
        self.x -= speed;
        if self.oscillating {
            self.phase += GAP_OSCILLATION_STEP;
            self.gap_y = oscillated_gap(self.initial_gap_y, self.phase, canvas_height);
        }
    }

    pub fn trailing_edge(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }
}

/// Gap position for a given oscillation phase, clamped so both pillars
/// keep their minimum height.
pub fn oscillated_gap(initial_gap_y: f32, phase: f32, canvas_height: f32) -> f32 {
    let min = MIN_PILLAR_HEIGHT;
    let max = canvas_height - MIN_PILLAR_HEIGHT - OBSTACLE_GAP;
    (initial_gap_y + phase.sin() * GAP_OSCILLATION_RANGE).clamp(min, max)
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Leverage,
    Rocket,
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Top-left corner of the square
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn update(&mut self, speed: f32) {
        self.pos.x -= speed;
    }
}

/// A pure score pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Top-left corner of the square
    pub pos: Vec2,
}

impl Coin {
    pub fn update(&mut self, speed: f32) {
        self.pos.x -= speed;
    }
}

/// Flavor text shown on the game-over screen
pub const QUOTES: [&str; 6] = [
    "The market can remain irrational longer than you can remain solvent.",
    "Buy high, sell low.",
    "Liquidity crunch!",
    "Rug pulled.",
    "HODL didn't work this time.",
    "Pigs get slaughtered.",
];

/// Final session outcome, surfaced to the host at game over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOverReport {
    pub final_score: f64,
    /// Score beat the threshold and the session continue is unused
    pub may_continue: bool,
    pub quote: String,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single random source for every stochastic decision
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Monotonic tick counter, keys the deferred queue
    pub tick_count: u64,
    /// Bumped on restart and game over; stale deferred events are dropped
    pub generation: u32,
    pub bull: Bull,
    /// Live entities in spawn order
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub coins: Vec<Coin>,
    /// Cumulative score, fractional passive income included
    pub score: f64,
    /// Effective scroll speed, recomputed every tick
    pub game_speed: f32,
    /// Effective passive accrual, recomputed every tick
    pub yield_rate: f64,
    /// Successful obstacle spawns this run, drives pickup cadence
    pub obstacle_counter: u32,
    pub spawn_timer: u32,
    /// Remaining inflation ticks while the event is active
    pub inflation_ticks: Option<u32>,
    /// One continue per session
    pub has_continue: bool,
    pub deferred: DeferredQueue,
    /// Audio cues emitted this tick, drained by the host
    #[serde(skip)]
    pub cues: Vec<AudioCue>,
    pub outcome: Option<GameOverReport>,
}

impl GameState {
    /// Create a session in the Ready phase.
    ///
    /// Rejects physical configurations that cannot host a legal
    /// obstacle (see [`ConfigError`]).
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("New session, seed {seed}");
        Ok(Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            tick_count: 0,
            generation: 0,
            bull: Bull::new(&config),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            coins: Vec::new(),
            score: 0.0,
            game_speed: config.base_speed,
            yield_rate: BASE_YIELD_RATE,
            obstacle_counter: 0,
            spawn_timer: 0,
            inflation_ticks: None,
            has_continue: true,
            deferred: DeferredQueue::default(),
            cues: Vec::new(),
            outcome: None,
        })
    }

    /// Gravity multiplier from the inflation event
    pub fn inflation_factor(&self) -> f32 {
        if self.inflation_ticks.is_some() {
            INFLATION_GRAVITY_FACTOR
        } else {
            1.0
        }
    }

    /// Begin play from the Ready phase.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Ready {
            self.phase = GamePhase::Running;
        }
    }

    /// Reset all per-run state in place and begin a fresh run.
    ///
    /// The generation bump invalidates any deferred events still queued
    /// from the superseded run.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.bull = Bull::new(&self.config);
        self.obstacles.clear();
        self.power_ups.clear();
        self.coins.clear();
        self.score = 0.0;
        self.game_speed = self.config.base_speed;
        self.yield_rate = BASE_YIELD_RATE;
        self.obstacle_counter = 0;
        self.spawn_timer = 0;
        self.inflation_ticks = None;
        self.has_continue = true;
        self.cues.clear();
        self.outcome = None;
        self.phase = GamePhase::Running;
        log::info!("Session restarted (generation {})", self.generation);
    }

    /// End the run: final score, continue eligibility, flavor quote.
    pub(crate) fn enter_game_over(&mut self) {
        let may_continue = self.score > CONTINUE_SCORE_THRESHOLD && self.has_continue;
        let quote = QUOTES[self.rng.random_range(0..QUOTES.len())].to_string();
        log::info!(
            "Game over at tick {} with score {:.2}",
            self.tick_count,
            self.score
        );
        self.outcome = Some(GameOverReport {
            final_score: self.score,
            may_continue,
            quote,
        });
        self.phase = GamePhase::GameOver;
        // The tick driver stops here; kill its in-flight timers too
        self.generation += 1;
        self.cues.push(AudioCue::Crash);
    }

    /// Spend the session's continue and resume the run.
    ///
    /// Returns false when no continue is available.
    pub fn continue_run(&mut self) -> bool {
        if self.phase != GamePhase::GameOver
            || !self.outcome.as_ref().is_some_and(|o| o.may_continue)
        {
            return false;
        }
        self.has_continue = false;
        self.outcome = None;
        self.bull.pos.y = self.config.canvas_height / 2.0;
        self.bull.vel = 0.0;
        self.bull.activate_shield();
        // Sweep the crash site so the respawn is survivable
        self.obstacles.retain(|o| o.x > CONTINUE_CLEAR_DISTANCE);
        self.phase = GamePhase::Running;
        self.cues.push(AudioCue::Collect);
        log::info!("Continue used at score {:.2}", self.score);
        true
    }
}
