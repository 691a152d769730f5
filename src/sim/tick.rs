//! Per-tick simulation step
//!
//! One call per rendered frame. Order inside a tick: deferred events,
//! inflation, difficulty, input, bull physics, spawn scheduling,
//! collision resolution (coins, then power-ups, then obstacles),
//! passive income, milestone detection. All mutation is complete before
//! the call returns.

use rand::Rng;

use super::collision;
use super::events::{AudioCue, DeferredAction};
use super::spawn;
use super::state::{ActiveMode, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump impulse requested this frame
    pub jump: bool,
}

/// Advance the session by one tick. No-op outside the Running phase.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.cues.clear();
    state.tick_count += 1;

    // Timers queued by earlier ticks fire first; stale generations die here
    for action in state.deferred.drain_due(state.tick_count, state.generation) {
        match action {
            DeferredAction::SpawnPowerUp { x } => spawn::spawn_power_up(state, x),
            DeferredAction::SpawnCoin { x } => spawn::spawn_coin(state, x),
        }
    }

    update_inflation(state);
    apply_difficulty(state);

    if input.jump {
        if !state.bull.is_rocketing() {
            state.cues.push(AudioCue::Jump);
        }
        state.bull.jump();
    }

    let fell = state.bull.update(
        state.config.gravity,
        state.inflation_factor(),
        state.config.canvas_height,
    );
    if fell {
        state.enter_game_over();
        return;
    }

    spawn::run_scheduler(state);

    if !resolve_collisions(state) {
        return;
    }

    state.score += state.yield_rate;
    check_milestone(state);
}

/// Trigger, count down, and expire the global inflation event
fn update_inflation(state: &mut GameState) {
    match state.inflation_ticks {
        Some(ticks) => {
            let remaining = ticks - 1;
            state.inflation_ticks = if remaining == 0 { None } else { Some(remaining) };
        }
        None => {
            if state.rng.random::<f64>() < INFLATION_CHANCE {
                state.inflation_ticks = Some(INFLATION_DURATION_TICKS);
                log::debug!("Inflation event at tick {}", state.tick_count);
            }
        }
    }
}

/// Effective scroll speed and passive yield for this tick
fn apply_difficulty(state: &mut GameState) {
    let base = state.config.base_speed;
    let (speed, yield_rate) = match state.bull.active_mode() {
        ActiveMode::Rocketing => (
            base * ROCKET_SPEED_MULTIPLIER,
            BASE_YIELD_RATE * ROCKET_YIELD_MULTIPLIER,
        ),
        ActiveMode::Leveraged => (
            base * LEVERAGE_SPEED_MULTIPLIER,
            BASE_YIELD_RATE * LEVERAGE_YIELD_MULTIPLIER,
        ),
        ActiveMode::Normal => (
            base + state.score as f32 * SPEED_SCORE_FACTOR,
            BASE_YIELD_RATE + state.score * YIELD_SCORE_FACTOR,
        ),
    };
    state.game_speed = speed;
    state.yield_rate = yield_rate;
}

/// Move every live entity and resolve it against the bull.
///
/// Pickups resolve before obstacles so a simultaneous coin+pillar frame
/// still credits the coin. Each list is walked newest-first so removal
/// by index is safe. Returns false when an obstacle hit ended the run.
fn resolve_collisions(state: &mut GameState) -> bool {
    let speed = state.game_speed;
    let canvas_height = state.config.canvas_height;

    for i in (0..state.coins.len()).rev() {
        state.coins[i].update(speed);
        if collision::coin_hits_bull(&state.coins[i], &state.bull) {
            state.coins.remove(i);
            state.score += COIN_VALUE;
            state.cues.push(AudioCue::CoinPickup);
            continue;
        }
        if state.coins[i].pos.x + COIN_SIZE < 0.0 {
            state.coins.remove(i);
        }
    }

    for i in (0..state.power_ups.len()).rev() {
        state.power_ups[i].update(speed);
        if collision::powerup_hits_bull(&state.power_ups[i], &state.bull) {
            let power_up = state.power_ups.remove(i);
            state.cues.push(AudioCue::Collect);
            match power_up.kind {
                super::state::PowerUpKind::Shield => state.bull.activate_shield(),
                super::state::PowerUpKind::Leverage => state.bull.activate_leverage(),
                super::state::PowerUpKind::Rocket => {
                    state.bull.activate_rocket();
                    state.cues.push(AudioCue::RocketStart);
                }
            }
            continue;
        }
        if state.power_ups[i].pos.x + POWERUP_SIZE < 0.0 {
            state.power_ups.remove(i);
        }
    }

    for i in (0..state.obstacles.len()).rev() {
        state.obstacles[i].update(speed, canvas_height);
        if collision::obstacle_hits_bull(&state.obstacles[i], &state.bull, canvas_height) {
            // Resolution precedence: rocket plows, shield absorbs, else terminal
            if state.bull.is_rocketing() {
                state.obstacles.remove(i);
                state.score += ROCKET_SMASH_SCORE;
                continue;
            }
            if state.bull.shielded {
                state.bull.shielded = false;
                state.obstacles.remove(i);
                state.cues.push(AudioCue::Collect);
                continue;
            }
            state.enter_game_over();
            return false;
        }

        let obstacle = &mut state.obstacles[i];
        if !obstacle.passed && obstacle.trailing_edge() < state.bull.pos.x {
            obstacle.passed = true;
            state.score += PASS_SCORE;
        }
        if obstacle.trailing_edge() < 0.0 {
            state.obstacles.remove(i);
        }
    }

    true
}

/// Fire the milestone cue once per 100-point boundary.
///
/// The fractional remainder is below the yield rate only on the tick
/// that crossed the boundary, so the cue cannot repeat.
fn check_milestone(state: &mut GameState) {
    let floor = state.score.floor();
    if floor > 0.0
        && floor % MILESTONE_INTERVAL == 0.0
        && state.score - floor < state.yield_rate
    {
        state.cues.push(AudioCue::Milestone);
        log::debug!("Milestone at score {:.3}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::{Coin, Obstacle, PowerUp, PowerUpKind};
    use glam::Vec2;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(SimConfig::default(), seed).unwrap();
        state.start();
        state
    }

    /// An obstacle whose top pillar covers the bull's default position
    fn overlapping_obstacle(state: &GameState) -> Obstacle {
        Obstacle {
            x: state.bull.pos.x - 10.0,
            gap_y: state.config.canvas_height - MIN_PILLAR_HEIGHT - OBSTACLE_GAP,
            initial_gap_y: 300.0,
            oscillating: false,
            phase: 0.0,
            passed: false,
        }
    }

    #[test]
    fn rocketing_bull_plows_through_obstacles() {
        // A rocketing hit destroys the obstacle for bonus score
        let mut state = running_state(1);
        state.bull.activate_rocket();
        state.obstacles.push(overlapping_obstacle(&state));

        tick(&mut state, &TickInput::default());

        assert!(state.obstacles.is_empty());
        assert!(state.bull.is_rocketing());
        assert!(state.bull.shielded);
        assert_eq!(state.phase, GamePhase::Running);
        let expected = ROCKET_SMASH_SCORE + BASE_YIELD_RATE * ROCKET_YIELD_MULTIPLIER;
        assert!((state.score - expected).abs() < 1e-9);
    }

    #[test]
    fn shield_absorbs_one_obstacle_hit() {
        // The shield absorbs exactly one hit
        let mut state = running_state(2);
        state.bull.activate_shield();
        state.obstacles.push(overlapping_obstacle(&state));

        tick(&mut state, &TickInput::default());

        assert!(state.obstacles.is_empty());
        assert!(!state.bull.shielded);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn unprotected_obstacle_hit_is_terminal() {
        // No modifiers: the hit ends the run before older entities update
        let mut state = running_state(3);
        let far = Obstacle {
            x: 600.0,
            gap_y: 200.0,
            initial_gap_y: 200.0,
            oscillating: false,
            phase: 0.0,
            passed: false,
        };
        state.obstacles.push(far);
        state.obstacles.push(overlapping_obstacle(&state));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.outcome.is_some());
        assert!(state.cues.contains(&AudioCue::Crash));
        // The colliding obstacle is newest and resolves first; the run
        // ends before the older entity is touched
        assert_eq!(state.obstacles[0].x, 600.0);
    }

    #[test]
    fn game_over_stops_the_simulation() {
        let mut state = running_state(3);
        state.obstacles.push(overlapping_obstacle(&state));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks = state.tick_count;
        let score = state.score;
        tick(&mut state, &TickInput { jump: true });
        assert_eq!(state.tick_count, ticks);
        assert_eq!(state.score, score);
    }

    #[test]
    fn coin_credited_even_on_a_fatal_frame() {
        // Coin and pillar overlap on the same tick: coin first, then crash
        let mut state = running_state(4);
        state.coins.push(Coin {
            pos: state.bull.pos,
        });
        state.obstacles.push(overlapping_obstacle(&state));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        let report = state.outcome.as_ref().unwrap();
        assert!((report.final_score - COIN_VALUE).abs() < 1e-9);
        assert!(state.cues.contains(&AudioCue::CoinPickup));
    }

    #[test]
    fn power_up_pickup_activates_and_removes() {
        let mut state = running_state(5);
        state.power_ups.push(PowerUp {
            pos: state.bull.pos,
            kind: PowerUpKind::Rocket,
        });

        tick(&mut state, &TickInput::default());

        assert!(state.power_ups.is_empty());
        assert!(state.bull.is_rocketing());
        assert!(state.bull.shielded);
        assert!(state.cues.contains(&AudioCue::Collect));
        assert!(state.cues.contains(&AudioCue::RocketStart));
    }

    #[test]
    fn passing_an_obstacle_scores_once() {
        let mut state = running_state(6);
        // Just about to clear the bull's leading edge
        state.obstacles.push(Obstacle {
            x: state.bull.pos.x - OBSTACLE_WIDTH - 1.0,
            gap_y: 200.0,
            initial_gap_y: 200.0,
            oscillating: false,
            phase: 0.0,
            passed: false,
        });
        // Keep the bull airborne and clear of pillars
        state.bull.pos.y = 300.0;
        state.bull.vel = 0.0;

        tick(&mut state, &TickInput::default());
        assert!(state.obstacles[0].passed);
        let score_after_pass = state.score;
        assert!(score_after_pass >= PASS_SCORE);

        tick(&mut state, &TickInput::default());
        // Only passive income since; no second pass credit
        assert!(state.score - score_after_pass < PASS_SCORE);
    }

    #[test]
    fn offscreen_entities_are_culled() {
        let mut state = running_state(7);
        state.obstacles.push(Obstacle {
            x: -OBSTACLE_WIDTH - 1.0,
            gap_y: 200.0,
            initial_gap_y: 200.0,
            oscillating: false,
            phase: 0.0,
            passed: true,
        });
        state.coins.push(Coin {
            pos: Vec2::new(-COIN_SIZE - 1.0, 300.0),
        });
        state.power_ups.push(PowerUp {
            pos: Vec2::new(-POWERUP_SIZE - 1.0, 300.0),
            kind: PowerUpKind::Shield,
        });

        tick(&mut state, &TickInput::default());

        assert!(state.obstacles.is_empty());
        assert!(state.coins.is_empty());
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn milestone_fires_exactly_once_per_boundary() {
        // 100.000 -> 100.009 at yield 0.01 fires once
        let mut state = running_state(8);
        state.score = 100.009;
        state.yield_rate = 0.01;
        check_milestone(&mut state);
        assert_eq!(state.cues, vec![AudioCue::Milestone]);

        state.cues.clear();
        state.score = 100.019;
        check_milestone(&mut state);
        assert!(state.cues.is_empty());
    }

    #[test]
    fn milestone_crossing_detected_in_a_real_tick() {
        let mut state = running_state(9);
        state.score = 99.999;
        // Hold the bull mid-air so nothing else interferes
        state.bull.pos.y = 300.0;
        state.bull.vel = -0.3;

        tick(&mut state, &TickInput::default());
        assert!(state.cues.contains(&AudioCue::Milestone));

        tick(&mut state, &TickInput::default());
        assert!(!state.cues.contains(&AudioCue::Milestone));
    }

    #[test]
    fn difficulty_table_by_mode() {
        let base = SimConfig::default().base_speed;

        let mut state = running_state(10);
        state.bull.pos.y = 300.0;
        state.bull.activate_leverage();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.game_speed, base * LEVERAGE_SPEED_MULTIPLIER);
        assert_eq!(state.yield_rate, BASE_YIELD_RATE * LEVERAGE_YIELD_MULTIPLIER);

        // Rocket dominates a live leverage timer
        state.bull.activate_rocket();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.game_speed, base * ROCKET_SPEED_MULTIPLIER);
        assert_eq!(state.yield_rate, BASE_YIELD_RATE * ROCKET_YIELD_MULTIPLIER);
    }

    #[test]
    fn normal_difficulty_scales_with_score() {
        let mut state = running_state(11);
        state.bull.pos.y = 300.0;
        state.bull.vel = -0.3;
        state.score = 100.0;
        tick(&mut state, &TickInput::default());
        let expected_speed = SimConfig::default().base_speed + 100.0 * SPEED_SCORE_FACTOR;
        assert!((state.game_speed - expected_speed).abs() < 1e-4);
        // Yield reflects the score at the head of the tick
        assert!((state.yield_rate - (BASE_YIELD_RATE + 100.0 * YIELD_SCORE_FACTOR)).abs() < 1e-9);
    }

    #[test]
    fn inflation_scales_gravity_while_active() {
        let mut state = running_state(12);
        state.inflation_ticks = Some(10);
        state.bull.pos.y = 300.0;
        state.bull.vel = 0.0;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.inflation_ticks, Some(9));
        assert!((state.bull.vel - GRAVITY * INFLATION_GRAVITY_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn inflation_expires_after_its_last_tick() {
        let mut state = running_state(13);
        state.inflation_ticks = Some(1);
        state.bull.pos.y = 300.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.inflation_ticks, None);
    }

    #[test]
    fn deferred_power_up_arrives_on_schedule() {
        let mut state = running_state(14);
        state.bull.pos.y = 300.0;
        state.deferred.schedule(
            state.tick_count + 3,
            state.generation,
            DeferredAction::SpawnPowerUp { x: 500.0 },
        );

        tick(&mut state, &TickInput { jump: true });
        tick(&mut state, &TickInput::default());
        assert!(state.power_ups.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.power_ups.len(), 1);
        // Spawned at x=500, then scrolled once on its arrival tick
        assert!((500.0 - state.power_ups[0].pos.x - state.game_speed).abs() < 1e-4);
    }

    #[test]
    fn restart_kills_pending_timers() {
        let mut state = running_state(15);
        state.deferred.schedule(
            state.tick_count + 1,
            state.generation,
            DeferredAction::SpawnPowerUp { x: 500.0 },
        );
        state.restart();
        for _ in 0..5 {
            tick(&mut state, &TickInput { jump: true });
        }
        assert!(state.power_ups.is_empty());
        assert!(state.deferred.is_empty());
    }

    #[test]
    fn game_over_kills_pending_timers_across_continue() {
        let mut state = running_state(16);
        state.score = 80.0;
        state.deferred.schedule(
            state.tick_count + 2,
            state.generation,
            DeferredAction::SpawnCoin { x: 500.0 },
        );
        state.obstacles.push(overlapping_obstacle(&state));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        assert!(state.continue_run());
        for _ in 0..5 {
            tick(&mut state, &TickInput { jump: true });
        }
        // The pre-crash coin timer belongs to a dead generation
        assert!(state.coins.is_empty());
    }

    #[test]
    fn jump_cue_suppressed_while_rocketing() {
        let mut state = running_state(17);
        state.bull.pos.y = 300.0;
        state.bull.activate_rocket();
        tick(&mut state, &TickInput { jump: true });
        assert!(!state.cues.contains(&AudioCue::Jump));

        let mut state = running_state(17);
        state.bull.pos.y = 300.0;
        tick(&mut state, &TickInput { jump: true });
        assert!(state.cues.contains(&AudioCue::Jump));
    }

    #[test]
    fn falling_through_the_floor_ends_the_run() {
        let mut state = running_state(18);
        // No jumps: gravity wins within a few hundred ticks
        let mut terminal_tick = None;
        for _ in 0..1_000 {
            tick(&mut state, &TickInput::default());
            if state.phase == GamePhase::GameOver {
                terminal_tick = Some(state.tick_count);
                break;
            }
        }
        let terminal_tick = terminal_tick.expect("gravity should end the run");
        // Reported once; further ticks are no-ops
        tick(&mut state, &TickInput::default());
        assert_eq!(state.tick_count, terminal_tick);
        assert_eq!(state.outcome.as_ref().unwrap().final_score, state.score);
        let floor = state.config.canvas_height - BULL_HEIGHT / 2.0;
        assert_eq!(state.bull.pos.y, floor);
    }

    #[test]
    fn same_seed_same_inputs_same_run() {
        let mut a = running_state(99_999);
        let mut b = running_state(99_999);
        for i in 0..2_000u64 {
            let input = TickInput { jump: i % 25 == 0 };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.tick_count, b.tick_count);
        assert_eq!(a.score.to_bits(), b.score.to_bits());
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.bull.pos, b.bull.pos);
        assert_eq!(a.phase, b.phase);
    }

    #[test]
    fn score_never_decreases() {
        let mut state = running_state(21);
        let mut last = state.score;
        for i in 0..3_000u64 {
            tick(&mut state, &TickInput { jump: i % 20 == 0 });
            assert!(state.score >= last, "score regressed at tick {i}");
            last = state.score;
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}
