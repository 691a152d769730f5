//! Daily Bull entry point
//!
//! Headless demo driver: auto-pilots a seeded session against the real
//! simulation, drains audio cues into the log, and reports the final
//! score against the local leaderboard.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use daily_bull::consts::*;
use daily_bull::highscores::HighScores;
use daily_bull::sim::{GamePhase, GameState, TickInput, tick};
use daily_bull::SimConfig;

const SCORES_PATH: &str = "daily-bull-scores.json";
/// Hard stop so a lucky pilot cannot run forever
const MAX_TICKS: u64 = 200_000;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(entropy_seed);

    let mut state = match GameState::new(SimConfig::default(), seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    state.start();

    while state.tick_count < MAX_TICKS {
        let input = TickInput {
            jump: pilot_wants_jump(&state),
        };
        tick(&mut state, &input);
        for cue in &state.cues {
            log::debug!("cue: {cue:?}");
        }
        if state.phase == GamePhase::GameOver {
            if state.outcome.as_ref().is_some_and(|o| o.may_continue) {
                log::info!("Crashed at {:.2}, using the continue", state.score);
                state.continue_run();
            } else {
                break;
            }
        }
    }

    let report = state.outcome.clone();
    let final_score = state.score;
    match &report {
        Some(report) => println!(
            "Game over after {} ticks: {:.2}\n\"{}\"",
            state.tick_count, report.final_score, report.quote
        ),
        None => println!(
            "Stopped after {} ticks at {:.2}",
            state.tick_count, final_score
        ),
    }

    let mut scores = HighScores::load(Path::new(SCORES_PATH));
    if scores.is_high_score(final_score) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        if let Some(rank) = scores.record_score("AUTOPILOT", final_score, now) {
            println!("New high score, rank {rank}");
        }
        scores.save(Path::new(SCORES_PATH));
    } else if let Some(top) = scores.top_score() {
        println!("Best so far: {top:.2}");
    }
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0xDA11_B011)
}

/// Steer toward the center of the nearest gap still ahead of the bull.
fn pilot_wants_jump(state: &GameState) -> bool {
    if state.bull.is_rocketing() {
        return false;
    }
    let target = state
        .obstacles
        .iter()
        .filter(|o| o.trailing_edge() > state.bull.pos.x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|o| o.gap_y + OBSTACLE_GAP / 2.0)
        .unwrap_or(state.config.canvas_height / 2.0);
    let center = state.bull.pos.y + BULL_HEIGHT / 2.0;
    center > target && state.bull.vel >= 0.0
}
