//! Fixed-step simulation tick
//!
//! Core game loop that advances a running state by exactly one step.

use super::collision::first_collision;
use super::physics::step_player;
use super::rng::RandomSource;
use super::spawn::{random_term, spawn_obstacle};
use super::state::{GameEvent, RunPhase, RunState};
use crate::tuning::Tuning;

/// A run ended against an obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Crash {
    /// Label of the obstacle hit (random term if it had none)
    pub label: String,
    /// Floored score at the moment of impact
    pub score: u64,
}

/// Number of `milestone` multiples crossed going from `prev` to `next`.
///
/// Compares milestone buckets rather than testing `score % milestone`, so a
/// score hovering just past a multiple never counts twice.
pub fn milestones_crossed(prev: f64, next: f64, milestone: f64) -> u32 {
    if !(milestone > 0.0) || next <= prev {
        return 0;
    }
    let before = (prev / milestone).floor();
    let after = (next / milestone).floor();
    (after - before).max(0.0) as u32
}

/// Advance the state by one tick. No-op unless the run is active.
///
/// Order: player physics, spawn timer, obstacle scroll + cull, score and
/// speed ramp, collision. Returns the crash that ended the run, if any.
pub fn tick(state: &mut RunState, tuning: &Tuning, rng: &mut dyn RandomSource) -> Option<Crash> {
    if state.phase != RunPhase::Running {
        return None;
    }
    state.time_ticks += 1;

    // Gravity + ground clamp
    step_player(&mut state.player, tuning.gravity, tuning.ground_line);

    // Spawn cadence
    state.spawn_timer += 1;
    if state.spawn_timer > tuning.spawn_threshold {
        let obstacle = spawn_obstacle(tuning.field_width, tuning, rng);
        log::debug!(
            "Spawned '{}' ({:.0}x{:.0}) at tick {}",
            obstacle.label,
            obstacle.size.x,
            obstacle.size.y,
            state.time_ticks
        );
        state.push_event(GameEvent::ObstacleSpawned {
            label: obstacle.label.clone(),
        });
        state.obstacles.push(obstacle);
        state.spawn_timer = 0;
    }

    // Scroll obstacles left, drop the ones fully off screen
    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    let margin = tuning.offscreen_margin;
    state.obstacles.retain(|o| o.pos.x + o.size.x > -margin);

    // Score and difficulty ramp
    let prev_score = state.score;
    state.score += tuning.score_per_tick;
    let crossed = milestones_crossed(prev_score, state.score, tuning.speed_milestone);
    if crossed > 0 {
        state.speed += tuning.speed_step * crossed as f32;
        log::debug!("Speed up to {:.1} at score {:.1}", state.speed, state.score);
        state.push_event(GameEvent::SpeedUp { speed: state.speed });
    }

    // A single collision ends the run
    let hit = first_collision(&state.player, &state.obstacles)?;
    let label = match state.obstacles[hit].label.as_str() {
        "" => random_term(rng).to_string(),
        label => label.to_string(),
    };
    let score = state.floored_score();
    state.phase = RunPhase::Ended;
    state.push_event(GameEvent::Crashed {
        label: label.clone(),
        score,
    });

    Some(Crash { label, score })
}
