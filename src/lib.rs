//! Pipeline Runner - an endless-runner arcade engine
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (physics, collisions, spawning, run state)
//! - `platform`: Frame clock and input mapping for hosts
//! - `persistence`: Key-value storage backends
//! - `highscores`: Best-score store on top of persistence
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use highscores::{BestScoreStore, ScoreStore};
pub use sim::{GameEvent, RenderSnapshot, RunPhase, Runner, SharedRunner};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Host frame cadence the balance was tuned for (~30 ticks per second)
    pub const TICK_MS: f64 = 33.0;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field width (obstacles enter past the right edge)
    pub const FIELD_WIDTH: f32 = 720.0;
    /// Bottom edge obstacles sit on
    pub const OBSTACLE_FLOOR: f32 = 200.0;

    /// Player defaults - x never changes
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Player top y when resting on the ground
    pub const GROUND_LINE: f32 = 170.0;

    /// Vertical acceleration per tick (screen y grows downward)
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity applied by a jump
    pub const JUMP_VELOCITY: f32 = -12.5;

    /// Horizontal obstacle speed at run start (units per tick)
    pub const INITIAL_SPEED: f32 = 6.0;
    /// Speed added each time the score crosses a milestone
    pub const SPEED_STEP: f32 = 0.4;
    /// Score distance between speed ramps
    pub const SPEED_MILESTONE: f64 = 100.0;
    /// Score gained every tick
    pub const SCORE_PER_TICK: f64 = 0.1;

    /// A spawn happens once the timer exceeds this many ticks
    pub const SPAWN_THRESHOLD: u32 = 70;
    /// Obstacles appear this far past the field's right edge
    pub const SPAWN_OFFSET: f32 = 20.0;
    /// Obstacle height range [min, max)
    pub const OBSTACLE_MIN_HEIGHT: f32 = 26.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 50.0;
    /// Obstacle width range [min, max)
    pub const OBSTACLE_MIN_WIDTH: f32 = 26.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 44.0;
    /// Obstacles are culled once their right edge is this far left of x = 0
    pub const OFFSCREEN_MARGIN: f32 = 20.0;
}

/// Floor a non-negative score to the integer shown to players.
#[inline]
pub fn floor_score(score: f64) -> u64 {
    if score.is_finite() && score > 0.0 {
        score.floor() as u64
    } else {
        0
    }
}
