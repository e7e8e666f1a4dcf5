//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Fixed per-tick steps only (no wall-clock time)
//! - Injected randomness only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod rng;
pub mod runner;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, first_collision, intersects};
pub use physics::{step_player, try_jump};
pub use rng::{RandomSource, ScriptedRandom, SimRng};
pub use runner::{NEW_BEST_SUFFIX, RUN_STARTED_MESSAGE, Runner, SharedRunner};
pub use snapshot::{IDLE_PROMPT, ObstacleView, RenderSnapshot};
pub use spawn::{INCIDENT_TERMS, random_term, spawn_obstacle};
pub use state::{GameEvent, MAX_PENDING_EVENTS, Obstacle, Player, Rect, RunPhase, RunState};
pub use tick::{Crash, milestones_crossed, tick};
