//! Run state and core simulation types
//!
//! Screen coordinates: x grows to the right, y grows downward. Every rect is
//! anchored at its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Undrained events kept per runner; the oldest are dropped past this
pub const MAX_PENDING_EVENTS: usize = 256;

/// Lifecycle of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Nothing started yet, waiting for the first jump request
    #[default]
    Idle,
    /// Active run, ticks advance the simulation
    Running,
    /// Run ended by a collision; behaves like `Idle` for input
    Ended,
}

/// Axis-aligned rectangle (top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// The jumping character. x is fixed for the whole game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative = rising)
    pub vy: f32,
    pub grounded: bool,
}

impl Player {
    /// A player resting on the ground line
    pub fn grounded(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_line),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vy: 0.0,
            grounded: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An incident block scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Incident name shown when this obstacle ends a run
    pub label: String,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, w: f32, h: f32, label: impl Into<String>) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            label: label.into(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Things that happened during a `tick()` or `request_jump()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Jumped,
    ObstacleSpawned { label: String },
    SpeedUp { speed: f32 },
    /// Run ended against an obstacle
    Crashed { label: String, score: u64 },
    /// The crash beat the stored best score
    NewBest(u64),
}

/// Complete state of one runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    /// Accumulated score (floored for display and persistence)
    pub score: f64,
    /// Obstacle speed in units per tick
    pub speed: f32,
    /// Ticks since the last spawn (or run start)
    pub spawn_timer: u32,
    /// Live obstacles in spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    pub player: Player,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Pending events for the host (not part of the simulation)
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl RunState {
    /// Fresh idle state with the player on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: RunPhase::Idle,
            score: 0.0,
            speed: tuning.initial_speed,
            spawn_timer: 0,
            obstacles: Vec::new(),
            player: Player::grounded(tuning),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start a new run: everything back to initial values, phase `Running`
    pub fn reset(&mut self, tuning: &Tuning) {
        self.phase = RunPhase::Running;
        self.score = 0.0;
        self.speed = tuning.initial_speed;
        self.spawn_timer = 0;
        self.obstacles.clear();
        self.player = Player::grounded(tuning);
        self.time_ticks = 0;
        self.push_event(GameEvent::RunStarted);
    }

    /// Queue an event for the host, dropping the oldest once the queue is full
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let overflow = self.events.len() + 1 - MAX_PENDING_EVENTS;
            self.events.drain(..overflow);
        }
        self.events.push(event);
    }

    /// Events queued since the host last drained them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Score as shown to players
    pub fn floored_score(&self) -> u64 {
        crate::floor_score(self.score)
    }
}
