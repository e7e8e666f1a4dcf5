//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so hosts can
//! override them. Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable gameplay parameters (units are per tick, not per second)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub obstacle_floor: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub ground_line: f32,
    pub gravity: f32,
    pub jump_velocity: f32,

    // === Difficulty ===
    pub initial_speed: f32,
    pub speed_step: f32,
    pub speed_milestone: f64,
    pub score_per_tick: f64,

    // === Spawning ===
    pub spawn_threshold: u32,
    pub spawn_offset: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
    pub obstacle_min_width: f32,
    pub obstacle_max_width: f32,
    pub offscreen_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            obstacle_floor: OBSTACLE_FLOOR,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            ground_line: GROUND_LINE,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            speed_milestone: SPEED_MILESTONE,
            score_per_tick: SCORE_PER_TICK,

            spawn_threshold: SPAWN_THRESHOLD,
            spawn_offset: SPAWN_OFFSET,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,
            obstacle_min_width: OBSTACLE_MIN_WIDTH,
            obstacle_max_width: OBSTACLE_MAX_WIDTH,
            offscreen_margin: OFFSCREEN_MARGIN,
        }
    }
}

/// True if `v` is a usable strictly positive number
fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults, invalid
    /// documents fall back to `Tuning::default()`.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => tuning.sanitized(),
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Serialize to JSON (for storage or debugging)
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Replace degenerate values with defaults so the simulation never
    /// sees empty ranges, non-positive sizes or a shrinking speed.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();

        if !positive(self.field_width) {
            self.field_width = d.field_width;
        }
        if !self.obstacle_floor.is_finite() {
            self.obstacle_floor = d.obstacle_floor;
        }
        if !self.player_x.is_finite() {
            self.player_x = d.player_x;
        }
        if !positive(self.player_width) {
            self.player_width = d.player_width;
        }
        if !positive(self.player_height) {
            self.player_height = d.player_height;
        }
        if !self.ground_line.is_finite() {
            self.ground_line = d.ground_line;
        }
        if !positive(self.gravity) {
            self.gravity = d.gravity;
        }
        // A jump must go up
        if !(self.jump_velocity.is_finite() && self.jump_velocity < 0.0) {
            self.jump_velocity = d.jump_velocity;
        }

        if !positive(self.initial_speed) {
            self.initial_speed = d.initial_speed;
        }
        if !self.speed_step.is_finite() || self.speed_step < 0.0 {
            self.speed_step = 0.0;
        }
        if !(self.speed_milestone.is_finite() && self.speed_milestone > 0.0) {
            self.speed_milestone = d.speed_milestone;
        }
        if !(self.score_per_tick.is_finite() && self.score_per_tick >= 0.0) {
            self.score_per_tick = d.score_per_tick;
        }

        if !self.spawn_offset.is_finite() {
            self.spawn_offset = d.spawn_offset;
        }
        if !positive(self.obstacle_min_height) || !(self.obstacle_max_height > self.obstacle_min_height)
        {
            self.obstacle_min_height = d.obstacle_min_height;
            self.obstacle_max_height = d.obstacle_max_height;
        }
        if !positive(self.obstacle_min_width) || !(self.obstacle_max_width > self.obstacle_min_width) {
            self.obstacle_min_width = d.obstacle_min_width;
            self.obstacle_max_width = d.obstacle_max_width;
        }
        if !self.offscreen_margin.is_finite() || self.offscreen_margin < 0.0 {
            self.offscreen_margin = d.offscreen_margin;
        }

        self
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "runner-tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded tuning from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Tuning saved");
        }
    }

    /// Load tuning from a JSON file, falling back to defaults (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded tuning from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read tuning {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_speed": 9.0 }"#);
        assert_eq!(tuning.initial_speed, 9.0);
        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.spawn_threshold, SPAWN_THRESHOLD);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(Tuning::from_json("not json"), Tuning::default());
    }

    #[test]
    fn test_sanitize_degenerate_ranges() {
        let tuning = Tuning {
            obstacle_min_height: 60.0,
            obstacle_max_height: 10.0,
            obstacle_min_width: -4.0,
            speed_step: -1.0,
            jump_velocity: 5.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.obstacle_min_height, OBSTACLE_MIN_HEIGHT);
        assert_eq!(tuning.obstacle_max_height, OBSTACLE_MAX_HEIGHT);
        assert_eq!(tuning.obstacle_min_width, OBSTACLE_MIN_WIDTH);
        assert_eq!(tuning.speed_step, 0.0);
        assert_eq!(tuning.jump_velocity, JUMP_VELOCITY);
    }

    #[test]
    fn test_json_roundtrip_defaults() {
        let json = Tuning::default().to_json();
        assert_eq!(Tuning::from_json(&json), Tuning::default());
    }
}
