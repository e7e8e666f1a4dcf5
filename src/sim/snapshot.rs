//! Read-only view of the engine for renderers

use serde::Serialize;

use super::state::{Rect, RunState};

/// Shown while no run is active
pub const IDLE_PROMPT: &str = "Press Space or tap to play";

/// An obstacle as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub rect: Rect,
    pub label: String,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub running: bool,
    /// Floored score
    pub score: u64,
    pub best: u64,
    pub speed: f32,
    pub player: Rect,
    /// Spawn order (left to right)
    pub obstacles: Vec<ObstacleView>,
    /// Current toast message
    pub status: String,
    /// Call-to-action while idle or after a crash
    pub prompt: Option<&'static str>,
}

impl RenderSnapshot {
    pub fn capture(state: &RunState, best: u64, status: &str) -> Self {
        let running = state.is_running();
        Self {
            running,
            score: state.floored_score(),
            best,
            speed: state.speed,
            player: state.player.rect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    rect: o.rect(),
                    label: o.label.clone(),
                })
                .collect(),
            status: status.to_string(),
            prompt: if running { None } else { Some(IDLE_PROMPT) },
        }
    }

    /// JSON form for hosts across an FFI boundary
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
