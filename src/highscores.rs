//! Best score persistence
//!
//! A single integer, persisted under `runner-best` in whatever key-value
//! backend the host provides.

use crate::persistence::{KeyValueStore, StoreError};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "runner-best";

/// Load/save capability the engine needs for the best score
pub trait ScoreStore {
    /// Persisted best score, or 0 when absent or invalid
    fn load(&self) -> u64;
    /// Durably replace the best score
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Parse a stored best score.
///
/// Accepts any JSON number (`"75"`, `"75.0"`); finite non-negative values are
/// floored, everything else reads as 0.
pub fn parse_best(raw: &str) -> u64 {
    match serde_json::from_str::<f64>(raw.trim()) {
        Ok(v) if v.is_finite() && v >= 0.0 => v.floor() as u64,
        _ => 0,
    }
}

/// `ScoreStore` over a key-value backend
#[derive(Debug, Clone)]
pub struct BestScoreStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> BestScoreStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Access the underlying backend
    pub fn backend(&self) -> &K {
        &self.kv
    }
}

impl<K: KeyValueStore> ScoreStore for BestScoreStore<K> {
    fn load(&self) -> u64 {
        match self.kv.get(STORAGE_KEY) {
            Some(raw) => {
                let best = parse_best(&raw);
                log::info!("Loaded best score {}", best);
                best
            }
            None => {
                log::info!("No best score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.kv.set(STORAGE_KEY, &score.to_string())?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }
}
