//! Injectable randomness
//!
//! The simulation only ever asks for uniform values in [0, 1). Production
//! uses a seeded PCG; tests can replay a fixed script.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random source used by spawning
pub trait RandomSource {
    /// Uniform value in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Uniform value in [min, max). Returns `min` for empty ranges.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if !(max > min) {
            return min;
        }
        let v = min + (max - min) * self.next_unit() as f32;
        // f32 rounding can land exactly on max
        if v < max { v } else { min }
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize {
        let i = (self.next_unit() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }
}

/// Seeded PCG random source
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed cycle of unit values (clamped into [0, 1))
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values: Vec<f64> = values
            .into()
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 0.999_999) } else { 0.0 })
            .collect();
        Self { values, index: 0 }
    }

    /// Always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.index % self.values.len()];
        self.index = self.index.wrapping_add(1);
        v
    }
}
