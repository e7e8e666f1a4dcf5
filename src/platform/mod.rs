//! Platform abstraction layer
//!
//! Host-side glue that is not part of the simulation:
//! - Frame clock turning wall time into fixed ticks
//! - Mapping raw key codes to the jump input

use crate::consts::{MAX_SUBSTEPS, TICK_MS};

/// Key codes (`KeyboardEvent.code`) that trigger a jump
pub const JUMP_KEYS: [&str; 3] = ["Space", "ArrowUp", "KeyW"];

/// Does this key code trigger a jump?
pub fn is_jump_key(code: &str) -> bool {
    JUMP_KEYS.contains(&code)
}

/// Fixed-step accumulator for hosts with a variable frame rate
#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f64,
    max_steps: u32,
    accumulator: f64,
    last_time: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_MS, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step_ms: f64, max_steps: u32) -> Self {
        Self {
            step_ms: if step_ms > 0.0 { step_ms } else { TICK_MS },
            max_steps: max_steps.max(1),
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Feed a timestamp (ms) and get how many ticks to run.
    ///
    /// The first frame only primes the clock. Backlog beyond `max_steps` is
    /// dropped so a stalled tab doesn't fast-forward the run.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time.replace(now_ms) else {
            return 0;
        };
        let elapsed = (now_ms - last).max(0.0);
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step_ms && steps < self.max_steps {
            self.accumulator -= self.step_ms;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.step_ms);
        }
        steps
    }

    /// Forget timing history (after a pause or tab switch)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}
