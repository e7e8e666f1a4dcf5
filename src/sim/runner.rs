//! Game state machine
//!
//! `Runner` is the single entry point hosts talk to: an input source calls
//! `request_jump()`, a clock calls `tick()`, a renderer reads `snapshot()`.

use std::sync::{Arc, Mutex, MutexGuard};

use super::physics::try_jump;
use super::rng::RandomSource;
use super::snapshot::RenderSnapshot;
use super::state::{GameEvent, RunPhase, RunState};
use super::tick::{Crash, tick};
use crate::highscores::ScoreStore;
use crate::tuning::Tuning;

/// Toast shown when a run begins
pub const RUN_STARTED_MESSAGE: &str = "Run started. Keep the pipeline alive.";
/// Appended to the crash toast when the best score was beaten
pub const NEW_BEST_SUFFIX: &str = " · New best!";

/// One runner game: run state, best score and its persistence
pub struct Runner<S: ScoreStore, R: RandomSource> {
    state: RunState,
    tuning: Tuning,
    store: S,
    rng: R,
    best: u64,
    status: String,
}

impl<S: ScoreStore, R: RandomSource> Runner<S, R> {
    /// Create an idle runner; the best score is loaded once here
    pub fn new(tuning: Tuning, store: S, rng: R) -> Self {
        let tuning = tuning.sanitized();
        let best = store.load();
        Self {
            state: RunState::new(&tuning),
            tuning,
            store,
            rng,
            best,
            status: String::new(),
        }
    }

    /// The single input: starts a run when idle, jumps when grounded.
    ///
    /// Starting a run does not also jump; the player begins on the ground.
    /// Requests while airborne are ignored.
    pub fn request_jump(&mut self) {
        if !self.state.is_running() {
            self.reset();
            return;
        }
        if try_jump(&mut self.state.player, self.tuning.jump_velocity) {
            self.state.push_event(GameEvent::Jumped);
        }
    }

    /// Start a fresh run
    pub fn reset(&mut self) {
        self.state.reset(&self.tuning);
        self.status = RUN_STARTED_MESSAGE.to_string();
        log::info!("Run started (best {})", self.best);
    }

    /// Advance one step. No-op unless running.
    pub fn tick(&mut self) {
        if let Some(crash) = tick(&mut self.state, &self.tuning, &mut self.rng) {
            self.end_run(crash);
        }
    }

    fn end_run(&mut self, crash: Crash) {
        log::info!("Run ended by '{}' at score {}", crash.label, crash.score);
        self.status = crash.label;

        if crash.score > self.best {
            self.best = crash.score;
            // The in-memory best stands even if it can't be persisted
            if let Err(e) = self.store.save(crash.score) {
                log::warn!("Could not persist best score {}: {}", crash.score, e);
            }
            self.status.push_str(NEW_BEST_SUFFIX);
            self.state.push_event(GameEvent::NewBest(crash.score));
            log::info!("New best score: {}", crash.score);
        }
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, self.best, &self.status)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable state access for scripted test scenarios. Not part of the
    /// host surface; hosts only jump, tick and read snapshots.
    #[doc(hidden)]
    pub fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }
}

/// A runner behind one lock, for hosts that call in from several threads.
///
/// Each call holds the lock for the whole operation, so a `tick()` never
/// interleaves with a `request_jump()`.
pub struct SharedRunner<S: ScoreStore, R: RandomSource> {
    inner: Arc<Mutex<Runner<S, R>>>,
}

impl<S: ScoreStore, R: RandomSource> Clone for SharedRunner<S, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ScoreStore, R: RandomSource> SharedRunner<S, R> {
    pub fn new(runner: Runner<S, R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(runner)),
        }
    }

    /// Poisoning is ignored; the runner never panics mid-update.
    fn lock(&self) -> MutexGuard<'_, Runner<S, R>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn request_jump(&self) {
        self.lock().request_jump();
    }

    pub fn tick(&self) {
        self.lock().tick();
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.lock().snapshot()
    }

    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.lock().drain_events()
    }

    /// Run `f` with exclusive access to the runner
    pub fn with<T>(&self, f: impl FnOnce(&mut Runner<S, R>) -> T) -> T {
        f(&mut *self.lock())
    }
}
