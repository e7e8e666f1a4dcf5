use pipeline_runner::highscores::ScoreStore;
use pipeline_runner::persistence::StoreError;
use pipeline_runner::sim::{
    GameEvent, MAX_PENDING_EVENTS, NEW_BEST_SUFFIX, Obstacle, RUN_STARTED_MESSAGE, RunPhase,
    Runner, ScriptedRandom, SimRng,
};
use pipeline_runner::Tuning;
use proptest::prelude::*;

/// Score store that records every save
#[derive(Default)]
struct RecordingStore {
    best: u64,
    saves: Vec<u64>,
}

impl RecordingStore {
    fn with_best(best: u64) -> Self {
        Self {
            best,
            saves: Vec::new(),
        }
    }
}

impl ScoreStore for RecordingStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.saves.push(score);
        self.best = score;
        Ok(())
    }
}

fn quiet_tuning() -> Tuning {
    // Nothing spawns within the test horizon
    Tuning {
        spawn_threshold: 100_000,
        ..Default::default()
    }
}

fn scripted(tuning: Tuning, store: RecordingStore) -> Runner<RecordingStore, ScriptedRandom> {
    Runner::new(tuning, store, ScriptedRandom::constant(0.5))
}

/// End the active run at `score` by dropping an obstacle onto the player
fn crash_at(runner: &mut Runner<RecordingStore, ScriptedRandom>, score: f64) {
    let state = runner.state_mut();
    state.score = score;
    state.obstacles.push(Obstacle::new(90.0, 160.0, 30.0, 40.0, "Pipeline timeout"));
    runner.tick();
    assert_eq!(runner.phase(), RunPhase::Ended);
}

#[test]
fn test_idle_jump_then_200_ticks() {
    let mut runner = scripted(quiet_tuning(), RecordingStore::default());
    let ground = runner.tuning().ground_line;

    assert_eq!(runner.phase(), RunPhase::Idle);
    runner.request_jump();
    assert!(runner.is_running());
    assert!(runner.state().player.grounded);
    assert_eq!(runner.state().score, 0.0);
    assert_eq!(runner.status(), RUN_STARTED_MESSAGE);

    for _ in 0..200 {
        runner.tick();
        let player = &runner.state().player;
        assert_eq!(player.pos.y, ground);
        assert_eq!(player.vy, 0.0);
        assert!(player.grounded);
    }

    assert!(runner.is_running());
    assert!((runner.state().score - 20.0).abs() < 1e-6);
    assert_eq!(runner.snapshot().score, 20);
}

#[test]
fn test_grounded_player_hits_first_obstacle() {
    let mut runner = scripted(Tuning::default(), RecordingStore::default());
    runner.request_jump();

    while runner.is_running() {
        runner.tick();
        assert!(runner.state().time_ticks <= 200, "run never ended");
    }

    // Spawned at tick 71 at x 740, reaches the player's right edge (108) at tick 176
    assert_eq!(runner.state().time_ticks, 176);
    let snap = runner.snapshot();
    assert!(!snap.running);
    assert_eq!(snap.score, 17);
    assert_eq!(snap.best, 17);
    // 0.5 picks index 5 of the incident list
    assert_eq!(snap.status, format!("Dependency deadlock{}", NEW_BEST_SUFFIX));
    assert_eq!(runner.store().saves, vec![17]);
}

#[test]
fn test_new_best_saves_exactly_once() {
    let mut runner = scripted(quiet_tuning(), RecordingStore::with_best(50));
    runner.request_jump();
    crash_at(&mut runner, 75.0);

    assert_eq!(runner.store().saves, vec![75]);
    assert_eq!(runner.best(), 75);
    assert_eq!(runner.status(), "Pipeline timeout · New best!");
    assert!(runner.drain_events().contains(&GameEvent::NewBest(75)));
}

#[test]
fn test_lower_score_never_saves() {
    let mut runner = scripted(quiet_tuning(), RecordingStore::with_best(50));
    runner.request_jump();
    crash_at(&mut runner, 30.0);

    assert!(runner.store().saves.is_empty());
    assert_eq!(runner.best(), 50);
    assert_eq!(runner.status(), "Pipeline timeout");
}

#[test]
fn test_ended_run_stays_frozen_until_jump() {
    let mut runner = scripted(quiet_tuning(), RecordingStore::default());
    runner.request_jump();
    for _ in 0..30 {
        runner.tick();
    }
    crash_at(&mut runner, 5.0);

    let frozen = runner.snapshot();
    for _ in 0..50 {
        runner.tick();
    }
    assert_eq!(runner.snapshot(), frozen);

    // The restart request does not jump
    runner.request_jump();
    assert!(runner.is_running());
    assert!(runner.state().player.grounded);
    assert_eq!(runner.state().player.vy, 0.0);
    assert_eq!(runner.state().score, 0.0);
    assert_eq!(runner.status(), RUN_STARTED_MESSAGE);
}

#[test]
fn test_best_survives_across_runs() {
    let mut runner = scripted(quiet_tuning(), RecordingStore::default());

    runner.request_jump();
    crash_at(&mut runner, 40.0);
    runner.request_jump();
    crash_at(&mut runner, 20.0);
    runner.request_jump();
    crash_at(&mut runner, 90.0);

    assert_eq!(runner.store().saves, vec![40, 90]);
    assert_eq!(runner.best(), 90);
}

#[test]
fn test_undrained_events_stay_bounded() {
    let mut runner = Runner::new(Tuning::default(), RecordingStore::default(), SimRng::new(7));

    // Host that only jumps and ticks, never draining. Every run queues at
    // least a start, a spawn and a crash, so 100 runs overflow the cap.
    for _ in 0..100 {
        runner.request_jump();
        while runner.is_running() && runner.state().time_ticks < 5_000 {
            if runner.state().time_ticks % 7 == 0 {
                runner.request_jump();
            }
            runner.tick();
            assert!(runner.state().pending_events().len() <= MAX_PENDING_EVENTS);
        }
        if runner.is_running() {
            runner.reset();
        }
    }

    assert_eq!(runner.state().pending_events().len(), MAX_PENDING_EVENTS);
    let drained = runner.drain_events();
    assert_eq!(drained.len(), MAX_PENDING_EVENTS);
    assert!(runner.state().pending_events().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_run_invariants_hold(seed in any::<u64>(), jump_every in 5u64..60) {
        let tuning = Tuning::default();
        let mut runner = Runner::new(tuning.clone(), RecordingStore::default(), SimRng::new(seed));
        runner.request_jump();

        let mut prev_score = 0.0;
        let mut prev_speed = tuning.initial_speed;
        while runner.is_running() && runner.state().time_ticks < 3_000 {
            if runner.state().time_ticks % jump_every == 0 {
                runner.request_jump();
            }
            let before: Vec<f32> = runner.state().obstacles.iter().map(|o| o.pos.x).collect();
            runner.tick();
            let state = runner.state();

            // Ground invariant
            prop_assert!(state.player.pos.y <= tuning.ground_line);
            if state.player.pos.y == tuning.ground_line {
                prop_assert_eq!(state.player.vy, 0.0);
                prop_assert!(state.player.grounded);
            }

            // Score and speed only grow; speed tracks the hundreds crossed
            prop_assert!(state.score >= prev_score);
            prop_assert!(state.speed >= prev_speed);
            let expected = tuning.initial_speed
                + tuning.speed_step * (state.score / tuning.speed_milestone).floor() as f32;
            prop_assert!((state.speed - expected).abs() < 1e-3);
            prev_score = state.score;
            prev_speed = state.speed;

            // Obstacles keep spawn order and only move left
            for pair in state.obstacles.windows(2) {
                prop_assert!(pair[0].pos.x < pair[1].pos.x);
            }
            // Culling only ever removes from the front
            let spawned = usize::from(state.spawn_timer == 0);
            let culled = before.len() + spawned - state.obstacles.len();
            for (o, x) in state.obstacles.iter().zip(before.iter().skip(culled)) {
                prop_assert!(o.pos.x < *x);
            }
            prop_assert!(state.spawn_timer <= tuning.spawn_threshold);
        }
    }
}
