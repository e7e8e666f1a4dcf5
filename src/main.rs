//! Pipeline Runner entry point
//!
//! Web: wires canvas input, the animation-frame clock and a Canvas2D
//! renderer to the engine. Native: headless autopilot runs.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use pipeline_runner::persistence::LocalStorageKv;
    use pipeline_runner::platform::{FrameClock, is_jump_key};
    use pipeline_runner::sim::{RenderSnapshot, SimRng};
    use pipeline_runner::{BestScoreStore, Runner, Tuning};

    type WebRunner = Runner<BestScoreStore<LocalStorageKv>, SimRng>;

    const GROUND_STROKE: &str = "rgba(56, 189, 248, 0.2)";
    const PLAYER_FILL: &str = "#22d3ee";
    const OBSTACLE_FILL: &str = "#38bdf8";
    const TEXT_FILL: &str = "#e2e8f0";
    const LABEL_FONT: &str = "11px \"Space Grotesk\", sans-serif";
    const PROMPT_FONT: &str = "16px \"Space Grotesk\", sans-serif";

    /// Game instance holding the engine and its host resources
    struct Game {
        runner: WebRunner,
        clock: FrameClock,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        document: Document,
    }

    impl Game {
        /// Run as many fixed ticks as the elapsed time calls for
        fn update(&mut self, time: f64) {
            for _ in 0..self.clock.advance(time) {
                self.runner.tick();
            }
            for event in self.runner.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        /// Draw the current snapshot
        fn render(&self) {
            let snap = self.runner.snapshot();
            let ctx = &self.ctx;
            let width = self.canvas.width() as f64;
            let height = self.canvas.height() as f64;
            ctx.clear_rect(0.0, 0.0, width, height);

            // Ground line under the player's feet
            let ground = snap.player.bottom() as f64 - 2.0;
            ctx.set_stroke_style_str(GROUND_STROKE);
            ctx.set_line_width(2.0);
            ctx.begin_path();
            ctx.move_to(0.0, ground);
            ctx.line_to(width, ground);
            ctx.stroke();

            ctx.set_fill_style_str(PLAYER_FILL);
            let p = snap.player;
            ctx.fill_rect(p.left() as f64, p.top() as f64, p.size.x as f64, p.size.y as f64);

            ctx.set_font(LABEL_FONT);
            for obstacle in &snap.obstacles {
                let r = obstacle.rect;
                ctx.set_fill_style_str(OBSTACLE_FILL);
                ctx.fill_rect(r.left() as f64, r.top() as f64, r.size.x as f64, r.size.y as f64);
                ctx.set_fill_style_str(TEXT_FILL);
                let _ = ctx.fill_text(&obstacle.label, r.left() as f64 - 4.0, r.top() as f64 - 6.0);
            }

            if let Some(prompt) = snap.prompt {
                ctx.set_fill_style_str(TEXT_FILL);
                ctx.set_font(PROMPT_FONT);
                let _ = ctx.fill_text(prompt, 24.0, 40.0);
            }

            self.update_hud(&snap);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, snap: &RenderSnapshot) {
            if let Some(el) = self.document.get_element_by_id("runner-score") {
                el.set_text_content(Some(&snap.score.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("runner-best") {
                el.set_text_content(Some(&snap.best.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("runner-toast") {
                if el.text_content().as_deref() != Some(snap.status.as_str()) {
                    el.set_text_content(Some(&snap.status));
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Pipeline Runner starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("runner-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No #runner-canvas on this page");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let mut tuning = Tuning::load();
        tuning.field_width = canvas.width() as f32;

        let seed = js_sys::Date::now() as u64;
        let runner = Runner::new(tuning, BestScoreStore::new(LocalStorageKv), SimRng::new(seed));
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            runner,
            clock: FrameClock::default(),
            canvas: canvas.clone(),
            ctx,
            document,
        }));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Pipeline Runner running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click, right click and touch all jump
        for event_name in ["click", "contextmenu", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if event.type_() != "click" {
                    event.prevent_default();
                }
                game.borrow_mut().runner.request_jump();
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() || !is_jump_key(&event.code()) {
                return;
            }
            event.prevent_default();
            game.borrow_mut().runner.request_jump();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless runs: `pipeline-runner [runs] [tuning.json]`
///
/// Best score is kept in `$RUNNER_DATA_DIR` (default `.pipeline-runner`).
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pipeline_runner::persistence::FileKv;
    use pipeline_runner::sim::SimRng;
    use pipeline_runner::{BestScoreStore, Runner, Tuning};

    env_logger::init();
    log::info!("Pipeline Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let runs: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    let tuning = match args.next() {
        Some(path) => Tuning::load_file(std::path::Path::new(&path)),
        None => Tuning::default(),
    };

    let data_dir =
        std::env::var("RUNNER_DATA_DIR").unwrap_or_else(|_| ".pipeline-runner".to_string());
    let rng = SimRng::new(rand::random());
    log::info!("Seed {}, best score stored in {}", rng.seed(), data_dir);

    let mut runner = Runner::new(tuning, BestScoreStore::new(FileKv::new(data_dir)), rng);

    for run in 1..=runs {
        let ticks = autopilot::play(&mut runner);
        let snap = runner.snapshot();
        println!(
            "run {:>2}: score {:>5} after {:>6} ticks | best {:>5} | {}",
            run, snap.score, ticks, snap.best, snap.status
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use pipeline_runner::highscores::ScoreStore;
    use pipeline_runner::sim::{RandomSource, RunState, Runner};

    /// Stop a run that never crashes
    const MAX_TICKS: u64 = 200_000;
    /// Jump when the next obstacle is this many ticks away
    const LEAD_TICKS: f32 = 6.0;

    /// Should the player jump now to clear the nearest obstacle ahead?
    pub fn should_jump(state: &RunState) -> bool {
        let player = state.player.rect();
        state
            .obstacles
            .iter()
            .find(|o| o.rect().right() > player.left())
            .is_some_and(|o| o.rect().left() - player.right() <= state.speed * LEAD_TICKS)
    }

    /// Play one full run, returning the ticks it lasted
    pub fn play<S: ScoreStore, R: RandomSource>(runner: &mut Runner<S, R>) -> u64 {
        // A run cut off by MAX_TICKS is still active
        if runner.is_running() {
            runner.reset();
        } else {
            runner.request_jump();
        }
        while runner.is_running() && runner.state().time_ticks < MAX_TICKS {
            if should_jump(runner.state()) {
                runner.request_jump();
            }
            runner.tick();
        }
        for event in runner.drain_events() {
            log::debug!("{:?}", event);
        }
        runner.state().time_ticks
    }
}
