//! Doodle Climb entry point
//!
//! Web: canvas front end driven by requestAnimationFrame.
//! Native: headless autopilot session, useful for soak-testing tuning files.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use doodle_climb::platform::{FrameClock, RawInput, translate};
    use doodle_climb::sim::{Facing, World, apply_input, step};
    use doodle_climb::Tuning;

    /// Game instance holding all state
    struct Game {
        world: World,
        clock: FrameClock,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                world: World::new(seed, Tuning::default()),
                clock: FrameClock::new(),
                ctx,
            }
        }

        fn on_input(&mut self, raw: RawInput<'_>) {
            let event = translate(raw, self.world.tuning.field_width);
            if apply_input(&mut self.world, event) {
                self.clock.reset();
            }
        }

        /// Draw the current frame
        fn render(&self) {
            let ctx = &self.ctx;
            let snap = self.world.snapshot();
            let tuning = &self.world.tuning;

            ctx.clear_rect(0.0, 0.0, tuning.field_width as f64, tuning.field_height as f64);

            ctx.set_fill_style_str("#6ab04c");
            for p in &snap.platforms {
                ctx.fill_rect(p.x as f64, p.y as f64, p.width as f64, p.height as f64);
            }

            let d = snap.doodler;
            ctx.set_fill_style_str(match d.facing {
                Facing::Left => "#e17055",
                Facing::Right => "#d63031",
            });
            ctx.fill_rect(d.x as f64, d.y as f64, d.width as f64, d.height as f64);

            ctx.set_fill_style_str("black");
            ctx.set_font("16px sans-serif");
            let _ = ctx.fill_text(&format!("Score: {}", snap.score), 5.0, 20.0);
            if snap.game_over {
                let _ = ctx.fill_text(
                    "Game Over: Tap to Restart",
                    (tuning.field_width / 7.0) as f64,
                    (tuning.field_height * 7.0 / 8.0) as f64,
                );
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Doodle Climb starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("board")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::default();
        canvas.set_width(tuning.field_width as u32);
        canvas.set_height(tuning.field_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, ctx)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let document = web_sys::window().unwrap().document().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().on_input(RawInput::Key(&event.code()));
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    game.borrow_mut().on_input(RawInput::Touch { x });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let dt = g.clock.advance(time);
            step(&mut g.world, dt);
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

/// Reference frames in a native session (two minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const SESSION_FRAMES: u64 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use doodle_climb::sim::{Autopilot, World, apply_input, step};
    use doodle_climb::{DeltaMode, Tuning};

    env_logger::init();
    log::info!("Doodle Climb (native) starting...");

    let mut tuning = match std::env::var_os("DOODLE_TUNING") {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if let Ok(name) = std::env::var("DOODLE_DELTA_MODE") {
        match DeltaMode::from_str(&name) {
            Some(mode) => tuning.delta_mode = mode,
            None => log::warn!(
                "Unknown DOODLE_DELTA_MODE {:?}, keeping {}",
                name,
                tuning.delta_mode.as_str()
            ),
        }
    }

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_millis() as u64,
    };
    log::info!(
        "Headless session with seed {} ({} timing)",
        seed,
        tuning.delta_mode.as_str()
    );

    let mut world = World::new(seed, tuning);
    let pilot = Autopilot::default();
    let mut bounces = 0u64;

    for frame in 0..SESSION_FRAMES {
        if let Some(event) = pilot.decide(&world) {
            apply_input(&mut world, event);
        }
        let report = step(&mut world, 1.0);
        if report.bounced {
            bounces += 1;
        }
        if frame % 600 == 0 {
            log::info!(
                "frame {}: score {}, best {}, runs {}",
                frame,
                world.score,
                world.max_score,
                world.restarts + 1
            );
        }
    }

    println!(
        "seed {}: best score {} over {} run(s), {} bounces",
        seed,
        world.max_score,
        world.restarts + 1,
        bounces
    );
    Ok(())
}
