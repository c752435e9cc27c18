//! Dino Claw entry point
//!
//! Browser builds run the canvas front-end; native builds run a headless
//! autopilot session that logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use dino_claw::GameController;
    use dino_claw::platform::{command_for_click, command_for_key};
    use dino_claw::renderer::ScoreSink;
    use dino_claw::renderer::canvas::CanvasRenderer;
    use dino_claw::tuning::Tuning;

    /// Writes the counters into the `#score` and `#attempts` elements
    struct DomScoreSink {
        document: Document,
    }

    impl ScoreSink for DomScoreSink {
        fn update_scores(&mut self, score: u64, attempts: u32) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&score.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("attempts") {
                el.set_text_content(Some(&attempts.to_string()));
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: GameController,
        renderer: CanvasRenderer,
        hud: DomScoreSink,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        fn frame(&mut self) {
            self.controller.tick_with(&mut self.renderer, &mut self.hud);
        }

        fn resize(&mut self, width: f32, height: f32) {
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.controller.resize(width, height);
        }
    }

    fn window_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as f32, h as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dino Claw starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = window_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            controller: GameController::new(width, height, seed, Tuning::default()),
            renderer: CanvasRenderer::new(ctx),
            hud: DomScoreSink { document },
            canvas: canvas.clone(),
        }));

        setup_input_handlers(&window, &canvas, game.clone());
        request_animation_frame(game);

        log::info!("Dino Claw running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(command) = command_for_key(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut().controller.apply(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click / tap moves the claw over the pointer
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                game.borrow_mut()
                    .controller
                    .apply(command_for_click(x as f32));
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let resized = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = window_size(&resized);
                game.borrow_mut().resize(w, h);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One simulation tick per display frame
    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use dino_claw::renderer::LogSink;
    use dino_claw::sim::autopilot_input;
    use dino_claw::{ConfigError, Difficulty, GameController, Tuning};

    /// Headless Dino Claw: an autopilot plays and the log narrates
    #[derive(Debug, Parser)]
    #[command(name = "dino-claw", version, about)]
    pub struct Cli {
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        pub seed: u64,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 3_600)]
        pub ticks: u64,

        /// Field width in pixels
        #[arg(long, default_value_t = 1_000.0)]
        pub width: f32,

        /// Field height in pixels
        #[arg(long, default_value_t = 800.0)]
        pub height: f32,

        /// Tuning JSON file
        #[arg(long)]
        pub tuning: Option<PathBuf>,

        /// Difficulty preset (easy, normal, hard); overrides the file's grab/slip odds
        #[arg(long)]
        pub difficulty: Option<Difficulty>,
    }

    impl Cli {
        pub fn tuning(&self) -> Result<Tuning, ConfigError> {
            let mut tuning = match &self.tuning {
                Some(path) => Tuning::load(path)?,
                None => Tuning::default(),
            };
            if let Some(preset) = self.difficulty {
                tuning.apply_preset(preset);
            }
            Ok(tuning)
        }
    }

    pub fn run(cli: &Cli, tuning: Tuning) {
        let mut game = GameController::new(cli.width, cli.height, cli.seed, tuning);
        let mut frames = LogSink::default();
        let mut scores = LogSink::default();

        for _ in 0..cli.ticks {
            let input = autopilot_input(game.state());
            game.queue_input(&input);
            game.tick_with(&mut frames, &mut scores);
        }

        log::info!(
            "Finished after {} ticks: score {}, attempts {}, {} of {} dinos collected",
            game.state().time_ticks,
            game.score(),
            game.attempts(),
            game.collected().len(),
            game.bodies().len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = headless::Cli::parse();
    let tuning = match cli.tuning() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Failed to load tuning: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Dino Claw (headless) starting...");
    headless::run(&cli, tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
