//! Sky Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use sky_dash::Tuning;
    use sky_dash::consts::SIM_DT;
    use sky_dash::platform::{InputState, KeyBindings};
    use sky_dash::renderer::RenderState;
    use sky_dash::sim::{FixedStep, GameEvent, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        render_state: Option<RenderState>,
        clock: FixedStep,
        last_time: f64,
        input: InputState,
        game_over: bool,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            Self {
                state: GameState::new(seed, &tuning),
                tuning,
                render_state: None,
                clock: FixedStep::new(),
                last_time: 0.0,
                input: InputState::new(KeyBindings::default()),
                game_over: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            if self.game_over {
                if self.input.take_restart() {
                    self.restart(js_sys::Date::now() as u64);
                }
                return;
            }
            // Enter only means something on the game-over screen
            self.input.take_restart();

            for _ in 0..self.clock.advance(dt) {
                let input = self.input.snapshot();
                tick(&mut self.state, &input, &self.tuning);
                log_events(&self.state);

                if self.state.is_out_of_lives() {
                    self.game_over = true;
                    log::info!(
                        "Game over at frame {} with score {}",
                        self.state.frame,
                        self.state.player.score
                    );
                    break;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state.view()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let view = self.state.view();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&view.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&view.lives.max(0).to_string()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.game_over {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&view.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed, &self.tuning);
            self.clock.reset();
            self.input.clear();
            self.game_over = false;
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    fn log_events(state: &GameState) {
        for event in &state.events {
            match event {
                GameEvent::FellOut | GameEvent::Hurt => {
                    log::info!("{:?}: {} lives left", event, state.player.lives)
                }
                GameEvent::Stomped { score } => log::debug!("Stomp, score {}", score),
                _ => log::trace!("{:?}", event),
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let tuning = Tuning::default();
        let viewport = (tuning.viewport_width, tuning.viewport_height);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, viewport)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Sky Dash running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Key down: latch one-shots, and keep game keys from scrolling the page
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.input.key_down(&event.key(), event.repeat()).is_some() {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-ups will never arrive for keys held now
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
                log::debug!("Window blur, input cleared");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use sky_dash::Tuning;
    use sky_dash::sim::{GameEvent, GameState, autopilot, tick};

    /// Play Sky Dash headless with the demo player and log a summary
    #[derive(Parser, Debug)]
    #[command(name = "sky-dash", version, about)]
    pub struct Args {
        /// Number of simulation ticks to run
        #[arg(default_value_t = 3600)]
        pub frames: u64,
        /// Level generation seed
        #[arg(default_value_t = 12345)]
        pub seed: u64,
        /// JSON file overriding any subset of the default tuning
        pub tuning: Option<PathBuf>,
    }

    /// Tallies for the end-of-run summary
    #[derive(Debug, Default)]
    struct Stats {
        jumps: u32,
        double_jumps: u32,
        stomps: u32,
        hurts: u32,
        falls: u32,
        segments: u32,
    }

    impl Stats {
        fn record(&mut self, event: &GameEvent) {
            match event {
                GameEvent::Jumped { double: false } => self.jumps += 1,
                GameEvent::Jumped { double: true } => self.double_jumps += 1,
                GameEvent::Stomped { .. } => self.stomps += 1,
                GameEvent::Hurt => self.hurts += 1,
                GameEvent::FellOut => self.falls += 1,
                GameEvent::SegmentGenerated { .. } => self.segments += 1,
                _ => {}
            }
        }
    }

    pub fn load_tuning(path: &Path) -> Result<Tuning, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Tuning::from_json(&json)?)
    }

    /// Play `frames` ticks with the demo player and log what happened
    pub fn run(frames: u64, seed: u64, tuning: &Tuning) {
        let mut state = GameState::new(seed, tuning);
        let mut stats = Stats::default();
        let mut game_over_frame = None;

        log::info!("Headless run: {} frames, seed {}", frames, seed);

        for _ in 0..frames {
            let input = autopilot(&state);
            tick(&mut state, &input, tuning);

            for event in &state.events {
                stats.record(event);
            }
            if game_over_frame.is_none() && state.is_out_of_lives() {
                game_over_frame = Some(state.frame);
                log::info!("Out of lives at frame {}", state.frame);
            }
        }

        log::info!(
            "Finished at x={:.0} (camera {:.0}), score {}, lives {}",
            state.player.pos.x,
            state.camera_x,
            state.player.score,
            state.player.lives
        );
        log::info!(
            "{} platforms and {} enemies live, {} segments generated",
            state.platforms.len(),
            state.enemies.len(),
            stats.segments
        );
        log::info!("{:?}", stats);
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_defaults() {
            let args = Args::try_parse_from(["sky-dash"]).unwrap();
            assert_eq!(args.frames, 3600);
            assert_eq!(args.seed, 12345);
            assert!(args.tuning.is_none());
        }

        #[test]
        fn test_args_positional() {
            let args = Args::try_parse_from(["sky-dash", "600", "7", "tuning.json"]).unwrap();
            assert_eq!(args.frames, 600);
            assert_eq!(args.seed, 7);
            assert_eq!(args.tuning, Some(PathBuf::from("tuning.json")));
        }

        #[test]
        fn test_args_reject_malformed_numbers() {
            assert!(Args::try_parse_from(["sky-dash", "10abc"]).is_err());
            assert!(Args::try_parse_from(["sky-dash", "600", "-5"]).is_err());
        }

        #[test]
        fn test_load_tuning_reports_missing_file() {
            assert!(load_tuning(Path::new("/nonexistent/sky-dash-tuning.json")).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = headless::Args::parse();
    log::info!("Sky Dash (native) starting...");

    let tuning = match args.tuning.as_deref() {
        Some(path) => match headless::load_tuning(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => sky_dash::Tuning::default(),
    };

    headless::run(args.frames, args.seed, &tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
