//! Neon Breaker entry point
//!
//! The browser build wires the canvas, pointer and audio to the game loop.
//! The native build runs a headless session through the same fixed-step
//! driver, which is handy for checking tuning and layout files.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use neon_breaker::audio::AudioManager;
    use neon_breaker::consts::SIM_DT;
    use neon_breaker::renderer::{CanvasRenderer, hud_text};
    use neon_breaker::sim::{GameState, Layout};
    use neon_breaker::{Game, Settings, Tuning};

    /// Browser-side state around the game
    struct App {
        game: Game,
        renderer: CanvasRenderer,
        audio: AudioManager,
        last_time: f64,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.game.update(dt, &mut self.audio);
            self.game.render(&mut self.renderer);
            self.update_hud();
        }

        /// Swap presentation settings and keep the audio volume in step
        fn apply_settings(&mut self, settings: Settings) {
            self.audio.set_volume(settings.effective_volume());
            self.game.apply_settings(settings);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let lines = hud_text(&self.game.snapshot());
            for (id, text) in ["score", "level", "lives"].iter().zip(lines.iter()) {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning {
            canvas_width: canvas.width() as f32,
            canvas_height: canvas.height() as f32,
            ..Tuning::default()
        };
        let state = match GameState::new(tuning, Layout::default()) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Canvas does not fit the field ({}), using defaults", e);
                GameState::with_defaults()
            }
        };

        let settings = initial_settings(&canvas);
        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(settings.effective_volume(), seed);
        let renderer = CanvasRenderer::new(&canvas).expect("no 2d context");

        let app = Rc::new(RefCell::new(App {
            game: Game::new(state, settings, seed),
            renderer,
            audio,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Neon Breaker running!");
    }

    /// Settings from the canvas `data-settings` attribute: a preset name or
    /// a JSON object
    fn initial_settings(canvas: &HtmlCanvasElement) -> Settings {
        let Some(text) = canvas.get_attribute("data-settings") else {
            return Settings::default();
        };
        match Settings::from_preset_or_json(&text) {
            Ok(settings) => {
                log::info!("Quality preset: {}", settings.quality.as_str());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring data-settings ({}), using defaults", e);
                Settings::default()
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Mouse move - pointer x relative to the canvas
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                app.borrow_mut().game.set_pointer_x(x);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - restart after a win or game over
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.game.request_restart();
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard - M toggles mute, Q cycles quality
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let mut settings = a.game.settings.clone();
                match event.key().as_str() {
                    "m" | "M" => {
                        settings.toggle_mute();
                        log::info!("Muted: {}", settings.muted);
                    }
                    "q" | "Q" => {
                        settings.apply_preset(settings.quality.next());
                        log::info!("Quality preset: {}", settings.quality.as_str());
                    }
                    _ => return,
                }
                a.apply_settings(settings);
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
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

/// Seconds of play simulated by the headless run
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_SECONDS: u32 = 30;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> neon_breaker::Result<()> {
    use neon_breaker::consts::SIM_DT;
    use neon_breaker::present::LogAudio;
    use neon_breaker::sim::{GameState, Layout};
    use neon_breaker::{Game, QualityPreset, Settings, Tuning};

    env_logger::init();
    log::info!("Neon Breaker (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to play in a browser");

    // Usage: neon-breaker [tuning.json] [layout.json] [settings.json | preset]
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };
    let layout = match args.next() {
        Some(path) => Layout::from_json(&std::fs::read_to_string(path)?)?,
        None => Layout::default(),
    };
    let settings = match args.next() {
        Some(arg) => match QualityPreset::from_str(&arg) {
            Some(preset) => Settings::from_preset(preset),
            None => Settings::from_json(&std::fs::read_to_string(arg)?)?,
        },
        None => Settings::default(),
    };
    log::info!(
        "Quality {}, volume {:.2}",
        settings.quality.as_str(),
        settings.effective_volume()
    );

    let state = GameState::new(tuning, layout)?;
    let center_x = state.tuning.canvas_width / 2.0;
    let mut game = Game::new(state, Settings::default(), 0);
    game.apply_settings(settings);
    let mut audio = LogAudio;

    // Hold the pointer still at the center and let the ball play out
    let frames = HEADLESS_SECONDS * 60;
    for _ in 0..frames {
        game.set_pointer_x(center_x);
        game.update(SIM_DT, &mut audio);
    }

    let state = &game.state;
    log::info!(
        "Headless run finished after {} ticks: phase {:?}, score {}, level {}, lives {}",
        state.time_ticks,
        state.phase,
        state.score,
        state.level,
        state.lives
    );
    log::info!("Bricks left: {}", state.bricks.active_count());
    Ok(())
}
