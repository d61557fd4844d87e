//! Meteor Defense entry point
//!
//! Handles platform-specific initialization and starts the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent};

    use meteor_defense::audio::AudioManager;
    use meteor_defense::platform::IntervalHandle;
    use meteor_defense::renderer::{QuadRenderer, Sprite, Surface};
    use meteor_defense::sim::{GameState, InputAction, KeyEvent, Rect};
    use meteor_defense::{ConfigError, GameConfig, GameLoop};

    /// WebGPU for the sprites, a DOM element for the score
    struct WebSurface {
        renderer: QuadRenderer,
        score_el: Option<Element>,
        shown_score: Option<u64>,
    }

    impl Surface for WebSurface {
        fn clear(&mut self, width: f32, height: f32) {
            self.renderer.clear(width, height);
        }

        fn blit(&mut self, sprite: Sprite, rect: Rect) {
            self.renderer.push(&sprite.vertices(&rect));
        }

        fn draw_score(&mut self, score: u64) {
            // Only touch the DOM when the number changes
            if self.shown_score == Some(score) {
                return;
            }
            if let Some(el) = &self.score_el {
                el.set_text_content(Some(&score.to_string()));
            }
            self.shown_score = Some(score);
        }

        fn present(&mut self) {
            match self.renderer.present() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.renderer.size;
                    self.renderer.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    struct Game {
        game_loop: GameLoop,
        surface: WebSurface,
        audio: AudioManager,
    }

    impl Game {
        fn tick(&mut self) {
            let Game {
                game_loop,
                surface,
                audio,
            } = self;
            game_loop.tick(surface, audio);
        }
    }

    /// Defaults, overridden by an optional
    /// `<script id="game-config" type="application/json">` block.
    /// The field always matches the canvas.
    fn load_config(document: &Document, width: f32, height: f32) -> Result<GameConfig, ConfigError> {
        let overrides = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
            .filter(|json| !json.trim().is_empty());

        let config = match overrides {
            Some(json) => GameConfig::parse_overrides(&json)?,
            None => GameConfig::default(),
        }
        .with_field(width, height);

        config.validate()?;
        Ok(config)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Meteor Defense starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = (canvas.width(), canvas.height());
        let config = match load_config(&document, width as f32, height as f32) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                return;
            }
        };

        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Field {}x{}, seed {}", width, height, seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let field = (config.field_width, config.field_height);
        let renderer = match QuadRenderer::new(surface, &adapter, width, height, field).await {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        };

        let audio = AudioManager::new(config.audio.clone());
        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(GameState::new(config, seed)),
            surface: WebSurface {
                renderer,
                score_el: document.query_selector("#hud-score .hud-value").ok().flatten(),
                shown_score: None,
            },
            audio,
        }));

        setup_input_handlers(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop; it cancels its own interval on game over
        let rate = game.borrow().game_loop.state().config.tick_rate;
        let ticker = game.clone();
        match IntervalHandle::start(rate, move || ticker.borrow_mut().tick()) {
            Ok(handle) => game.borrow_mut().game_loop.attach(Box::new(handle)),
            Err(e) => {
                log::error!("Failed to start game loop: {:?}", e);
                return;
            }
        }

        log::info!("Meteor Defense running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: set intent, toggle autopilot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // First gesture unlocks audio
                g.audio.resume();

                let key = event.key();
                if key == "i" || key == "I" {
                    g.game_loop.toggle_autopilot();
                } else if let Some(action) = InputAction::from_key(&key) {
                    event.prevent_default();
                    g.game_loop.handle_input(KeyEvent::down(action));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: clear intent
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = InputAction::from_key(&event.key()) {
                    game.borrow_mut().game_loop.handle_input(KeyEvent::up(action));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use meteor_defense::audio::{SilentAudio, SoundEffect};
    use meteor_defense::renderer::RecordingSurface;
    use meteor_defense::sim::GameState;
    use meteor_defense::{GameConfig, GameLoop};

    env_logger::init();
    log::info!("Meteor Defense (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    // Optional JSON overrides, same shape as the web config block
    let config = match std::env::var("METEOR_DEFENSE_CONFIG") {
        Ok(json) => GameConfig::from_json(&json),
        Err(_) => Ok(GameConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let seed = config.seed.unwrap_or(0x5EED);
    let mut game = GameLoop::new(GameState::new(config, seed));
    game.set_autopilot(true);

    let mut surface = RecordingSurface::new();
    let mut audio = SilentAudio::default();
    // Two simulated minutes at most
    let max_ticks = game.state().config.ticks_in(120);
    let ran = game.run_headless(&mut surface, &mut audio, max_ticks);

    let state = game.state();
    log::info!("Demo finished: score {} after {} ticks", state.score, ran);
    println!(
        "Seed {}: {} ticks, {} shots, score {}{}",
        seed,
        ran,
        audio.count(SoundEffect::Laser),
        state.score,
        if state.is_over() { " (meteor landed)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
