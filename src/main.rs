//! Brick Breaker entry point
//!
//! Web: password gate, then the game on the page canvas.
//! Native: headless autopilot run that logs each session's result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use brick_breaker::gate::{AccessGate, GateOutcome};
    use brick_breaker::platform::Host;
    use brick_breaker::platform::web::WebHost;
    use brick_breaker::renderer::RenderState;
    use brick_breaker::{GameConfig, GameLoop, SetupError};

    type SharedGame = Rc<RefCell<GameLoop<WebHost>>>;

    /// Page elements the gate needs
    struct GateView {
        password_container: HtmlElement,
        game_container: HtmlElement,
        password_input: HtmlInputElement,
        submit_button: HtmlElement,
        error_message: HtmlElement,
    }

    impl GateView {
        fn find(document: &Document) -> Result<Self, SetupError> {
            fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, SetupError> {
                document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<T>().ok())
                    .ok_or_else(|| SetupError::ElementMissing(id.to_string()))
            }

            Ok(Self {
                password_container: element(document, "password-container")?,
                game_container: element(document, "game-container")?,
                password_input: element(document, "password-input")?,
                submit_button: element(document, "submit-password")?,
                error_message: element(document, "error-message")?,
            })
        }

        fn unlock(&self) {
            let _ = self.password_container.style().set_property("display", "none");
            let _ = self.game_container.style().set_property("display", "block");
            self.error_message
                .set_text_content(Some(GateOutcome::Unlocked.message()));
        }

        fn reject(&self) {
            self.error_message
                .set_text_content(Some(GateOutcome::Rejected.message()));
            self.password_input.set_value("");
            let _ = self.password_input.focus();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let view = match GateView::find(&document) {
            Ok(view) => Rc::new(view),
            Err(err) => {
                log::error!("Password protection elements not found: {err}");
                if let Some(el) = document.get_element_by_id("error-message") {
                    el.set_text_content(Some(err.placeholder_text()));
                }
                return;
            }
        };

        let gate = AccessGate::default();
        let game: Rc<RefCell<Option<SharedGame>>> = Rc::new(RefCell::new(None));
        let check: Rc<dyn Fn()> = {
            let view = view.clone();
            Rc::new(move || match gate.submit(&view.password_input.value()) {
                GateOutcome::Unlocked => {
                    view.unlock();
                    start_or_restart(&game);
                }
                GateOutcome::Rejected => view.reject(),
            })
        };

        {
            let check = check.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| check());
            let _ = view
                .submit_button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    check();
                }
            });
            let _ = view
                .password_input
                .add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Brick Breaker waiting at the gate");
    }

    /// First unlock builds the game; later unlocks re-initialize it
    fn start_or_restart(slot: &Rc<RefCell<Option<SharedGame>>>) {
        if let Some(game) = slot.borrow().as_ref() {
            if game.borrow().host().has_renderer() {
                let _ = game.borrow_mut().initialize();
            }
            return;
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let host = WebHost::new(window, document);
        let canvas = host.canvas().cloned();
        let game = Rc::new(RefCell::new(GameLoop::new(host, GameConfig::default())));

        {
            let weak = Rc::downgrade(&game);
            let on_frame = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                if let Some(game) = weak.upgrade() {
                    game.borrow_mut().frame();
                }
            });
            game.borrow_mut().host_mut().set_frame_callback(on_frame);
        }

        game.borrow_mut().on_session_end(|report| {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&report.to_string());
            }
        });

        *slot.borrow_mut() = Some(game.clone());

        match canvas {
            Some(canvas) => wasm_bindgen_futures::spawn_local(async move {
                match attach_renderer(&game, canvas).await {
                    Ok(()) => {
                        let _ = game.borrow_mut().initialize();
                    }
                    Err(err) => {
                        log::error!("Renderer setup failed: {err}");
                        game.borrow_mut().host_mut().show_setup_error(&err);
                    }
                }
            }),
            // Reports the missing canvas through the placeholder
            None => {
                let _ = game.borrow_mut().initialize();
            }
        }
    }

    async fn attach_renderer(
        game: &SharedGame,
        canvas: web_sys::HtmlCanvasElement,
    ) -> Result<(), SetupError> {
        let field = game.borrow().config().field_size();
        let (width, height) = (field.x.round() as u32, field.y.round() as u32);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| SetupError::Gpu(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| SetupError::Gpu(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = RenderState::new(surface, &adapter, width, height, field).await?;
        game.borrow_mut().host_mut().set_renderer(renderer);
        Ok(())
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

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brick_breaker::input::{InputState, autopilot};
    use brick_breaker::platform::{FrameHandle, Host};
    use brick_breaker::renderer::{Canvas, DrawList};
    use brick_breaker::{GameLoop, SetupError};

    /// Runs frames back to back, with a recorded canvas and autopilot input
    #[derive(Default)]
    pub struct HeadlessHost {
        pub input: InputState,
        pub pending: Option<FrameHandle>,
        next_frame: i32,
        canvas: DrawList,
    }

    impl Host for HeadlessHost {
        fn input(&self) -> InputState {
            self.input
        }

        fn attach_input(&mut self) {
            log::debug!("Headless run: input comes from the autopilot");
        }

        fn request_frame(&mut self) -> FrameHandle {
            self.next_frame += 1;
            let handle = FrameHandle(self.next_frame);
            self.pending = Some(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if self.pending == Some(handle) {
                self.pending = None;
            }
        }

        fn resize_surface(&mut self, _width: f32, _height: f32) -> Result<(), SetupError> {
            Ok(())
        }

        fn surface(&mut self) -> Option<&mut dyn Canvas> {
            Some(&mut self.canvas as &mut dyn Canvas)
        }

        fn present(&mut self) {}

        fn show_setup_error(&mut self, error: &SetupError) {
            log::error!("{}", error.placeholder_text());
        }
    }

    /// Drive the loop until `max_frames` or no frame is pending
    pub fn run(game: &mut GameLoop<HeadlessHost>, max_frames: u64) -> u64 {
        let mut frames = 0;
        while frames < max_frames && game.host_mut().pending.take().is_some() {
            if let Some(state) = game.state() {
                let input = autopilot(state);
                game.host_mut().input = input;
            }
            game.frame();
            frames += 1;
        }
        frames
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::Cell;
    use std::rc::Rc;

    use brick_breaker::{GameConfig, GameLoop};

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs headless - serve the web build for the playable version");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            match std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()))
            {
                Ok(config) => config,
                Err(err) => {
                    log::error!("Failed to load config {path}: {err}");
                    std::process::exit(1);
                }
            }
        }
        None => GameConfig::default(),
    };
    let max_frames = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(36_000);

    let mut game = GameLoop::new(headless::HeadlessHost::default(), config);
    let sessions = Rc::new(Cell::new(0u32));
    {
        let sessions = sessions.clone();
        game.on_session_end(move |report| {
            sessions.set(sessions.get() + 1);
            println!("{report} ({} ticks)", report.ticks);
        });
    }

    if let Err(err) = game.initialize() {
        log::error!("Initialization failed: {err}");
        std::process::exit(1);
    }

    let frames = headless::run(&mut game, max_frames);
    let score = game.state().map_or(0, |s| s.score);
    log::info!(
        "Ran {frames} frames, {} sessions ended, current score {score}",
        sessions.get()
    );
}
