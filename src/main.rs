//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brick_breaker::Driver;
    use brick_breaker::Settings;
    use brick_breaker::platform::{Autopilot, Control, HeldControls, InputSource};
    use brick_breaker::renderer::RenderState;

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        render_state: RenderState,
        controls: HeldControls,
        autopilot: Autopilot,
        idle_mode: bool,
    }

    impl Game {
        /// Advance and draw one frame. `time` is the rAF timestamp in ms.
        fn frame(&mut self, time: f64) {
            let input: &mut dyn InputSource = if self.idle_mode {
                &mut self.autopilot
            } else {
                &mut self.controls
            };
            self.driver
                .frame(time / 1000.0, input, &mut self.render_state);
        }

        fn restart(&mut self) {
            self.driver.restart();
            self.controls.clear();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let idle_mode = settings.autopilot;

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

        let render_state = match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => render_state,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            driver: Driver::new(settings),
            render_state,
            controls: HeldControls::new(),
            autopilot: Autopilot::default(),
            idle_mode,
        }));

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Brick Breaker running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Mouse buttons: left moves left, right moves right
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if let Some(control) = Control::from_mouse_button(event.button()) {
                    event.prevent_default();
                    game.borrow_mut().controls.press(control);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release on the window so a drag off the canvas still lets go
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if let Some(control) = Control::from_mouse_button(event.button()) {
                    game.borrow_mut().controls.release(control);
                }
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Right button is a control, not a context menu
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(control) = Control::from_key(&key) {
                    g.controls.press(control);
                    return;
                }
                match key.as_str() {
                    "r" | "R" | "Enter" => {
                        if g.driver.state().is_over() {
                            g.restart();
                        }
                    }
                    "i" | "I" => {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                        let mut settings = g.driver.settings().clone();
                        settings.autopilot = g.idle_mode;
                        settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(control) = Control::from_key(&event.key()) {
                    game.borrow_mut().controls.release(control);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key/button releases never arrive, so drop everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().controls.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::platform::{Autopilot, InputSource};
    use brick_breaker::renderer::HeadlessRenderer;
    use brick_breaker::sim::StepInput;
    use brick_breaker::{Driver, Settings};

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("No windowing backend natively - running a headless session");

    let settings = Settings::load();
    let frame_dt = f64::from(settings.headless_dt.max(0.0));
    let max_frames = u64::from(settings.headless_frames);

    let mut input: Box<dyn InputSource> = if settings.autopilot {
        Box::new(Autopilot::default())
    } else {
        Box::new(StepInput::default())
    };
    let mut renderer = HeadlessRenderer::new();
    let mut driver = Driver::new(settings);

    // Simulated clock so headless runs are reproducible
    let mut now = 0.0;
    let frames = driver.run(
        || {
            let t = now;
            now += frame_dt;
            t
        },
        input.as_mut(),
        &mut renderer,
        |state, frames| state.is_over() || frames >= max_frames,
    );

    let state = driver.state();
    log::info!(
        "Session finished after {} frames: phase {:?}, {} paddle hits, {}/{} bricks left",
        frames,
        state.phase,
        state.hit_count,
        state.bricks_remaining(),
        state.bricks.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
