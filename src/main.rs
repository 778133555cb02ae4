//! Score Fireworks entry point
//!
//! Web: listens for score messages from the embedding page and renders the
//! feedback display with WebGPU. Native: runs the simulation headless and
//! logs what it would draw.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, MessageEvent};

    use score_fireworks::renderer::{RenderState, surface_extent};
    use score_fireworks::score::SCORE_LINE_COLOR;
    use score_fireworks::{AnimationDriver, Settings};

    /// App instance holding all state
    struct App {
        driver: AnimationDriver,
        render_state: Option<RenderState>,
        /// A requestAnimationFrame callback is pending
        frame_scheduled: bool,
    }

    impl App {
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.driver.canvas()) {
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

        /// Update the feedback text overlay
        fn update_overlay(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let feedback = self.driver.feedback();
            let height = self.driver.canvas().height();

            if let Some(el) = document
                .get_element_by_id("feedback-headline")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                el.set_text_content(Some(feedback.headline()));
                let style = el.style();
                let _ = style.set_property("color", &feedback.color().to_css());
                let top = height / 2.0 + feedback.headline_offset();
                let _ = style.set_property("top", &format!("{}px", top));
            }

            if let Some(el) = document
                .get_element_by_id("feedback-score")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                el.set_text_content(Some(&self.driver.score_line()));
                let style = el.style();
                let _ = style.set_property("color", &SCORE_LINE_COLOR.to_css());
                let _ = style.set_property("top", &format!("{}px", height / 2.0 + 20.0));
            }
        }
    }

    /// Canvas size: half the window in each direction, at least one pixel
    fn canvas_size(window: &web_sys::Window) -> (u32, u32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(640.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(480.0);
        surface_extent((w / 2.0).floor() as f32, (h / 2.0).floor() as f32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Score Fireworks starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let (width, height) = canvas_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let driver = match AnimationDriver::new(&settings, width as f32, height as f32, seed) {
            Ok(driver) => driver,
            Err(e) => {
                log::error!("Invalid fireworks settings: {}", e);
                return;
            }
        };

        let app = Rc::new(RefCell::new(App {
            driver,
            render_state: None,
            frame_scheduled: false,
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Renderer setup failed: {}", e);
                return;
            }
        }

        setup_message_listener(app.clone());
        setup_resize_listener(canvas, app.clone());

        // Initial static draw
        schedule_frame(app);

        log::info!("Score Fireworks waiting for scores");
    }

    /// Request a frame unless one is already pending
    fn schedule_frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.frame_scheduled {
                return;
            }
            a.frame_scheduled = true;
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            animation_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_loop(app: Rc<RefCell<App>>) {
        let keep_looping = {
            let mut a = app.borrow_mut();
            a.frame_scheduled = false;

            let outcome = a.driver.frame();
            if outcome.rendered {
                a.render();
            }
            if outcome.feedback_changed {
                a.update_overlay();
            }
            outcome.keep_looping
        };

        if keep_looping {
            schedule_frame(app);
        }
    }

    fn setup_message_listener(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MessageEvent| {
            // `undefined` payloads stringify to a non-string
            let Some(json) = js_sys::JSON::stringify(&event.data())
                .ok()
                .and_then(|s| s.as_string())
            else {
                return;
            };

            let accepted = app.borrow_mut().driver.receive_message(&json);
            if accepted {
                schedule_frame(app.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_listener(canvas: HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_size(&window);
            canvas.set_width(width);
            canvas.set_height(height);
            {
                let mut a = app.borrow_mut();
                a.driver.resize(width as f32, height as f32);
                if let Some(ref mut render_state) = a.render_state {
                    render_state.resize(width, height);
                }
            }
            schedule_frame(app.clone());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Score Fireworks (native) starting...");
    log::info!("Native mode runs headless - serve the web build for the real display");

    if let Err(e) = headless::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use score_fireworks::{AnimationDriver, ConfigError, ScoreReport, Settings};

    const WIDTH: f32 = 960.0;
    const HEIGHT: f32 = 540.0;
    const DEFAULT_FRAMES: u64 = 600;
    const STATS_EVERY: u64 = 60;

    /// `score-fireworks [SCORE MAX_SCORE [FRAMES [SETTINGS.json]]]`
    pub fn run(args: Vec<String>) -> Result<(), ConfigError> {
        let number = |i: usize| args.get(i).and_then(|s| s.parse::<f64>().ok());
        let score = number(0).unwrap_or(10.0);
        let max_score = number(1).unwrap_or(10.0);
        let frames = args
            .get(2)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_FRAMES);

        let settings = match args.get(3) {
            Some(path) => Settings::from_file(Path::new(path))?,
            None => Settings::load(),
        };

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut driver = AnimationDriver::new(&settings, WIDTH, HEIGHT, seed)?;

        driver.receive_message(&ScoreReport::new(score, max_score).to_message());
        log::info!("{} | {}", driver.feedback().headline(), driver.score_line());

        let mut peak_particles = 0;
        for _ in 0..frames {
            let outcome = driver.frame();
            if !outcome.rendered {
                log::info!("Animation idle after {} frames", driver.frame_index());
                break;
            }

            let particles = driver.field().particle_count();
            peak_particles = peak_particles.max(particles);
            if driver.frame_index() % STATS_EVERY == 0 {
                log::info!(
                    "frame {}: {} fireworks, {} particles, {} points on canvas",
                    driver.frame_index(),
                    driver.field().len(),
                    particles,
                    driver.canvas().points().len()
                );
            }
        }

        log::info!(
            "Done: {} frames, peak {} particles",
            driver.frame_index(),
            peak_particles
        );
        Ok(())
    }
}
