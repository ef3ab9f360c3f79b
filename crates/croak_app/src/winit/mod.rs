//! Winit-based window runner
//!
//! - [`App`]: builder for configuring and launching the window
//! - `AppRunner`: internal event loop handler
//!
//! The runner owns a [`Session`] and a [`WindowSink`]. Keyboard events go
//! through [`input_adapter`] into the session's key map; every redraw
//! advances one frame with the measured delta time and hands the posed rig
//! to the sink. Sinks that draw into the window get it through
//! [`WindowSink::attach`] once it exists.
//!
//! ```rust,ignore
//! let mut session = Session::new(CharacterSettings::default())?;
//! let loader = FsAssetLoader::new("assets")?;
//! session.request_assets(&loader, &FROG_ASSETS);
//! App::new().with_title("Frog").run(session, LogSink)?;
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
pub use winit::window::{Window, WindowId};

use croak_core::{Result, Timer};

use crate::input::{Input, Key};
use crate::session::{FrameSink, LogSink, Session};

pub mod input_adapter;

/// A [`FrameSink`] that lives in a window.
///
/// Every method has a no-op default, so a plain sink only needs the
/// empty impl.
pub trait WindowSink: FrameSink {
    /// Called once the window has been created, before the first frame.
    fn attach(&mut self, _window: Arc<Window>) -> Result<()> {
        Ok(())
    }

    /// Called when the window's physical size changes.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Called before [`FrameSink::present`] with this frame's input state.
    fn update_input(&mut self, _input: &Input) {}
}

impl WindowSink for LogSink {}

/// Window builder.
pub struct App {
    title: String,
    width: f64,
    height: f64,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Croak".into(),
            width: 1280.0,
            height: 720.0,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the logical window size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if event loop creation or execution fails.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run<S: WindowSink + 'static>(self, session: Session, sink: S) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::new(self, session, sink);
        event_loop.run_app(&mut runner)?;
        Ok(())
    }

    /// Spawns the event loop and returns immediately (WASM).
    ///
    /// # Errors
    ///
    /// Returns an error if event loop creation fails.
    #[cfg(target_arch = "wasm32")]
    pub fn run<S: WindowSink + 'static>(self, session: Session, sink: S) -> Result<()> {
        use winit::platform::web::EventLoopExtWebSys;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.spawn_app(AppRunner::new(self, session, sink));
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

struct AppRunner<S: WindowSink> {
    config: App,
    window: Option<Arc<Window>>,
    session: Session,
    sink: S,
    input: Input,
    timer: Timer,
}

impl<S: WindowSink> AppRunner<S> {
    fn new(config: App, session: Session, sink: S) -> Self {
        Self {
            config,
            window: None,
            session,
            sink,
            input: Input::new(),
            timer: Timer::new(),
        }
    }

    fn redraw(&mut self) {
        self.timer.tick();
        let frame = self.session.frame(self.timer.dt_seconds());
        self.sink.update_input(&self.input);
        self.sink.present(self.session.rig(), &frame);
        self.input.start_frame();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl<S: WindowSink> ApplicationHandler for AppRunner<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                let window = Arc::new(window);
                let size = window.inner_size();
                self.input.inject_resize(size.width, size.height);
                if let Err(e) = self.sink.attach(window.clone()) {
                    log::error!("Failed to attach renderer: {e}");
                    event_loop.exit();
                    return;
                }
                self.window = Some(window);
                self.timer.reset();
                log::info!("Window created");
            }
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(press) = input_adapter::process_window_event(&mut self.input, &event) {
            if press.key == Key::Escape {
                event_loop.exit();
                return;
            }
            self.session.handle_key(press);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.sink.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Exiting after {} frames", self.timer.frames());
    }
}
