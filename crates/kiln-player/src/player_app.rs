//! Player application implementing winit ApplicationHandler
//!
//! Owns the engine and maps winit callbacks onto it: `RedrawRequested`
//! delivers the frame callback, and the engine's frame source re-arms by
//! calling `Window::request_redraw`.

use kiln_core::Result;
use kiln_runtime::{
    Engine, EngineBuilder, EngineConfig, EngineStatus, FrameHandle, FrameSource, RenderBackend,
    SystemSet,
};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::systems::Heartbeat;

/// Frame source backed by winit redraw requests.
///
/// Redraw requests cannot be revoked, so `cancel_frame` is a no-op; the
/// engine ignores deliveries that arrive after it has stopped.
pub struct RedrawFrameSource {
    window: Arc<Window>,
    next_id: u64,
}

impl RedrawFrameSource {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window, next_id: 0 }
    }
}

impl FrameSource for RedrawFrameSource {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.window.request_redraw();
        FrameHandle::from_raw(self.next_id)
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {}
}

/// Render backend that reports frame pacing in the window title.
struct TitleRenderer {
    window: Arc<Window>,
    title: String,
    frames: u32,
    elapsed: Duration,
}

impl TitleRenderer {
    fn new(window: Arc<Window>, title: String) -> Self {
        Self {
            window,
            title,
            frames: 0,
            elapsed: Duration::ZERO,
        }
    }
}

impl RenderBackend for TitleRenderer {
    fn init(&mut self) -> Result<()> {
        self.window.set_title(&self.title);
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, delta: Duration) -> Result<()> {
        self.frames += 1;
        self.elapsed += delta;
        if self.elapsed >= Duration::from_secs(1) {
            let fps = self.frames as f64 / self.elapsed.as_secs_f64();
            self.window
                .set_title(&format!("{} ({:.0} fps)", self.title, fps));
            self.frames = 0;
            self.elapsed = Duration::ZERO;
        }
        Ok(())
    }
}

pub struct PlayerApp {
    config: EngineConfig,
    start_paused: bool,
    window: Option<Arc<Window>>,
    engine: Option<Engine>,
}

impl PlayerApp {
    pub fn new(config: EngineConfig, start_paused: bool) -> Self {
        Self {
            config,
            start_paused,
            window: None,
            engine: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.container_id)
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let mut systems = SystemSet::new();
        systems.register(Box::new(Heartbeat::new()));

        let mut engine = EngineBuilder::new()
            .with_config(self.config.clone())
            .with_frame_source(Box::new(RedrawFrameSource::new(window.clone())))
            .with_renderer(Box::new(TitleRenderer::new(
                window,
                self.config.container_id.clone(),
            )))
            .with_runner(Box::new(systems))
            .build();

        engine.init()?;
        if self.start_paused {
            engine.set_paused(true)?;
        }

        self.engine = Some(engine);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(engine) = &mut self.engine {
            if engine.status() != EngineStatus::Stopped {
                if let Err(e) = engine.stop() {
                    eprintln!("Stop error: {:?}", e);
                }
            }
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                eprintln!("Failed to initialize: {:?}", e);
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
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    match code {
                        KeyCode::Escape => self.shutdown(event_loop),
                        KeyCode::Space => {
                            if let Some(engine) = &mut self.engine {
                                let paused = engine.status() == EngineStatus::Paused;
                                if let Err(e) = engine.set_paused(!paused) {
                                    eprintln!("Pause error: {:?}", e);
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    if let Err(e) = engine.frame() {
                        eprintln!("Frame error: {:?}", e);
                        self.shutdown(event_loop);
                    }
                }
            }

            _ => {}
        }
    }
}
