//! Engine lifecycle and frame scheduling
//!
//! [`Engine`] owns the {Stopped, Running, Paused} state machine and the
//! fixed-timestep frame pump. Everything runs synchronously on the context
//! that delivers frame callbacks: within one frame, every banked update step
//! completes before the single render pass, observers fire before the
//! subsystem call they announce, and no phase overlaps the next frame.

use kiln_core::{KilnError, Result};
use log::{debug, info};
use std::fmt;
use std::time::{Duration, Instant};

use crate::clock::FrameClock;
use crate::config::EngineConfig;
use crate::events::EngineEvents;
use crate::frame::{FrameHandle, FrameSource, ManualFrameSource};
use crate::headless::{HeadlessInput, HeadlessRenderer};
use crate::system::{InputBackend, RenderBackend, RunRequest, SystemRunner, SystemSet};

/// Lifecycle state of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Stopped,
    Running,
    Paused,
}

impl EngineStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EngineStatus::Stopped => "stopped",
            EngineStatus::Running => "running",
            EngineStatus::Paused => "paused",
        }
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn illegal(op: &'static str, status: EngineStatus) -> KilnError {
    KilnError::IllegalTransition {
        op,
        status: status.as_str(),
    }
}

/// Builder for wiring an [`Engine`] to its collaborators.
///
/// Every collaborator defaults to a harmless stand-in (manual frame source,
/// empty system set, headless backends), so tests and headless hosts can
/// build an engine with no wiring at all.
pub struct EngineBuilder {
    config: EngineConfig,
    frame_source: Box<dyn FrameSource>,
    runner: Box<dyn SystemRunner>,
    renderer: Box<dyn RenderBackend>,
    input: Box<dyn InputBackend>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            frame_source: Box::new(ManualFrameSource::new()),
            runner: Box::new(SystemSet::new()),
            renderer: Box::new(HeadlessRenderer),
            input: Box::new(HeadlessInput),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_frame_source(mut self, source: Box<dyn FrameSource>) -> Self {
        self.frame_source = source;
        self
    }

    pub fn with_runner(mut self, runner: Box<dyn SystemRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn RenderBackend>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_input(mut self, input: Box<dyn InputBackend>) -> Self {
        self.input = input;
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            config: self.config,
            status: EngineStatus::Stopped,
            clock: FrameClock::new(),
            frame_handle: None,
            events: EngineEvents::default(),
            frame_source: self.frame_source,
            runner: self.runner,
            renderer: self.renderer,
            input: self.input,
        }
    }
}

/// The simulation host: lifecycle state machine, frame scheduler, and phase
/// dispatcher over external collaborators.
///
/// All state lives on the instance; independent engines can coexist. The
/// engine is single-threaded and none of it is `Send`.
pub struct Engine {
    config: EngineConfig,
    status: EngineStatus,
    clock: FrameClock,
    /// Handle of the pending frame request. `None` when stopped or while the
    /// requested frame is being delivered; at most one is outstanding.
    frame_handle: Option<FrameHandle>,
    events: EngineEvents,
    frame_source: Box<dyn FrameSource>,
    runner: Box<dyn SystemRunner>,
    renderer: Box<dyn RenderBackend>,
    input: Box<dyn InputBackend>,
}

impl Engine {
    /// Shorthand for a default-wired engine; see [`EngineBuilder`].
    pub fn new(config: EngineConfig) -> Self {
        EngineBuilder::new().with_config(config).build()
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mutable access to the config; the scheduler reads it fresh each frame.
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// The engine's event channels, for subscribing and unsubscribing.
    pub fn events_mut(&mut self) -> &mut EngineEvents {
        &mut self.events
    }

    /// Handle of the pending frame request, if any.
    pub fn frame_handle(&self) -> Option<FrameHandle> {
        self.frame_handle
    }

    /// Start the engine: Stopped -> Running.
    ///
    /// Initializes the render backend, blocks on its asset load, initializes
    /// the input backend, seeds the clock, requests the first frame, then
    /// emits `on_init`. A collaborator failure propagates to the caller with
    /// the engine left Running; the caller decides whether to [`stop`].
    ///
    /// [`stop`]: Engine::stop
    pub fn init(&mut self) -> Result<()> {
        self.init_at(Instant::now())
    }

    /// [`init`](Engine::init) with an explicit timestamp, for deterministic
    /// hosts and tests.
    pub fn init_at(&mut self, now: Instant) -> Result<()> {
        if self.status != EngineStatus::Stopped {
            return Err(illegal("init", self.status));
        }

        self.status = EngineStatus::Running;

        self.renderer.init()?;
        self.renderer.load()?;
        self.input.init()?;

        self.clock.seed(now);
        self.frame_handle = Some(self.frame_source.request_frame());

        info!(
            "engine initialized (time step {} ms, skip threshold {} steps)",
            self.config.time_step().as_millis(),
            self.config.effective_skip_frame_count()
        );

        self.events.on_init.emit(&());
        Ok(())
    }

    /// Stop the engine: {Running, Paused} -> Stopped.
    ///
    /// Emits `on_stop` while collaborators are still live, cancels the
    /// pending frame request exactly once, stops the input backend, then
    /// marks the engine Stopped.
    pub fn stop(&mut self) -> Result<()> {
        if self.status == EngineStatus::Stopped {
            return Err(illegal("stop", self.status));
        }

        self.events.on_stop.emit(&());

        if let Some(handle) = self.frame_handle.take() {
            self.frame_source.cancel_frame(handle);
        }

        self.input.stop()?;
        self.status = EngineStatus::Stopped;

        info!("engine stopped");
        Ok(())
    }

    /// Toggle Running <-> Paused. Errs when Stopped.
    ///
    /// Pausing does not cancel the pending frame: frames keep arriving and
    /// the scheduler keeps measuring time, but update and render phases
    /// no-op. Wall time elapsed while paused is therefore discarded as it
    /// accrues; resuming never produces a burst of catch-up steps.
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if self.status == EngineStatus::Stopped {
            return Err(illegal("set_paused", self.status));
        }

        self.status = if paused {
            EngineStatus::Paused
        } else {
            EngineStatus::Running
        };
        debug!("engine {}", self.status);
        Ok(())
    }

    /// Deliver the pending frame callback now.
    pub fn frame(&mut self) -> Result<()> {
        self.frame_at(Instant::now())
    }

    /// The frame pump: measure elapsed time, drain fixed update steps, run
    /// one render pass, re-arm the frame source.
    ///
    /// A delivery that arrives after [`stop`](Engine::stop) is a silent
    /// no-op. If a phase errors the frame aborts without re-arming, so the
    /// loop halts unless the caller recovers.
    pub fn frame_at(&mut self, now: Instant) -> Result<()> {
        if self.status == EngineStatus::Stopped {
            return Ok(());
        }

        // The pending request is the one being delivered.
        self.frame_handle = None;

        let time_step = self.config.time_step();
        let skip_frame_count = self.config.effective_skip_frame_count();
        let delta = self.clock.advance(now, time_step, skip_frame_count);

        while self.clock.should_step(time_step) {
            self.clock.consume_step(time_step);
            self.update(time_step)?;
        }

        self.render(delta)?;

        self.frame_handle = Some(self.frame_source.request_frame());
        Ok(())
    }

    /// One update phase: `on_update`, then the system runner, then the input
    /// backend's per-update hook. No-op unless Running.
    ///
    /// Public so hosts and tests can step logic without the frame source.
    pub fn update(&mut self, delta: Duration) -> Result<()> {
        if self.status != EngineStatus::Running {
            return Ok(());
        }

        self.events.on_update.emit(&delta);
        self.runner.run(RunRequest {
            is_rendering: false,
            delta_time: delta,
        })?;
        self.input.update()?;
        Ok(())
    }

    /// One render phase: `on_render`, then the system runner, then the
    /// render backend's paint, then the input backend's per-render hook.
    /// No-op unless Running.
    pub fn render(&mut self, delta: Duration) -> Result<()> {
        if self.status != EngineStatus::Running {
            return Ok(());
        }

        self.events.on_render.emit(&delta);
        self.runner.run(RunRequest {
            is_rendering: true,
            delta_time: delta,
        })?;
        self.renderer.render(delta)?;
        self.input.render()?;
        Ok(())
    }
}
