//! Kiln Runtime - Frame scheduling and engine lifecycle
//!
//! Provides the simulation-host building blocks:
//! - `Engine` / `EngineBuilder` — lifecycle state machine and frame pump
//! - `FrameClock` — fixed-timestep accumulator with stall collapse
//! - `Signal` / `EngineEvents` — ordered synchronous observer registry
//! - `FrameSource` — injectable next-frame primitive
//! - Collaborator traits (`SystemRunner`, `RenderBackend`, `InputBackend`)
//!   with headless stand-ins
//!
//! Logic always advances in fixed steps regardless of how irregularly the
//! host delivers frames; rendering runs once per delivered frame with the
//! true wall-clock delta.

mod clock;
mod config;
mod engine;
mod events;
mod frame;
mod headless;
mod system;

pub use clock::{FrameClock, MAX_FRAME_DELTA};
pub use config::{EngineConfig, MIN_TIME_STEP};
pub use engine::{Engine, EngineBuilder, EngineStatus};
pub use events::{EngineEvents, Signal, SubscriptionId};
pub use frame::{FrameHandle, FrameSource, ManualFrameSource};
pub use headless::{HeadlessInput, HeadlessRenderer};
pub use system::{
    InputBackend, RenderBackend, RunRequest, RuntimeSystem, SystemRunner, SystemSet,
};
