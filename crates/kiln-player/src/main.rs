//! Kiln Player - Windowed host for the Kiln engine
//!
//! Drives an engine from winit redraw callbacks with a demo heartbeat
//! system. Space toggles pause, Escape or closing the window stops the
//! engine.
//!
//! Usage:
//!   kiln-player [--config <engine.toml>] [--paused]

use anyhow::{Context, Result};
use clap::Parser;
use kiln_runtime::EngineConfig;
use winit::event_loop::{ControlFlow, EventLoop};

mod player_app;
mod systems;

use player_app::PlayerApp;

#[derive(Parser)]
#[command(name = "kiln-player")]
#[command(about = "Kiln engine player - run the simulation loop in a window")]
struct Args {
    /// Path to an engine config TOML file
    #[arg(long)]
    config: Option<String>,

    /// Start with the simulation paused
    #[arg(long)]
    paused: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            EngineConfig::from_toml_str(&text).context("Failed to parse engine config")?
        }
        None => EngineConfig::default(),
    };

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = PlayerApp::new(config, args.paused);
    event_loop.run_app(&mut app).context("Event loop error")?;

    Ok(())
}
