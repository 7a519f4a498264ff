//! No-op collaborators for tests and windowless hosts

use crate::system::{InputBackend, RenderBackend};
use kiln_core::Result;
use std::time::Duration;

/// Render backend that accepts every call and paints nothing.
#[derive(Debug, Default)]
pub struct HeadlessRenderer;

impl RenderBackend for HeadlessRenderer {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        Ok(())
    }

    fn render(&mut self, _delta: Duration) -> Result<()> {
        Ok(())
    }
}

/// Input backend with nothing to poll.
#[derive(Debug, Default)]
pub struct HeadlessInput;

impl InputBackend for HeadlessInput {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}
