//! Runtime system trait

use fireworks_core::{Result, Viewport};

/// A system that can be ticked by the host loop
///
/// Systems are updated in registration order, once per frame, with the
/// frame's measured delta-time. There is no fixed-step update.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self, viewport: Viewport) -> Result<()>;

    /// Called once per frame with the current viewport bounds
    fn update(&mut self, viewport: Viewport, dt: f64) -> Result<()>;

    /// Called when the host loop exits
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
