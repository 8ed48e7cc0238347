//! Fireworks Runtime - Frame loop infrastructure
//!
//! Provides the host loop building blocks:
//! - `FrameClock` - variable delta-time clock on a monotonic source
//! - `FrameStats` - rolling frame-time history for fps reporting
//! - `RuntimeSystem` - trait for systems ticked once per frame
//! - `HostLoop` - owns the clock and drives registered systems

mod clock;
mod host;
mod stats;
mod system;

pub use clock::FrameClock;
pub use host::HostLoop;
pub use stats::FrameStats;
pub use system::RuntimeSystem;
