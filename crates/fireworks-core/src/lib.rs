//! Fireworks Core - Foundational types shared by the fireworks crates
//!
//! This crate provides:
//! - `Viewport` - Window bounds supplied to the simulation every frame
//! - Error types and Result alias

mod error;
mod types;

pub use error::{FireworksError, Result};
pub use types::Viewport;
