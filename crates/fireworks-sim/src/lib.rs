//! Fireworks Sim - Particle simulation and lifecycle engine
//!
//! Provides the CPU side of the fireworks show:
//! - Fixed-capacity particle pool with dead-slot / haze-reclaim revival
//! - Rocket, Spark and Haze behaviors (spawn, per-tick update, burst on expiry)
//! - Delta-time simulation step with rocket upkeep, culling and Euler integration
//! - Render snapshot packing and the alpha fade policy for instanced draws

pub mod behavior;
pub mod config;
pub mod particle;
pub mod random;
pub mod render;
pub mod simulation;

use fireworks_core::{Result, Viewport};
use fireworks_runtime::RuntimeSystem;

pub use config::SimulationConfig;
pub use particle::{Particle, ParticleKind, ParticlePool};
pub use render::{FadePolicy, RenderRecord, RenderSnapshot};
pub use simulation::Simulation;

/// Runs the simulation inside the host loop and keeps a render snapshot of
/// the latest frame.
pub struct FireworksSystem {
    pub simulation: Simulation,
    pub snapshot: RenderSnapshot,
    pub fade: FadePolicy,
    report_interval: Option<f64>,
    since_report: f64,
}

impl FireworksSystem {
    pub fn new(config: SimulationConfig) -> Self {
        let snapshot = RenderSnapshot::with_capacity(config.max_particles);
        let fade = FadePolicy::new(config.haze_fade_life);
        Self {
            simulation: Simulation::new(config),
            snapshot,
            fade,
            report_interval: None,
            since_report: 0.0,
        }
    }

    /// Log live counts every `seconds` of simulated time
    pub fn with_report_interval(mut self, seconds: f64) -> Self {
        self.report_interval = Some(seconds).filter(|s| *s > 0.0);
        self
    }

    fn report(&mut self, dt: f64) -> bool {
        let Some(interval) = self.report_interval else {
            return false;
        };
        self.since_report += dt;
        if self.since_report < interval {
            return false;
        }
        self.since_report -= interval;
        let pool = self.simulation.pool();
        log::info!(
            "[particles] {} live ({} rockets), {} records",
            pool.live_particles(),
            pool.live_rockets(),
            self.snapshot.len()
        );
        true
    }
}

impl Default for FireworksSystem {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl RuntimeSystem for FireworksSystem {
    fn initialize(&mut self, viewport: Viewport) -> Result<()> {
        self.simulation.config().validate()?;
        log::info!(
            "[particles] Viewport {}x{}, pool of {} slots",
            viewport.width,
            viewport.height,
            self.simulation.pool().capacity()
        );
        Ok(())
    }

    fn update(&mut self, viewport: Viewport, dt: f64) -> Result<()> {
        self.simulation.step(viewport, dt as f32);
        self.snapshot.pack(self.simulation.pool());
        self.fade.apply(&mut self.snapshot);
        self.report(dt);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.snapshot.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
