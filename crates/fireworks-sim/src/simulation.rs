//! One-frame simulation step: rocket upkeep, culling, behaviors, integration

use crate::config::SimulationConfig;
use crate::particle::{ParticleKind, ParticlePool};
use crate::random::FireworkRng;
use fireworks_core::Viewport;
use glam::Vec3;
use std::time::{SystemTime, UNIX_EPOCH};

/// Owns the particle pool and everything that mutates it
pub struct Simulation {
    pool: ParticlePool,
    rng: FireworkRng,
    config: SimulationConfig,
    seed: u64,
    /// Time since the counters were last rebuilt from a full scan
    time_since_resync: f32,
}

impl Simulation {
    /// Create a simulation, seeding from the config or the wall clock
    pub fn new(config: SimulationConfig) -> Self {
        let seed = config.seed.unwrap_or_else(wall_clock_seed);
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        log::info!(
            "[particles] New simulation: max_particles={}, max_rockets={}, seed={seed}",
            config.max_particles,
            config.max_rockets
        );
        Self {
            pool: ParticlePool::new(config.max_particles),
            rng: FireworkRng::new(seed),
            config,
            seed,
            time_since_resync: 0.0,
        }
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Revive a slot and initialize it as `kind`. Returns the slot index.
    pub fn spawn(&mut self, kind: ParticleKind) -> usize {
        let index = self.pool.revive(&mut self.rng);
        (kind.behavior().make)(&mut self.pool[index], &mut self.rng);
        if kind == ParticleKind::Rocket {
            self.pool.mark_rocket_launched();
        }
        index
    }

    /// Advance the simulation by `dt` seconds inside `viewport`.
    ///
    /// Particles revived during this call (new rockets, burst sparks, trail
    /// haze) are first processed on the following call.
    pub fn step(&mut self, viewport: Viewport, dt: f32) {
        let frame = self.pool.begin_frame();

        if self.time_since_resync > self.config.resync_interval {
            self.pool.resync_rocket_count();
            self.pool.resync_live_count();
            self.time_since_resync = 0.0;
        }
        self.time_since_resync += dt;

        // Never launch more rockets in one frame than the pool has slots
        let deficit = self
            .config
            .max_rockets
            .saturating_sub(self.pool.live_rockets())
            .min(self.pool.capacity());
        for _ in 0..deficit {
            self.launch_rocket(viewport);
        }

        let margin = self.config.cull_margin;
        for index in 0..self.pool.capacity() {
            let p = &self.pool[index];
            if !p.alive || p.born_frame == frame {
                continue;
            }
            let kind = p.kind;

            if p.remaining_life <= 0.0 {
                (kind.behavior().kill)(&mut self.pool, &mut self.rng, index);
                self.pool.delete(index);
                continue;
            }

            if !viewport.contains_with_margin(p.position.x, p.position.y, margin) {
                self.pool.delete(index);
                continue;
            }

            self.pool[index].remaining_life -= dt;
            (kind.behavior().process)(&mut self.pool, &mut self.rng, index, dt);

            let p = &mut self.pool[index];
            p.position += p.velocity * dt;
            p.velocity += p.acceleration * dt;
        }
    }

    fn launch_rocket(&mut self, viewport: Viewport) {
        let index = self.spawn(ParticleKind::Rocket);
        let inset = self.config.launch_margin;
        let x = self.rng.range(inset, viewport.width - inset);
        self.pool[index].position = Vec3::new(x, -self.config.cull_margin, 0.0);
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
