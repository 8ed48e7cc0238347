//! Particle slots and the fixed-capacity pool that recycles them

use crate::random::FireworkRng;
use glam::{Vec3, Vec4};
use std::ops::{Index, IndexMut};

/// The closed set of particle variants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Spark,
    Rocket,
    Haze,
}

/// One pool slot. Fields other than `alive` are stale while the slot is dead
/// and get overwritten when it is revived.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub kind: ParticleKind,
    pub alive: bool,
    /// Seconds left; the particle expires at or below zero
    pub remaining_life: f32,
    pub radius: f32,
    pub colour: Vec4,
    /// Colour the particle was emitted with (haze flickers around it)
    pub base_colour: Vec4,
    /// Offspring spawned on natural expiry
    pub children: u32,
    pub time_since_last_emission: f32,
    pub pinwheel: bool,
    pub haze_drag: f32,
    /// Pool frame in which this slot was last revived
    pub born_frame: u64,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            kind: ParticleKind::Haze,
            alive: false,
            remaining_life: 0.0,
            radius: 0.0,
            colour: Vec4::ONE,
            base_colour: Vec4::ONE,
            children: 0,
            time_since_last_emission: 0.0,
            pinwheel: false,
            haze_drag: 1.0,
            born_frame: 0,
        }
    }

    /// Restore spawn defaults for `kind`, keeping liveness and frame stamp
    pub fn reset(&mut self, kind: ParticleKind) {
        *self = Self {
            kind,
            alive: self.alive,
            born_frame: self.born_frame,
            ..Self::dead()
        };
    }

    pub fn is_kind(&self, kind: ParticleKind) -> bool {
        self.alive && self.kind == kind
    }
}

/// Fixed array of particle slots with live counters.
///
/// Slots are never allocated or freed individually: spawning flips a dead
/// slot to alive, deleting flips it back. Callers hold plain indices and
/// re-resolve them every frame.
pub struct ParticlePool {
    particles: Vec<Particle>,
    live_particles: usize,
    live_rockets: usize,
    frame: u64,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::dead(); capacity.max(1)],
            live_particles: 0,
            live_rockets: 0,
            frame: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn live_particles(&self) -> usize {
        self.live_particles
    }

    pub fn live_rockets(&self) -> usize {
        self.live_rockets
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Start a new simulation frame; slots revived from now on carry its stamp
    pub fn begin_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }

    /// Claim a slot for a new particle and return its index.
    ///
    /// Prefers the first dead slot. With the pool full, an alive haze slot is
    /// taken over instead. With no haze either, a random slot is overwritten.
    pub fn revive(&mut self, rng: &mut FireworkRng) -> usize {
        if let Some(index) = self.particles.iter().position(|p| !p.alive) {
            self.live_particles += 1;
            self.claim(index);
            return index;
        }

        if let Some(index) = self
            .particles
            .iter()
            .position(|p| p.kind == ParticleKind::Haze)
        {
            self.claim(index);
            return index;
        }

        let index = rng.index(self.particles.len());
        log::warn!(
            "[particles] Pool exhausted ({} slots, no haze to reclaim); overwriting slot {index}",
            self.particles.len()
        );
        if self.particles[index].kind == ParticleKind::Rocket {
            self.live_rockets = self.live_rockets.saturating_sub(1);
        }
        self.claim(index);
        index
    }

    fn claim(&mut self, index: usize) {
        let p = &mut self.particles[index];
        p.alive = true;
        p.born_frame = self.frame;
    }

    /// Count a rocket that was just initialized in a revived slot
    pub fn mark_rocket_launched(&mut self) {
        self.live_rockets += 1;
    }

    /// Flip a slot to dead. Deleting an already dead slot does nothing.
    pub fn delete(&mut self, index: usize) {
        let p = &mut self.particles[index];
        if !p.alive {
            return;
        }
        if p.kind == ParticleKind::Rocket {
            self.live_rockets = self.live_rockets.saturating_sub(1);
        }
        p.alive = false;
        self.live_particles = self.live_particles.saturating_sub(1);
    }

    /// Recount alive rockets from scratch. Returns the corrected count.
    pub fn resync_rocket_count(&mut self) -> usize {
        let counted = self.count_alive_of(ParticleKind::Rocket);
        if counted != self.live_rockets {
            log::debug!(
                "[particles] Rocket count drifted: tracked {}, actual {counted}",
                self.live_rockets
            );
        }
        self.live_rockets = counted;
        counted
    }

    /// Recount alive particles from scratch. Returns the corrected count.
    pub fn resync_live_count(&mut self) -> usize {
        let counted = self.particles.iter().filter(|p| p.alive).count();
        if counted != self.live_particles {
            log::debug!(
                "[particles] Live count drifted: tracked {}, actual {counted}",
                self.live_particles
            );
        }
        self.live_particles = counted;
        counted
    }

    pub fn count_alive_of(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.is_kind(kind)).count()
    }

    /// Alive particles in slot order
    pub fn iter_alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.alive)
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn slots(&self) -> &[Particle] {
        &self.particles
    }
}

impl Index<usize> for ParticlePool {
    type Output = Particle;

    fn index(&self, index: usize) -> &Particle {
        &self.particles[index]
    }
}

impl IndexMut<usize> for ParticlePool {
    fn index_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }
}
