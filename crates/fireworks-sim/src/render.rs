//! Per-frame render snapshot consumed by the instanced draw

use crate::particle::{Particle, ParticleKind, ParticlePool};
use bytemuck::{Pod, Zeroable};

/// Render-side type tag. The encoding belongs to the presentation layer and
/// is independent of `ParticleKind`'s declaration order.
pub fn type_tag(kind: ParticleKind) -> i32 {
    match kind {
        ParticleKind::Spark => 0,
        ParticleKind::Rocket => 1,
        ParticleKind::Haze => 2,
    }
}

/// GPU instance data, one per alive particle. 40 bytes, tightly packed.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderRecord {
    pub translate: [f32; 3],
    pub colour: [f32; 4],
    pub radius: f32,
    pub remaining_life: f32,
    pub particle_type: i32,
}

impl RenderRecord {
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            translate: p.position.to_array(),
            colour: p.colour.to_array(),
            radius: p.radius,
            remaining_life: p.remaining_life,
            particle_type: type_tag(p.kind),
        }
    }
}

/// Alpha fade applied as particles run out of life. Rockets never fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadePolicy {
    /// Haze alpha is `0.5 * (life / haze_fade_life)^2`
    pub haze_fade_life: f32,
}

impl Default for FadePolicy {
    fn default() -> Self {
        Self {
            haze_fade_life: 3.0,
        }
    }
}

impl FadePolicy {
    pub fn new(haze_fade_life: f32) -> Self {
        Self { haze_fade_life }
    }

    pub fn alpha_for(&self, record: &RenderRecord) -> f32 {
        let life = record.remaining_life;
        match record.particle_type {
            0 if life < 0.5 => {
                let factor = 2.0 * life;
                factor * factor
            }
            2 => {
                let factor = life / self.haze_fade_life;
                0.5 * factor * factor
            }
            _ => record.colour[3],
        }
    }

    /// Bake the fade into every record's alpha channel
    pub fn apply(&self, snapshot: &mut RenderSnapshot) {
        for record in &mut snapshot.records {
            record.colour[3] = self.alpha_for(record);
        }
    }
}

/// Packed records for every alive particle, in slot order
#[derive(Default)]
pub struct RenderSnapshot {
    records: Vec<RenderRecord>,
}

impl RenderSnapshot {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Rebuild from the pool. Call after the simulation step has settled.
    pub fn pack(&mut self, pool: &ParticlePool) {
        self.records.clear();
        self.records
            .extend(pool.iter_alive().map(RenderRecord::from_particle));
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[RenderRecord] {
        &self.records
    }

    /// Raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// An empty snapshot means the draw is skipped entirely
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FireworkRng;
    use glam::{Vec3, Vec4};

    fn record(particle_type: i32, remaining_life: f32) -> RenderRecord {
        RenderRecord {
            translate: [0.0; 3],
            colour: [1.0, 0.5, 0.0, 1.0],
            radius: 3.0,
            remaining_life,
            particle_type,
        }
    }

    #[test]
    fn render_record_layout() {
        assert_eq!(std::mem::size_of::<RenderRecord>(), 40);
        assert_eq!(std::mem::align_of::<RenderRecord>(), 4);
    }

    #[test]
    fn type_tags() {
        assert_eq!(type_tag(ParticleKind::Spark), 0);
        assert_eq!(type_tag(ParticleKind::Rocket), 1);
        assert_eq!(type_tag(ParticleKind::Haze), 2);
    }

    #[test]
    fn spark_fades_in_last_half_second() {
        let fade = FadePolicy::default();
        assert_eq!(fade.alpha_for(&record(0, 0.8)), 1.0);
        assert!((fade.alpha_for(&record(0, 0.25)) - 0.25).abs() < 1e-6);
        assert_eq!(fade.alpha_for(&record(0, 0.0)), 0.0);
    }

    #[test]
    fn haze_fade_uses_configured_life() {
        let fade = FadePolicy::new(2.0);
        assert!((fade.alpha_for(&record(2, 2.0)) - 0.5).abs() < 1e-6);
        assert!((fade.alpha_for(&record(2, 1.0)) - 0.125).abs() < 1e-6);

        let fade = FadePolicy::new(3.0);
        assert!((fade.alpha_for(&record(2, 1.5)) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn rockets_never_fade() {
        let fade = FadePolicy::default();
        assert_eq!(fade.alpha_for(&record(1, 0.01)), 1.0);
    }

    #[test]
    fn pack_skips_dead_slots() {
        let mut pool = ParticlePool::new(5);
        let mut rng = FireworkRng::new(1);
        for _ in 0..3 {
            pool.revive(&mut rng);
        }
        pool[1].kind = ParticleKind::Rocket;
        pool[1].position = Vec3::new(1.0, 2.0, 3.0);
        pool[1].colour = Vec4::new(0.0, 1.0, 0.5, 1.0);
        pool.delete(0);

        let mut snapshot = RenderSnapshot::with_capacity(pool.capacity());
        snapshot.pack(&pool);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.records()[0].translate, [1.0, 2.0, 3.0]);
        assert_eq!(snapshot.records()[0].particle_type, 1);
        assert_eq!(snapshot.as_bytes().len(), 80);

        pool.delete(1);
        pool.delete(2);
        snapshot.pack(&pool);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn apply_bakes_alpha() {
        let mut snapshot = RenderSnapshot::default();
        snapshot.records.push(record(0, 0.25));
        snapshot.records.push(record(1, 0.25));
        FadePolicy::default().apply(&mut snapshot);
        assert!((snapshot.records()[0].colour[3] - 0.25).abs() < 1e-6);
        assert_eq!(snapshot.records()[1].colour[3], 1.0);
    }
}
