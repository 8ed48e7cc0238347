//! Seeded random source for the simulation
//!
//! Every random draw in the simulation goes through one owned `FireworkRng`,
//! so a fixed seed replays the same show.

use glam::{Vec2, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

pub struct FireworkRng {
    rng: StdRng,
}

impl FireworkRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a float in [0, 1)
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.unit() * (max - min)
    }

    /// Returns an integer in [lower, upper). Misordered bounds are swapped
    /// and an empty range yields `lower`.
    pub fn random_int(&mut self, lower: i32, upper: i32) -> i32 {
        let (lower, upper) = if upper < lower {
            (upper, lower)
        } else {
            (lower, upper)
        };
        if lower == upper {
            return lower;
        }
        self.rng.random_range(lower..upper)
    }

    /// Returns an index in [0, len); `len` must be non-zero
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Returns true with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Saturated colour: one RGB channel at 0, one at 1 and one random,
    /// rotated by a random offset. Alpha is always 1.
    pub fn bright_colour(&mut self) -> Vec4 {
        let offset = self.random_int(0, 3) as usize;
        let mut channels = [1.0f32; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = match (offset + i) % 3 {
                0 => 0.0,
                1 => 1.0,
                _ => self.unit(),
            };
        }
        Vec4::new(channels[0], channels[1], channels[2], 1.0)
    }

    /// Turns N scalar speeds into N planar velocities spread evenly around
    /// the circle. Each angle lands in the first half of its 2π/N slice.
    pub fn distribute_speeds(&mut self, speeds: &[f32]) -> Vec<Vec2> {
        if speeds.is_empty() {
            return Vec::new();
        }
        let arc = TAU / speeds.len() as f32;
        speeds
            .iter()
            .enumerate()
            .map(|(i, &speed)| {
                let angle = i as f32 * arc + self.range(0.0, arc * 0.5);
                Vec2::from_angle(angle) * speed
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_int_bounds() {
        let mut rng = FireworkRng::new(42);
        for _ in 0..1000 {
            let v = rng.random_int(5, 12);
            assert!((5..12).contains(&v));
        }
    }

    #[test]
    fn random_int_swaps_misordered_bounds() {
        let mut rng = FireworkRng::new(7);
        for _ in 0..1000 {
            let v = rng.random_int(-250, -400);
            assert!((-400..-250).contains(&v));
        }
        assert_eq!(rng.random_int(3, 3), 3);
    }

    #[test]
    fn unit_and_range_bounds() {
        let mut rng = FireworkRng::new(1);
        for _ in 0..1000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
            let r = rng.range(-2.5, 2.5);
            assert!((-2.5..2.5).contains(&r));
        }
    }

    #[test]
    fn bright_colour_is_saturated() {
        let mut rng = FireworkRng::new(99);
        for _ in 0..200 {
            let c = rng.bright_colour();
            let rgb = [c.x, c.y, c.z];
            assert!(rgb.contains(&0.0));
            assert!(rgb.contains(&1.0));
            assert!(rgb.iter().all(|v| (0.0..=1.0).contains(v)));
            assert_eq!(c.w, 1.0);
        }
    }

    #[test]
    fn distribute_speeds_preserves_magnitude() {
        let mut rng = FireworkRng::new(3);
        let speeds = [200.0, 250.0, 300.0, 275.0];
        let velocities = rng.distribute_speeds(&speeds);
        assert_eq!(velocities.len(), 4);
        for (v, s) in velocities.iter().zip(speeds) {
            assert!((v.length() - s).abs() < 1e-3);
        }
    }

    #[test]
    fn distribute_speeds_even_coverage() {
        let mut rng = FireworkRng::new(11);
        for n in [1usize, 2, 5, 9, 12] {
            let speeds = vec![100.0; n];
            let velocities = rng.distribute_speeds(&speeds);
            let arc = TAU / n as f32;
            let angles: Vec<f32> = velocities
                .iter()
                .map(|v| v.y.atan2(v.x).rem_euclid(TAU))
                .collect();

            for pair in angles.windows(2) {
                assert!(pair[1] > pair[0]);
            }
            for i in 0..n {
                let next = if i + 1 == n {
                    angles[0] + TAU
                } else {
                    angles[i + 1]
                };
                let gap = next - angles[i];
                assert!((gap - arc).abs() <= arc + 1e-4, "gap {gap} vs arc {arc}");
            }
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = FireworkRng::new(1234);
        let mut b = FireworkRng::new(1234);
        for _ in 0..50 {
            assert_eq!(a.random_int(0, 1000), b.random_int(0, 1000));
            assert_eq!(a.unit(), b.unit());
        }
    }
}
