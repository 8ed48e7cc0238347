//! Per-variant spawn, update and expiry handlers
//!
//! Each `ParticleKind` maps to a `Behavior` triple:
//! - `make` initializes a freshly revived slot
//! - `process` runs once per tick before integration (drag, trail emission)
//! - `kill` runs on natural expiry only; out-of-bounds culling skips it

use crate::particle::{Particle, ParticleKind, ParticlePool};
use crate::random::FireworkRng;
use glam::{Vec2, Vec3};

pub type MakeFn = fn(&mut Particle, &mut FireworkRng);
pub type ProcessFn = fn(&mut ParticlePool, &mut FireworkRng, usize, f32);
pub type KillFn = fn(&mut ParticlePool, &mut FireworkRng, usize);

pub struct Behavior {
    pub make: MakeFn,
    pub process: ProcessFn,
    pub kill: KillFn,
}

pub static ROCKET: Behavior = Behavior {
    make: make_rocket,
    process: process_rocket,
    kill: kill_rocket,
};

pub static SPARK: Behavior = Behavior {
    make: make_spark,
    process: process_spark,
    kill: kill_spark,
};

pub static HAZE: Behavior = Behavior {
    make: make_haze,
    process: process_haze,
    kill: kill_haze,
};

impl ParticleKind {
    pub fn behavior(self) -> &'static Behavior {
        match self {
            ParticleKind::Rocket => &ROCKET,
            ParticleKind::Spark => &SPARK,
            ParticleKind::Haze => &HAZE,
        }
    }
}

// ── Rocket ──

const ROCKET_GRAVITY: f32 = -100.0;
const ROCKET_RADIUS: f32 = 6.0;
const ROCKET_RADIUS_WOBBLE: f32 = 0.25;
const ROCKET_PINWHEEL_CHANCE: f32 = 0.1;
const ROCKET_TRAIL_INTERVAL: f32 = 0.05;
const PINWHEEL_TRAIL_INTERVAL: f32 = 0.02;
const PINWHEEL_SPIN_RATE: f32 = 20.0;
const PINWHEEL_SPIN_SPEED: f32 = 100.0;
const PINWHEEL_HAZE_DRAG: f32 = 1.3;
const TRAIL_JITTER: f32 = 60.0;
const SPLITTER_CHANCE: f32 = 0.1;
/// `random_int` bounds, upper exclusive: rockets carry 5..=12 children and
/// splitter sparks 6..=12. Older shows drew 5..=11 for rockets.
const ROCKET_CHILDREN: (i32, i32) = (5, 13);
const SPLITTER_CHILDREN: (i32, i32) = (6, 13);

/// Jitter scale for trail haze: 0 while the rocket is young, 1 near burnout
pub fn erraticness(remaining_life: f32) -> f32 {
    if remaining_life <= 0.0 {
        return 1.0;
    }
    (0.35 / remaining_life).min(1.0).powf(1.5)
}

pub fn make_rocket(p: &mut Particle, rng: &mut FireworkRng) {
    p.reset(ParticleKind::Rocket);
    p.velocity = Vec3::new(rng.range(-100.0, 100.0), rng.range(250.0, 400.0), 0.0);
    p.acceleration = Vec3::new(0.0, ROCKET_GRAVITY, 0.0);
    p.colour = rng.bright_colour();
    p.base_colour = p.colour;
    p.radius = ROCKET_RADIUS;
    p.remaining_life = rng.range(1.0, 4.0);
    p.children = rng.random_int(ROCKET_CHILDREN.0, ROCKET_CHILDREN.1) as u32;
    p.pinwheel = rng.chance(ROCKET_PINWHEEL_CHANCE);
}

pub fn process_rocket(pool: &mut ParticlePool, rng: &mut FireworkRng, index: usize, dt: f32) {
    let rocket = &mut pool[index];
    rocket.velocity.x += rng.range(-3.0, 3.0);
    rocket.radius = (rocket.radius + rng.range(-ROCKET_RADIUS_WOBBLE, ROCKET_RADIUS_WOBBLE))
        .clamp(ROCKET_RADIUS - 1.0, ROCKET_RADIUS + 1.0);

    let interval = if rocket.pinwheel {
        PINWHEEL_TRAIL_INTERVAL
    } else {
        ROCKET_TRAIL_INTERVAL
    };
    if rocket.time_since_last_emission > interval {
        rocket.time_since_last_emission = 0.0;
        let rocket = *rocket;
        emit_rocket_trail(pool, rng, &rocket);
    }
    pool[index].time_since_last_emission += dt;
}

fn emit_rocket_trail(pool: &mut ParticlePool, rng: &mut FireworkRng, rocket: &Particle) {
    let h = pool.revive(rng);
    let haze = &mut pool[h];
    make_haze(haze, rng);

    let backward = rocket.velocity.normalize_or_zero();
    haze.position = rocket.position - backward * rocket.radius;
    haze.colour = rocket.colour;
    haze.base_colour = rocket.colour;

    if rocket.pinwheel {
        let phase = PINWHEEL_SPIN_RATE * rocket.remaining_life;
        let spin = Vec3::new(phase.cos(), phase.sin(), 0.0) * PINWHEEL_SPIN_SPEED;
        haze.velocity = rocket.velocity + spin;
        haze.haze_drag = PINWHEEL_HAZE_DRAG;
    } else {
        let scale = TRAIL_JITTER * erraticness(rocket.remaining_life);
        let jitter = Vec3::new(rng.range(-1.0, 1.0), rng.range(-1.0, 1.0), 0.0) * scale;
        haze.velocity = rocket.velocity * -0.75 + jitter;
    }
}

pub fn kill_rocket(pool: &mut ParticlePool, rng: &mut FireworkRng, index: usize) {
    let rocket = pool[index];
    if rocket.children == 0 {
        return;
    }

    let splitter = rng.chance(SPLITTER_CHANCE);
    let speeds: Vec<f32> = (0..rocket.children)
        .map(|_| rng.range(200.0, 300.0))
        .collect();
    let directions = rng.distribute_speeds(&speeds);
    log::trace!(
        "[particles] Rocket burst: {} sparks{}",
        directions.len(),
        if splitter { " (splitter)" } else { "" }
    );

    for direction in directions {
        let s = pool.revive(rng);
        let spark = &mut pool[s];
        make_spark(spark, rng);
        spark.position = rocket.position;
        spark.velocity = planar(direction) + rocket.velocity * 0.5;

        if splitter {
            spark.children = rng.random_int(SPLITTER_CHILDREN.0, SPLITTER_CHILDREN.1) as u32;
            spark.radius = 2.0;
            spark.remaining_life *= 0.75;
            spark.colour = rng.bright_colour();
        } else {
            spark.children = 0;
            spark.radius = SPARK_RADIUS;
            spark.colour = rocket.colour;
        }
        spark.base_colour = spark.colour;
    }
}

// ── Spark ──

const SPARK_RADIUS: f32 = 3.0;
const SPARK_LIFE: f32 = 1.0;
const SPARK_DRAG: f32 = 1.6;
const SPARK_GRAVITY: f32 = -60.0;
const SPARK_TRAIL_INTERVAL: f32 = 0.1;

pub fn make_spark(p: &mut Particle, rng: &mut FireworkRng) {
    p.reset(ParticleKind::Spark);
    p.velocity = Vec3::new(rng.range(-200.0, 200.0), rng.range(-200.0, 200.0), 0.0);
    p.acceleration = Vec3::new(0.0, -100.0, 0.0);
    p.remaining_life = SPARK_LIFE;
    p.radius = SPARK_RADIUS;
}

pub fn process_spark(pool: &mut ParticlePool, rng: &mut FireworkRng, index: usize, dt: f32) {
    let spark = &mut pool[index];
    spark.acceleration.x = -SPARK_DRAG * spark.velocity.x;
    spark.acceleration.y = SPARK_GRAVITY;

    if spark.time_since_last_emission > SPARK_TRAIL_INTERVAL {
        spark.time_since_last_emission = 0.0;
        let spark = *spark;

        let h = pool.revive(rng);
        let haze = &mut pool[h];
        make_haze(haze, rng);
        haze.position = spark.position;
        haze.velocity =
            spark.velocity * 0.1 + Vec3::new(rng.range(-2.5, 2.5), rng.range(-2.5, 2.5), 0.0);
        haze.colour = spark.colour;
        haze.base_colour = spark.colour;
    }
    pool[index].time_since_last_emission += dt;
}

/// Splitter sparks burst again; plain sparks just go out
pub fn kill_spark(pool: &mut ParticlePool, rng: &mut FireworkRng, index: usize) {
    let parent = pool[index];
    if parent.children == 0 {
        return;
    }

    let speeds: Vec<f32> = (0..parent.children)
        .map(|_| rng.range(150.0, 250.0))
        .collect();
    for direction in rng.distribute_speeds(&speeds) {
        let s = pool.revive(rng);
        let spark = &mut pool[s];
        make_spark(spark, rng);
        spark.position = parent.position;
        spark.velocity = planar(direction) + parent.velocity * 0.5;
        spark.colour = rng.bright_colour();
        spark.base_colour = spark.colour;
    }
}

// ── Haze ──

pub const HAZE_LIFE: f32 = 2.0;
pub const HAZE_FLICKER: f32 = 0.1;

pub fn make_haze(p: &mut Particle, _rng: &mut FireworkRng) {
    p.reset(ParticleKind::Haze);
    p.acceleration = Vec3::new(0.0, -8.0, 0.0);
    p.remaining_life = HAZE_LIFE;
    p.radius = 1.0;
}

pub fn process_haze(pool: &mut ParticlePool, rng: &mut FireworkRng, index: usize, _dt: f32) {
    let haze = &mut pool[index];
    haze.acceleration = -haze.haze_drag * haze.velocity;

    // One shared offset for all channels keeps the hue; it fades with age
    let fraction = (haze.remaining_life / HAZE_LIFE).clamp(0.0, 1.0);
    let offset = rng.range(-HAZE_FLICKER, HAZE_FLICKER) * fraction;
    let rgb = (haze.base_colour.truncate() + Vec3::splat(offset)).clamp(Vec3::ZERO, Vec3::ONE);
    haze.colour = rgb.extend(haze.colour.w);
}

pub fn kill_haze(_pool: &mut ParticlePool, _rng: &mut FireworkRng, _index: usize) {}

fn planar(v: Vec2) -> Vec3 {
    v.extend(0.0)
}
