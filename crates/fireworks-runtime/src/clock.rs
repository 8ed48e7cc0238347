//! Frame clock with variable delta-time

use std::time::Instant;

/// Measures the wall-clock time between frames.
///
/// Simulation behavior is frame-rate dependent: every frame consumes the
/// measured delta as-is, apart from the optional stall clamp.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Longest delta a single frame may report (`None` disables the clamp)
    pub max_delta: Option<f64>,
    /// Frames ticked so far
    pub frame_count: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: Some(0.25),
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    /// Create a new frame clock with the default 250ms stall clamp
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom clamp
    pub fn with_max_delta(max_delta: Option<f64>) -> Self {
        Self {
            max_delta,
            ..Self::default()
        }
    }

    /// Measure time since the previous tick. Call once per frame.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            return self.advance(0.0);
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by an explicit delta instead of measuring one
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        let elapsed = elapsed.max(0.0);
        self.delta_time = match self.max_delta {
            Some(max) => elapsed.min(max),
            None => elapsed,
        };
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }
}
