//! Rolling frame-time statistics

use std::collections::VecDeque;

/// Keeps the last `window` frame times for fps reporting
pub struct FrameStats {
    samples: VecDeque<f64>,
    window: usize,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(120)
    }
}

impl FrameStats {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            samples: VecDeque::with_capacity(window),
            window,
        }
    }

    /// Record one frame's delta-time, dropping the oldest sample when full
    pub fn record(&mut self, dt: f64) {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn average_delta(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// Frames per second over the window; `None` until a non-zero sample exists
    pub fn fps(&self) -> Option<f64> {
        self.average_delta()
            .filter(|avg| *avg > 0.0)
            .map(|avg| 1.0 / avg)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
