//! Common value types

use serde::{Deserialize, Serialize};

/// Visible area of the host window, in simulation units (pixels).
///
/// The origin is the bottom-left corner and y grows upward, matching the
/// renderer's mapping of particle translates into clip space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Preview window size used when no real window is available
    pub const PREVIEW: Self = Self {
        width: 800.0,
        height: 600.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if `(x, y)` lies within the viewport grown by `margin` on every side
    pub fn contains_with_margin(&self, x: f32, y: f32, margin: f32) -> bool {
        x >= -margin && x <= self.width + margin && y >= -margin && y <= self.height + margin
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::PREVIEW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_bounds_are_inclusive() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(vp.contains_with_margin(-50.0, -50.0, 50.0));
        assert!(vp.contains_with_margin(850.0, 650.0, 50.0));
        assert!(!vp.contains_with_margin(850.1, 0.0, 50.0));
        assert!(!vp.contains_with_margin(0.0, -50.1, 50.0));
    }

    #[test]
    fn deserializes_from_toml() {
        let vp: Viewport = toml::from_str("width = 1024.0\nheight = 768.0").unwrap();
        assert_eq!(vp, Viewport::new(1024.0, 768.0));
        assert_eq!(toml::to_string(&vp).unwrap(), "width = 1024.0\nheight = 768.0\n");
    }

    #[test]
    fn default_is_preview() {
        assert_eq!(Viewport::default(), Viewport::new(800.0, 600.0));
    }
}
