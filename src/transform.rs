#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Canvas transform: translate by `(x, y)` then scale uniformly.
///
/// The origin is the canvas' own top-left corner, so a canvas point `p`
/// lands on screen at `p * scale + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

impl Transform {
    #[must_use]
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// The translation component as a point.
    #[must_use]
    pub fn translation(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same scale, new translation.
    #[must_use]
    pub fn with_translation(&self, t: Point) -> Self {
        Self { x: t.x, y: t.y, scale: self.scale }
    }

    /// Convert a screen-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point { x: (screen.x - self.x) / self.scale, y: (screen.y - self.y) / self.scale }
    }

    /// Convert a canvas point to screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point { x: canvas.x * self.scale + self.x, y: canvas.y * self.scale + self.y }
    }

    /// Component-wise linear interpolation; `t = 0` is `self`, `t = 1` is `to`.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }

    /// CSS `transform` value for an element with `transform-origin: 0 0`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.x, self.y, self.scale)
    }
}

/// Sole owner of the live canvas transform and the cached home transform.
///
/// Writes are unconditional; clamping belongs to the callers. Every write
/// bumps [`TransformStore::revision`] so the engine can report changes.
#[derive(Debug, Clone)]
pub struct TransformStore {
    live: Transform,
    home: Transform,
    revision: u64,
}

impl TransformStore {
    /// Start at `home`.
    #[must_use]
    pub fn new(home: Transform) -> Self {
        Self { live: home, home, revision: 0 }
    }

    #[must_use]
    pub fn read(&self) -> Transform {
        self.live
    }

    pub fn write(&mut self, t: Transform) {
        self.live = t;
        self.revision = self.revision.wrapping_add(1);
    }

    #[must_use]
    pub fn home(&self) -> Transform {
        self.home
    }

    /// Replace the home transform after a viewport change.
    pub(crate) fn rehome(&mut self, home: Transform) {
        self.home = home;
    }

    /// Number of writes so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
