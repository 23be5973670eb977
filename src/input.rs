//! Input model: mouse buttons, keys, wheel deltas, and the press state machine.
//!
//! `Press` is the gesture tracked between pointer-down and pointer-up. It
//! carries what the router needs to decide, on release, whether the press
//! was a click on its target or the end of a drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;
use crate::registry::IslandId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as named by the browser (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, zooms out).
    pub dy: f64,
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Press {
    /// No primary button held.
    #[default]
    Idle,
    /// Primary button held since `origin`.
    Down {
        /// Screen position of the pointer-down.
        origin: Point,
        /// Island under the pointer at pointer-down, if any.
        target: Option<IslandId>,
        /// The pointer has travelled past the click slop; release is not a click.
        dragged: bool,
    },
}
