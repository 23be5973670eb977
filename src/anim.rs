//! Easing curves and frame-clock driven transform tweens.

#[cfg(test)]
#[path = "anim_test.rs"]
mod anim_test;

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Progress curve applied to a tween's normalized time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Map `t` in `[0, 1]` to eased progress in `[0, 1]`. Inputs outside the
    /// range are clamped first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// A fixed-duration interpolation between two transforms.
///
/// Time is supplied by the caller in milliseconds, so a tween is advanced by
/// sampling it from frame ticks rather than by running on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Transform,
    to: Transform,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(from: Transform, to: Transform, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self { from, to, start_ms, duration_ms: duration_ms.max(0.0), easing }
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Transform at `now_ms`. Returns the exact destination once finished.
    #[must_use]
    pub fn sample(&self, now_ms: f64) -> Transform {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, self.easing.apply(p))
    }

    #[must_use]
    pub fn target(&self) -> Transform {
        self.to
    }

    /// Move the destination without restarting the clock.
    pub fn retarget(&mut self, to: Transform) {
        self.to = to;
    }
}
