//! Drag panning with boundary resistance and release inertia.
//!
//! A gesture starts on pointer-down, follows the pointer 1:1 inside the pan
//! bounds and with growing resistance outside them, and on release settles
//! back into the bounds and coasts on its exit velocity. The coast is an
//! [`Inertia`] task stepped from frame ticks; its length depends on the
//! velocity, so it is a repeating task rather than a fixed-length tween.
//!
//! The camera director switches the controller off before any scripted
//! flight. Disabling drops both the gesture and the coast on the spot, so
//! nothing from an earlier drag writes the transform afterwards.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::collections::VecDeque;

use crate::config::NavConfig;
use crate::geometry::{PanBounds, Point};
use crate::transform::{Transform, TransformStore};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    t_ms: f64,
    pointer: Point,
}

#[derive(Debug, Clone)]
struct Gesture {
    origin: Point,
    start: Transform,
    samples: VecDeque<Sample>,
}

/// Post-release coast: velocity in pixels per millisecond, decaying
/// exponentially from the last step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inertia {
    pub vx: f64,
    pub vy: f64,
    last_ms: f64,
}

impl Inertia {
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

#[derive(Debug, Clone)]
pub struct DragController {
    enabled: bool,
    gesture: Option<Gesture>,
    inertia: Option<Inertia>,
    resistance: f64,
    resistance_span: f64,
    velocity_window_ms: f64,
    time_constant_ms: f64,
    min_speed: f64,
}

impl DragController {
    /// A controller tuned by `config`, initially enabled.
    #[must_use]
    pub fn new(config: &NavConfig) -> Self {
        Self {
            enabled: true,
            gesture: None,
            inertia: None,
            resistance: config.drag_resistance,
            resistance_span: config.pan_padding,
            velocity_window_ms: config.velocity_window_ms,
            time_constant_ms: config.inertia_time_constant_ms,
            min_speed: config.inertia_min_speed,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop accepting input and drop any live gesture or coast.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.cancel();
    }

    /// Drop the live gesture and any coast without touching the transform.
    pub fn cancel(&mut self) {
        if self.gesture.take().is_some() {
            tracing::debug!("drag gesture cancelled");
        }
        self.inertia = None;
    }

    /// Drop only the coast; a live gesture continues.
    pub fn stop_inertia(&mut self) {
        self.inertia = None;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A pointer is currently dragging the canvas.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// A post-release coast is still running.
    #[must_use]
    pub fn is_coasting(&self) -> bool {
        self.inertia.is_some()
    }

    #[must_use]
    pub fn inertia(&self) -> Option<Inertia> {
        self.inertia
    }

    /// Start a gesture at `pointer`. Returns `false` when disabled.
    pub fn begin(&mut self, pointer: Point, now_ms: f64, store: &TransformStore) -> bool {
        if !self.enabled {
            return false;
        }
        self.inertia = None;
        let mut samples = VecDeque::new();
        samples.push_back(Sample { t_ms: now_ms, pointer });
        self.gesture = Some(Gesture { origin: pointer, start: store.read(), samples });
        true
    }

    /// Follow the pointer. Returns `true` when the transform was written.
    pub fn update(&mut self, pointer: Point, now_ms: f64, bounds: &PanBounds, store: &mut TransformStore) -> bool {
        let (resistance, span, window) = (self.resistance, self.resistance_span, self.velocity_window_ms);
        let Some(g) = self.gesture.as_mut() else {
            return false;
        };
        let raw = Point::new(g.start.x + (pointer.x - g.origin.x), g.start.y + (pointer.y - g.origin.y));
        let next = bounds.resist(raw, resistance, span);
        store.write(g.start.with_translation(next));
        record_sample(&mut g.samples, Sample { t_ms: now_ms, pointer }, window);
        true
    }

    /// Finish the gesture: settle into `bounds` and start coasting if the
    /// pointer left fast enough. Returns `true` when the transform was written.
    pub fn end(&mut self, pointer: Point, now_ms: f64, bounds: &PanBounds, store: &mut TransformStore) -> bool {
        let Some(mut g) = self.gesture.take() else {
            return false;
        };
        record_sample(&mut g.samples, Sample { t_ms: now_ms, pointer }, self.velocity_window_ms);

        let current = store.read();
        let settled = bounds.clamp(current.translation());
        let wrote = if settled == current.translation() {
            false
        } else {
            store.write(current.with_translation(settled));
            true
        };

        let (vx, vy) = estimate_velocity(&g.samples);
        if vx.hypot(vy) >= self.min_speed {
            tracing::debug!(vx, vy, "drag released into inertia");
            self.inertia = Some(Inertia { vx, vy, last_ms: now_ms });
        }
        wrote
    }

    /// Advance the coast to `now_ms`. Returns `true` when the transform was written.
    ///
    /// Displacement over a step of `dt` is `v * tau * (1 - e^(-dt/tau))`, the
    /// exact integral of the decaying velocity, so the path does not depend
    /// on the frame rate. The position is hard-clamped every step and the
    /// velocity on a clamped axis is dropped.
    pub fn step(&mut self, now_ms: f64, bounds: &PanBounds, store: &mut TransformStore) -> bool {
        let tau = self.time_constant_ms;
        let Some(mut inertia) = self.inertia else {
            return false;
        };
        let dt = now_ms - inertia.last_ms;
        if dt <= 0.0 {
            return false;
        }

        let decay = (-dt / tau).exp();
        let travel = tau * (1.0 - decay);
        let current = store.read();
        let raw = Point::new(current.x + inertia.vx * travel, current.y + inertia.vy * travel);
        let next = bounds.clamp(raw);

        let clamped_x = raw.x < bounds.min_x || raw.x > bounds.max_x;
        let clamped_y = raw.y < bounds.min_y || raw.y > bounds.max_y;
        inertia.vx = if clamped_x { 0.0 } else { inertia.vx * decay };
        inertia.vy = if clamped_y { 0.0 } else { inertia.vy * decay };
        inertia.last_ms = now_ms;

        store.write(current.with_translation(next));
        self.inertia = if inertia.speed() < self.min_speed { None } else { Some(inertia) };
        true
    }
}

fn record_sample(samples: &mut VecDeque<Sample>, sample: Sample, window_ms: f64) {
    samples.push_back(sample);
    while samples.len() > 1 && samples.front().is_some_and(|s| sample.t_ms - s.t_ms > window_ms) {
        samples.pop_front();
    }
}

/// Average pointer velocity across the retained samples, in px/ms.
fn estimate_velocity(samples: &VecDeque<Sample>) -> (f64, f64) {
    let (Some(first), Some(last)) = (samples.front(), samples.back()) else {
        return (0.0, 0.0);
    };
    let dt = last.t_ms - first.t_ms;
    if dt <= 0.0 {
        return (0.0, 0.0);
    }
    ((last.pointer.x - first.pointer.x) / dt, (last.pointer.y - first.pointer.y) / dt)
}
