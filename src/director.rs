//! Camera director: the navigation state machine and its scripted flights.
//!
//! ```text
//!   Home ──zoom_in(I)──▶ Transitioning ──done──▶ Focused(I)
//!    ▲                                               │
//!    └──────done── Transitioning ◀──zoom_out─────────┘
//! ```
//!
//! The drag controller is switched off before a zoom-in starts and back on
//! only once a zoom-out lands, so a live drag and a scripted flight never
//! write the transform at the same time. Requests that arrive mid-flight are
//! dropped, not queued. The selected island lives inside the `Focused`
//! phase and cannot outlive it.

#[cfg(test)]
#[path = "director_test.rs"]
mod director_test;

use crate::anim::{Easing, Tween};
use crate::config::NavConfig;
use crate::drag::DragController;
use crate::engine::Action;
use crate::geometry::{Viewport, focus_transform};
use crate::registry::{ContentRegistry, Island, IslandId};
use crate::transform::{Transform, TransformStore};

/// Which of the three navigation modes the camera is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Free panning; detail view hidden.
    Home,
    /// A scripted flight is running; input is ignored.
    Transitioning,
    /// Parked on the selected island; detail view shown.
    Focused,
}

#[derive(Debug, Clone, PartialEq)]
enum Destination {
    Focus(IslandId),
    Home,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Home,
    Transitioning { tween: Tween, destination: Destination },
    Focused { island: IslandId },
}

#[derive(Debug, Clone)]
pub struct CameraDirector {
    phase: Phase,
    wheel: Option<Tween>,
    padding_ratio: f64,
    max_scale: f64,
    duration_ms: f64,
    easing: Easing,
    wheel_duration_ms: f64,
}

impl CameraDirector {
    #[must_use]
    pub fn new(config: &NavConfig) -> Self {
        Self {
            phase: Phase::Home,
            wheel: None,
            padding_ratio: config.focus_padding_ratio,
            max_scale: config.max_focus_scale,
            duration_ms: config.zoom_duration_ms,
            easing: config.zoom_easing,
            wheel_duration_ms: config.wheel_duration_ms,
        }
    }

    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        match self.phase {
            Phase::Home => NavigationMode::Home,
            Phase::Transitioning { .. } => NavigationMode::Transitioning,
            Phase::Focused { .. } => NavigationMode::Focused,
        }
    }

    /// The focused island. `Some` only in [`NavigationMode::Focused`].
    #[must_use]
    pub fn selected(&self) -> Option<&IslandId> {
        match &self.phase {
            Phase::Focused { island } => Some(island),
            _ => None,
        }
    }

    /// A flight or wheel tween is writing the transform.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. }) || self.wheel.is_some()
    }

    /// Where the running wheel tween will land, if one is running.
    #[must_use]
    pub fn wheel_target(&self) -> Option<Transform> {
        self.wheel.map(|w| w.target())
    }

    /// Transform that frames `island` in `viewport`.
    #[must_use]
    pub fn focus_target(&self, viewport: Viewport, island: &Island) -> Transform {
        focus_transform(viewport, &island.rect, self.padding_ratio, self.max_scale)
    }

    /// Start flying onto `island`. Ignored unless in Home.
    pub fn zoom_in(
        &mut self,
        island: &Island,
        viewport: Viewport,
        now_ms: f64,
        store: &TransformStore,
        drag: &mut DragController,
    ) -> Vec<Action> {
        if self.phase != Phase::Home {
            tracing::debug!(island = %island.id, mode = ?self.mode(), "zoom-in ignored");
            return Vec::new();
        }
        drag.disable();
        self.wheel = None;
        let target = self.focus_target(viewport, island);
        self.phase = Phase::Transitioning {
            tween: Tween::new(store.read(), target, now_ms, self.duration_ms, self.easing),
            destination: Destination::Focus(island.id.clone()),
        };
        tracing::info!(island = %island.id, scale = target.scale, "zooming in");
        Vec::new()
    }

    /// Start flying home. Ignored unless Focused.
    pub fn zoom_out(&mut self, now_ms: f64, store: &TransformStore) -> Vec<Action> {
        let Phase::Focused { island } = &self.phase else {
            tracing::debug!(mode = ?self.mode(), "zoom-out ignored");
            return Vec::new();
        };
        tracing::info!(island = %island, "zooming out");
        self.phase = Phase::Transitioning {
            tween: Tween::new(store.read(), store.home(), now_ms, self.duration_ms, self.easing),
            destination: Destination::Home,
        };
        vec![Action::HideDetail]
    }

    /// Start a short tween to `target`. Ignored unless in Home.
    pub fn wheel_zoom(&mut self, target: Transform, now_ms: f64, store: &TransformStore) -> bool {
        if self.phase != Phase::Home {
            return false;
        }
        self.wheel = Some(Tween::new(store.read(), target, now_ms, self.wheel_duration_ms, Easing::EaseOutCubic));
        true
    }

    /// Stop a running wheel tween where it is.
    pub fn cancel_wheel(&mut self) {
        self.wheel = None;
    }

    /// Advance whichever tween is running and land the flight when done.
    pub fn tick(&mut self, now_ms: f64, store: &mut TransformStore, drag: &mut DragController) -> Vec<Action> {
        if let Some(wheel) = self.wheel {
            store.write(wheel.sample(now_ms));
            if wheel.is_finished(now_ms) {
                self.wheel = None;
            }
        }

        let Phase::Transitioning { tween, destination } = &self.phase else {
            return Vec::new();
        };
        store.write(tween.sample(now_ms));
        if !tween.is_finished(now_ms) {
            return Vec::new();
        }

        match destination.clone() {
            Destination::Focus(island) => {
                tracing::info!(island = %island, "focused");
                self.phase = Phase::Focused { island: island.clone() };
                vec![Action::ShowDetail { id: island }]
            }
            Destination::Home => {
                tracing::info!("home");
                self.phase = Phase::Home;
                drag.enable();
                Vec::new()
            }
        }
    }

    /// Re-aim the camera after a viewport change.
    ///
    /// Focused re-frames the selected island on the spot; a running flight
    /// keeps its clock and lands on the re-computed destination. Home is
    /// left to the caller, which re-clamps against the new pan bounds.
    pub fn refit(&mut self, viewport: Viewport, registry: &ContentRegistry, store: &mut TransformStore) {
        let padding_ratio = self.padding_ratio;
        let max_scale = self.max_scale;
        let fit = |id: &IslandId| {
            registry
                .get(id)
                .map(|island| focus_transform(viewport, &island.rect, padding_ratio, max_scale))
        };
        match &mut self.phase {
            Phase::Home => {}
            Phase::Focused { island } => {
                if let Some(t) = fit(&*island) {
                    store.write(t);
                }
            }
            Phase::Transitioning { tween, destination } => {
                let target = match destination {
                    Destination::Focus(island) => fit(&*island),
                    Destination::Home => Some(store.home()),
                };
                if let Some(t) = target {
                    tween.retarget(t);
                }
            }
        }
    }
}
