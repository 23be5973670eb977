//! Input routing: raw viewport events to drag and camera requests.
//!
//! A press that travels less than the click slop is a click on whatever was
//! under the pointer at pointer-down: an island asks for a zoom-in, the
//! background for a zoom-out. A press that travels further is a drag and
//! its release is never a click. Each press has exactly one target, which
//! keeps an island click from also counting as a background click.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::config::{NavConfig, RefocusPolicy};
use crate::director::NavigationMode;
use crate::engine::{Action, EngineCore};
use crate::error::NavError;
use crate::geometry::Point;
use crate::hit::{HitTarget, hit_test};
use crate::input::{Button, Key, Press, WheelDelta};
use crate::registry::IslandId;

const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";

#[derive(Debug, Clone)]
pub struct InputRouter {
    press: Press,
    pending_focus: Option<IslandId>,
    click_slop_px: f64,
    refocus: RefocusPolicy,
}

impl InputRouter {
    #[must_use]
    pub fn new(config: &NavConfig) -> Self {
        Self {
            press: Press::Idle,
            pending_focus: None,
            click_slop_px: config.click_slop_px,
            refocus: config.refocus,
        }
    }

    #[must_use]
    pub fn press(&self) -> &Press {
        &self.press
    }

    /// Island to fly into once the camera is back home.
    #[must_use]
    pub fn pending_focus(&self) -> Option<&IslandId> {
        self.pending_focus.as_ref()
    }

    pub fn pointer_down(&mut self, core: &mut EngineCore, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let target = match hit_test(core.registry(), &core.transform(), screen_pt) {
            HitTarget::Island(island) => Some(island.id.clone()),
            HitTarget::Background => None,
        };
        self.press = Press::Down { origin: screen_pt, target, dragged: false };

        if core.mode() == NavigationMode::Home && core.begin_drag(screen_pt, now_ms) {
            return vec![cursor(CURSOR_GRABBING)];
        }
        Vec::new()
    }

    pub fn pointer_move(&mut self, core: &mut EngineCore, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        let Press::Down { origin, dragged, .. } = &mut self.press else {
            return Vec::new();
        };
        if !*dragged && origin.distance_to(screen_pt) > self.click_slop_px {
            *dragged = true;
        }
        core.drag_to(screen_pt, now_ms);
        Vec::new()
    }

    pub fn pointer_up(&mut self, core: &mut EngineCore, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Press::Down { target, dragged, .. } = std::mem::take(&mut self.press) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        if core.drag().is_dragging() {
            core.end_drag(screen_pt, now_ms);
            actions.push(cursor(CURSOR_GRAB));
        }
        if dragged {
            return actions;
        }

        match target {
            Some(id) => match self.click_island(core, &id, now_ms) {
                Ok(more) => actions.extend(more),
                Err(e) => tracing::warn!(error = %e, "click on stale island ignored"),
            },
            None => actions.extend(self.click_background(core, now_ms)),
        }
        actions
    }

    pub fn pointer_cancel(&mut self, core: &mut EngineCore) -> Vec<Action> {
        self.press = Press::Idle;
        if core.drag().is_dragging() {
            core.cancel_drag();
            return vec![cursor(CURSOR_GRAB)];
        }
        Vec::new()
    }

    /// One wheel event. Ignored mid-drag so only one writer moves the canvas.
    pub fn wheel(&mut self, core: &mut EngineCore, screen_pt: Point, delta: WheelDelta, now_ms: f64) -> Vec<Action> {
        if core.drag().is_dragging() {
            return Vec::new();
        }
        core.wheel_zoom(screen_pt, delta, now_ms);
        Vec::new()
    }

    pub fn key_down(&mut self, core: &mut EngineCore, key: &Key, now_ms: f64) -> Vec<Action> {
        if key.is_escape() {
            self.pending_focus = None;
            return core.zoom_out(now_ms);
        }
        Vec::new()
    }

    /// Route a click on island `id` according to the current mode.
    ///
    /// Home zooms in. A different island while focused follows the
    /// configured [`RefocusPolicy`]. Mid-flight clicks are dropped.
    ///
    /// # Errors
    ///
    /// `InvalidIslandReference` when `id` is unknown.
    pub fn click_island(&mut self, core: &mut EngineCore, id: &IslandId, now_ms: f64) -> Result<Vec<Action>, NavError> {
        self.pending_focus = None;
        match core.mode() {
            NavigationMode::Home => core.zoom_in(id, now_ms),
            NavigationMode::Transitioning => {
                core.registry().require(id)?;
                tracing::debug!(island = %id, "click dropped mid-flight");
                Ok(Vec::new())
            }
            NavigationMode::Focused => {
                core.registry().require(id)?;
                if core.selected() == Some(id) {
                    return Ok(Vec::new());
                }
                match self.refocus {
                    RefocusPolicy::Block => {
                        tracing::debug!(island = %id, "refocus blocked while focused");
                        Ok(Vec::new())
                    }
                    RefocusPolicy::ZoomOutThenIn => {
                        self.pending_focus = Some(id.clone());
                        Ok(core.zoom_out(now_ms))
                    }
                }
            }
        }
    }

    /// A click on empty viewport always asks for home; Home absorbs it.
    pub fn click_background(&mut self, core: &mut EngineCore, now_ms: f64) -> Vec<Action> {
        self.pending_focus = None;
        core.zoom_out(now_ms)
    }

    /// Dispatch a deferred refocus once the camera has landed home.
    pub fn after_tick(&mut self, core: &mut EngineCore, now_ms: f64) -> Vec<Action> {
        if core.mode() != NavigationMode::Home {
            return Vec::new();
        }
        let Some(id) = self.pending_focus.take() else {
            return Vec::new();
        };
        match core.zoom_in(&id, now_ms) {
            Ok(actions) => actions,
            Err(e) => {
                tracing::warn!(error = %e, "deferred refocus dropped");
                Vec::new()
            }
        }
    }
}

fn cursor(name: &str) -> Action {
    Action::SetCursor { cursor: name.to_string() }
}
