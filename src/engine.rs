use serde::Serialize;

use crate::config::NavConfig;
use crate::director::{CameraDirector, NavigationMode};
use crate::drag::DragController;
use crate::error::NavError;
use crate::geometry::{ContentBounds, PanBounds, Point, Viewport, home_transform, pan_bounds, zoom_about};
use crate::input::{Button, Key, WheelDelta};
use crate::registry::{ContentRegistry, Island, IslandId};
use crate::router::InputRouter;
use crate::transform::{Transform, TransformStore};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Effects returned from event handlers for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Apply this transform to the canvas element.
    TransformChanged(Transform),
    /// Show the detail view for this island.
    ShowDetail { id: IslandId },
    /// Hide the detail view.
    HideDetail,
    /// Change the viewport cursor (`grab`, `grabbing`).
    SetCursor { cursor: String },
    /// An animation is running; call `tick` on the next frame.
    FrameRequested,
}

/// What the detail-view renderer needs to know.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailView<'a> {
    pub visible: bool,
    pub island: Option<&'a Island>,
}

/// Core engine state: every navigation rule, with no host dependencies.
///
/// Owns the transform store, the drag controller and the camera director,
/// and hands each the geometry it needs. Separated from `Engine` so it can
/// be driven directly from tests.
#[derive(Debug, Clone)]
pub struct EngineCore {
    config: NavConfig,
    registry: ContentRegistry,
    viewport: Viewport,
    pan: PanBounds,
    store: TransformStore,
    drag: DragController,
    director: CameraDirector,
}

impl EngineCore {
    /// Build an engine parked on the registry's home island.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when `config` fails validation, `InvalidViewport` for
    /// a non-finite or non-positive viewport.
    pub fn new(registry: ContentRegistry, config: NavConfig, viewport: Viewport) -> Result<Self, NavError> {
        config.validate()?;
        if !viewport.is_usable() {
            return Err(NavError::InvalidViewport { width: viewport.width, height: viewport.height });
        }
        let home = home_transform(viewport, &registry.home().rect);
        let pan = home_pan_bounds(viewport, &registry, config.pan_padding, home);
        tracing::info!(
            islands = registry.len(),
            home = %registry.home_id(),
            width = viewport.width,
            height = viewport.height,
            "navigation engine ready"
        );
        Ok(Self {
            drag: DragController::new(&config),
            director: CameraDirector::new(&config),
            store: TransformStore::new(home),
            config,
            registry,
            viewport,
            pan,
        })
    }

    // --- Queries ---

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.store.read()
    }

    #[must_use]
    pub fn home(&self) -> Transform {
        self.store.home()
    }

    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.director.mode()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&IslandId> {
        self.director.selected()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    #[must_use]
    pub fn content_bounds(&self) -> ContentBounds {
        self.registry.bounds()
    }

    /// Pan bounds at scale 1.
    #[must_use]
    pub fn pan_bounds(&self) -> PanBounds {
        self.pan
    }

    /// Pan bounds for the content as it appears at `scale`.
    #[must_use]
    pub fn pan_bounds_at(&self, scale: f64) -> PanBounds {
        if (scale - 1.0).abs() < f64::EPSILON {
            return self.pan;
        }
        pan_bounds(self.viewport, &self.registry.bounds().scaled(scale), self.config.pan_padding)
    }

    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    #[must_use]
    pub fn director(&self) -> &CameraDirector {
        &self.director
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Detail view is visible exactly while an island is focused.
    #[must_use]
    pub fn detail_view(&self) -> DetailView<'_> {
        let island = self.director.selected().and_then(|id| self.registry.get(id));
        DetailView { visible: island.is_some(), island }
    }

    /// A tween or coast still needs frame ticks.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.director.is_animating() || self.drag.is_coasting()
    }

    /// Drag is enabled exactly in Home, and no drag gesture or coast runs
    /// alongside a scripted tween.
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        let home = self.director.mode() == NavigationMode::Home;
        let dragging = self.drag.is_dragging() || self.drag.is_coasting();
        home == self.drag.is_enabled() && !(dragging && self.director.is_animating())
    }

    // --- Camera ---

    /// Fly onto island `id`.
    ///
    /// # Errors
    ///
    /// `InvalidIslandReference` when `id` is not in the registry; the engine
    /// state is left untouched.
    pub fn zoom_in(&mut self, id: &IslandId, now_ms: f64) -> Result<Vec<Action>, NavError> {
        let island = match self.registry.require(id) {
            Ok(island) => island,
            Err(e) => {
                tracing::warn!(error = %e, "zoom-in rejected");
                return Err(e);
            }
        };
        Ok(self.director.zoom_in(island, self.viewport, now_ms, &self.store, &mut self.drag))
    }

    /// Fly home. A no-op unless focused.
    pub fn zoom_out(&mut self, now_ms: f64) -> Vec<Action> {
        self.director.zoom_out(now_ms, &self.store)
    }

    /// One discrete wheel step anchored at the screen point `anchor`.
    ///
    /// Negative `dy` zooms in, positive zooms out. The canvas point under
    /// the anchor stays put, the scale is clamped to the wheel range, and
    /// the translation to the pan bounds at the new scale. Only in Home.
    pub fn wheel_zoom(&mut self, anchor: Point, delta: WheelDelta, now_ms: f64) -> bool {
        if self.director.mode() != NavigationMode::Home || delta.dy == 0.0 || !delta.dy.is_finite() {
            return false;
        }
        let base = self.director.wheel_target().unwrap_or_else(|| self.store.read());
        let factor = if delta.dy < 0.0 { self.config.wheel_zoom_factor } else { self.config.wheel_zoom_factor.recip() };
        let scale = (base.scale * factor).clamp(self.config.wheel_min_scale, self.config.max_focus_scale);
        let zoomed = zoom_about(base, anchor, scale);
        let target = zoomed.with_translation(self.pan_bounds_at(scale).clamp(zoomed.translation()));
        self.drag.stop_inertia();
        self.director.wheel_zoom(target, now_ms, &self.store)
    }

    // --- Drag ---

    /// Start a drag at `pointer`. Stops any wheel tween first.
    pub fn begin_drag(&mut self, pointer: Point, now_ms: f64) -> bool {
        if !self.drag.is_enabled() {
            return false;
        }
        self.director.cancel_wheel();
        self.drag.begin(pointer, now_ms, &self.store)
    }

    pub fn drag_to(&mut self, pointer: Point, now_ms: f64) -> bool {
        let bounds = self.pan_bounds_at(self.store.read().scale);
        self.drag.update(pointer, now_ms, &bounds, &mut self.store)
    }

    pub fn end_drag(&mut self, pointer: Point, now_ms: f64) -> bool {
        let bounds = self.pan_bounds_at(self.store.read().scale);
        self.drag.end(pointer, now_ms, &bounds, &mut self.store)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    // --- Frames and resize ---

    /// Advance tweens and inertia to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        let actions = self.director.tick(now_ms, &mut self.store, &mut self.drag);
        if self.drag.is_coasting() {
            let bounds = self.pan_bounds_at(self.store.read().scale);
            self.drag.step(now_ms, &bounds, &mut self.store);
        }
        actions
    }

    /// Take a new viewport measurement.
    ///
    /// Pan bounds and the home transform are recomputed. In Home the live
    /// transform is clamped into the new bounds; otherwise the director
    /// re-aims its flight or re-frames the focused island. Unusable
    /// measurements (hidden element, NaN) are ignored.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        if !viewport.is_usable() {
            tracing::debug!(width = viewport.width, height = viewport.height, "unusable viewport ignored");
            return;
        }
        self.viewport = viewport;
        let home = home_transform(viewport, &self.registry.home().rect);
        self.pan = home_pan_bounds(viewport, &self.registry, self.config.pan_padding, home);
        self.store.rehome(home);
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport resized");

        if self.director.mode() == NavigationMode::Home {
            self.director.cancel_wheel();
            self.drag.stop_inertia();
            let current = self.store.read();
            let clamped = self.pan_bounds_at(current.scale).clamp(current.translation());
            if clamped != current.translation() {
                self.store.write(current.with_translation(clamped));
            }
        } else {
            self.director.refit(viewport, &self.registry, &mut self.store);
        }
    }
}

/// Pan bounds at scale 1, widened to cover `home` so the home transform is
/// always a resting position.
fn home_pan_bounds(viewport: Viewport, registry: &ContentRegistry, padding: f64, home: Transform) -> PanBounds {
    pan_bounds(viewport, &registry.bounds(), padding).including(home.translation())
}

/// The host-facing engine: the core plus input routing.
///
/// Every handler returns the actions to apply. A `TransformChanged` is
/// appended whenever the transform was written during the call, and
/// `FrameRequested` while an animation still needs ticks.
#[derive(Debug, Clone)]
pub struct Engine {
    pub core: EngineCore,
    router: InputRouter,
}

impl Engine {
    /// # Errors
    ///
    /// `InvalidConfig` when `config` fails validation.
    pub fn new(registry: ContentRegistry, config: NavConfig, viewport: Viewport) -> Result<Self, NavError> {
        let router = InputRouter::new(&config);
        Ok(Self { core: EngineCore::new(registry, config, viewport)?, router })
    }

    /// Build from a registry document and an optional config document.
    ///
    /// # Errors
    ///
    /// Any registry or config parse and validation failure.
    pub fn from_json(registry_json: &str, config_json: Option<&str>, viewport: Viewport) -> Result<Self, NavError> {
        let registry = ContentRegistry::from_json(registry_json)?;
        let config = match config_json {
            Some(raw) => NavConfig::from_json(raw)?,
            None => NavConfig::default(),
        };
        Self::new(registry, config, viewport)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        let rev = self.core.revision();
        let actions = self.router.pointer_down(&mut self.core, screen_pt, button, now_ms);
        self.settle(rev, actions)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        let rev = self.core.revision();
        let actions = self.router.pointer_move(&mut self.core, screen_pt, now_ms);
        self.settle(rev, actions)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        let rev = self.core.revision();
        let actions = self.router.pointer_up(&mut self.core, screen_pt, button, now_ms);
        self.settle(rev, actions)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        let rev = self.core.revision();
        let actions = self.router.pointer_cancel(&mut self.core);
        self.settle(rev, actions)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, now_ms: f64) -> Vec<Action> {
        let rev = self.core.revision();
        let actions = self.router.wheel(&mut self.core, screen_pt, delta, now_ms);
        self.settle(rev, actions)
    }

    pub fn on_key_down(&mut self, key: &Key, now_ms: f64) -> Vec<Action> {
        let rev = self.core.revision();
        let actions = self.router.key_down(&mut self.core, key, now_ms);
        self.settle(rev, actions)
    }

    /// An island element was clicked by a host that routes DOM clicks itself.
    ///
    /// # Errors
    ///
    /// `InvalidIslandReference` for an id the registry does not know.
    pub fn on_island_click(&mut self, id: &IslandId, now_ms: f64) -> Result<Vec<Action>, NavError> {
        let rev = self.core.revision();
        let actions = self.router.click_island(&mut self.core, id, now_ms)?;
        Ok(self.settle(rev, actions))
    }

    /// The viewport background was clicked.
    pub fn on_background_click(&mut self, now_ms: f64) -> Vec<Action> {
        let rev = self.core.revision();
        let actions = self.router.click_background(&mut self.core, now_ms);
        self.settle(rev, actions)
    }

    /// The detail view asked to be closed.
    pub fn dismiss_detail(&mut self, now_ms: f64) -> Vec<Action> {
        self.on_background_click(now_ms)
    }

    // --- Frames and viewport ---

    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        let rev = self.core.revision();
        let mut actions = self.core.tick(now_ms);
        actions.extend(self.router.after_tick(&mut self.core, now_ms));
        self.settle(rev, actions)
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        let rev = self.core.revision();
        self.core.set_viewport(Viewport::new(width, height));
        self.settle(rev, Vec::new())
    }

    // --- Queries ---

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.core.transform()
    }

    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.core.mode()
    }

    #[must_use]
    pub fn detail_view(&self) -> DetailView<'_> {
        self.core.detail_view()
    }

    fn settle(&self, rev: u64, mut actions: Vec<Action>) -> Vec<Action> {
        debug_assert!(self.core.is_exclusive(), "drag and camera flight overlap");
        if self.core.revision() != rev {
            actions.push(Action::TransformChanged(self.core.transform()));
        }
        if self.core.is_animating() {
            actions.push(Action::FrameRequested);
        }
        actions
    }
}
