//! `wasm-bindgen` surface for browser hosts.
//!
//! The page wires DOM events to these methods and applies the returned
//! actions, which are serialized as a JSON array of `{"type": ...}` objects.

use wasm_bindgen::prelude::*;

use crate::engine::{Action, Engine};
use crate::geometry::{Point, Viewport};
use crate::input::{Button, Key, WheelDelta};
use crate::registry::IslandId;

#[wasm_bindgen]
pub struct NavigatorHandle {
    engine: Engine,
}

#[wasm_bindgen]
impl NavigatorHandle {
    /// Build from the registry document, an optional config document and the
    /// measured viewport size.
    #[wasm_bindgen(constructor)]
    pub fn new(registry_json: &str, config_json: Option<String>, width: f64, height: f64) -> Result<NavigatorHandle, JsError> {
        let engine = Engine::from_json(registry_json, config_json.as_deref(), Viewport::new(width, height))
            .map_err(|e| JsError::new(&format!("{}: {e}", e.error_code())))?;
        Ok(Self { engine })
    }

    /// `button`: 0 primary, 1 middle, 2 secondary (DOM `MouseEvent.button`).
    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, now_ms: f64) -> Result<String, JsError> {
        encode(&self.engine.on_pointer_down(Point::new(x, y), dom_button(button), now_ms))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> Result<String, JsError> {
        encode(&self.engine.on_pointer_move(Point::new(x, y), now_ms))
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16, now_ms: f64) -> Result<String, JsError> {
        encode(&self.engine.on_pointer_up(Point::new(x, y), dom_button(button), now_ms))
    }

    pub fn pointer_cancel(&mut self) -> Result<String, JsError> {
        encode(&self.engine.on_pointer_cancel())
    }

    pub fn wheel(&mut self, x: f64, y: f64, dx: f64, dy: f64, now_ms: f64) -> Result<String, JsError> {
        encode(&self.engine.on_wheel(Point::new(x, y), WheelDelta { dx, dy }, now_ms))
    }

    pub fn key_down(&mut self, key: String, now_ms: f64) -> Result<String, JsError> {
        encode(&self.engine.on_key_down(&Key(key), now_ms))
    }

    pub fn island_click(&mut self, id: &str, now_ms: f64) -> Result<String, JsError> {
        let actions = self
            .engine
            .on_island_click(&IslandId::from(id), now_ms)
            .map_err(|e| JsError::new(&format!("{}: {e}", e.error_code())))?;
        encode(&actions)
    }

    pub fn background_click(&mut self, now_ms: f64) -> Result<String, JsError> {
        encode(&self.engine.on_background_click(now_ms))
    }

    pub fn dismiss_detail(&mut self, now_ms: f64) -> Result<String, JsError> {
        encode(&self.engine.dismiss_detail(now_ms))
    }

    pub fn tick(&mut self, now_ms: f64) -> Result<String, JsError> {
        encode(&self.engine.tick(now_ms))
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<String, JsError> {
        encode(&self.engine.set_viewport(width, height))
    }

    /// Current canvas transform as a CSS `transform` value.
    pub fn css_transform(&self) -> String {
        self.engine.transform().css()
    }

    /// Metadata of the focused island as JSON, or `null`.
    pub fn detail_metadata(&self) -> Result<String, JsError> {
        let meta = self.engine.detail_view().island.map(|island| &island.metadata);
        serde_json::to_string(&meta).map_err(|e| JsError::new(&e.to_string()))
    }
}

fn dom_button(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

fn encode(actions: &[Action]) -> Result<String, JsError> {
    serde_json::to_string(actions).map_err(|e| JsError::new(&e.to_string()))
}
