//! Spatial navigation engine for a canvas of content islands.
//!
//! The engine owns the canvas transform that a host page applies to its
//! island layer. It turns raw pointer, wheel and key input into drag panning
//! with boundary resistance and release inertia, and into scripted camera
//! flights that zoom onto an island (showing its detail view) and back home.
//! Rendering stays with the host: it forwards DOM events and frame ticks into
//! [`engine::Engine`] and applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine, testable [`engine::EngineCore`], host actions |
//! | [`router`] | Input routing and click-vs-drag arbitration |
//! | [`director`] | Camera state machine and scripted zoom flights |
//! | [`drag`] | Drag panning, resistance and inertia |
//! | [`transform`] | Canvas transform and its store |
//! | [`geometry`] | Pure bounds and camera-fit math |
//! | [`anim`] | Easing curves and transform tweens |
//! | [`registry`] | Island content registry and validation |
//! | [`hit`] | Screen-point hit-testing against islands |
//! | [`input`] | Input event value types |
//! | [`config`] | Navigation tunables |
//! | [`error`] | Error type shared by the crate |
//! | [`consts`] | Default numeric constants |

pub mod anim;
pub mod config;
pub mod consts;
pub mod director;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod registry;
pub mod router;
pub mod transform;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::NavConfig;
pub use engine::{Action, Engine, EngineCore};
pub use error::NavError;
pub use geometry::{Point, Rect, Viewport};
pub use registry::{ContentRegistry, Island, IslandId};
pub use transform::Transform;
