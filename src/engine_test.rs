#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use super::*;
use crate::geometry::Rect;

// =============================================================
// Helpers
// =============================================================

const EMPTY_SCREEN: Point = Point { x: 800.0, y: 200.0 };

fn registry() -> ContentRegistry {
    ContentRegistry::new(
        vec![
            Island::new("welcome", Rect::new(0.0, 0.0, 200.0, 150.0)),
            Island::new("project-1", Rect::new(500.0, 500.0, 300.0, 200.0))
                .with_metadata(json!({ "title": "Tide Tables" })),
            Island::new("about", Rect::new(-400.0, 200.0, 250.0, 180.0)),
            Island::new("contact", Rect::new(300.0, -350.0, 220.0, 120.0)),
        ],
        IslandId::new("welcome"),
    )
    .unwrap()
}

fn engine() -> Engine {
    Engine::new(registry(), NavConfig::default(), Viewport::new(1000.0, 800.0)).unwrap()
}

fn id(s: &str) -> IslandId {
    IslandId::new(s)
}

fn project_focus() -> Transform {
    let s = 800.0 / 300.0;
    Transform::new(500.0 - 650.0 * s, 400.0 - 600.0 * s, s)
}

fn close(a: Transform, b: Transform) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9 && (a.scale - b.scale).abs() < 1e-12
}

/// Tick at 16 ms frames from `from_ms` until nothing animates. Returns the
/// time of the last tick.
fn run_frames(engine: &mut Engine, from_ms: f64) -> f64 {
    let mut now = from_ms;
    for _ in 0..10_000 {
        if !engine.core.is_animating() {
            return now;
        }
        now += 16.0;
        engine.tick(now);
    }
    unreachable!("animation never settled");
}

fn focus(engine: &mut Engine, island: &str) -> f64 {
    engine.on_island_click(&id(island), 0.0).unwrap();
    let t = run_frames(engine, 0.0);
    assert_eq!(engine.mode(), NavigationMode::Focused);
    t
}

// =============================================================
// Construction
// =============================================================

#[test]
fn starts_centred_on_home_island() {
    let e = engine();
    assert_eq!(e.transform(), Transform::new(400.0, 325.0, 1.0));
    assert_eq!(e.core.home(), e.transform());
    assert_eq!(e.mode(), NavigationMode::Home);
    assert!(e.core.drag().is_enabled());
    assert!(!e.detail_view().visible);
}

#[test]
fn pan_bounds_follow_content() {
    let e = engine();
    let b = e.core.pan_bounds();
    assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (100.0, 500.0, 0.0, 450.0));
    assert!(b.contains(e.transform().translation()));
    assert_eq!(e.core.pan_bounds_at(1.0), b);
}

#[test]
fn invalid_config_is_rejected() {
    let config = NavConfig { focus_padding_ratio: 0.0, ..NavConfig::default() };
    let err = Engine::new(registry(), config, Viewport::new(1000.0, 800.0)).unwrap_err();
    assert_eq!(err.error_code(), "E_INVALID_CONFIG");
}

#[test]
fn from_json_with_config_overrides() {
    let registry = r#"{
        "home": "a",
        "islands": [
            { "id": "a", "rect": { "left": 0, "top": 0, "width": 100, "height": 100 } },
            { "id": "b", "rect": { "left": 400, "top": 0, "width": 100, "height": 100 } }
        ]
    }"#;
    let e = Engine::from_json(registry, Some(r#"{"zoomDurationMs": 200, "refocus": "block"}"#), Viewport::new(800.0, 600.0))
        .unwrap();
    assert_eq!(e.core.config().zoom_duration_ms, 200.0);
    assert_eq!(e.transform(), Transform::new(350.0, 250.0, 1.0));
    assert!(Engine::from_json(registry, Some("{"), Viewport::new(800.0, 600.0)).is_err());
}

// =============================================================
// Zoom flights
// =============================================================

#[test]
fn island_click_flies_to_focus_and_shows_detail() {
    let mut e = engine();
    let actions = e.on_island_click(&id("project-1"), 0.0).unwrap();
    assert_eq!(actions, vec![Action::FrameRequested]);
    assert_eq!(e.mode(), NavigationMode::Transitioning);

    let mid = e.tick(400.0);
    assert!(matches!(mid[0], Action::TransformChanged(_)));
    assert_eq!(mid.last(), Some(&Action::FrameRequested));

    let done = e.tick(800.0);
    assert_eq!(done[0], Action::ShowDetail { id: id("project-1") });
    assert!(matches!(done[1], Action::TransformChanged(t) if close(t, project_focus())));
    assert_eq!(done.len(), 2);

    let view = e.detail_view();
    assert!(view.visible);
    assert_eq!(view.island.and_then(|i| i.meta().title()), Some("Tide Tables"));
}

#[test]
fn detail_hidden_mid_flight() {
    let mut e = engine();
    e.on_island_click(&id("project-1"), 0.0).unwrap();
    e.tick(100.0);
    assert!(!e.detail_view().visible);
}

#[test]
fn zoom_out_in_home_is_idempotent() {
    let mut e = engine();
    let rev = e.core.revision();
    assert!(e.on_background_click(0.0).is_empty());
    assert!(e.on_key_down(&Key("Escape".into()), 10.0).is_empty());
    assert!(e.core.zoom_out(20.0).is_empty());
    assert_eq!(e.core.revision(), rev);
    assert_eq!(e.mode(), NavigationMode::Home);
}

#[test]
fn round_trip_returns_exactly_home() {
    let mut e = engine();
    let t = focus(&mut e, "about");
    let actions = e.dismiss_detail(t);
    assert_eq!(actions, vec![Action::HideDetail, Action::FrameRequested]);
    run_frames(&mut e, t);
    assert_eq!(e.mode(), NavigationMode::Home);
    assert_eq!(e.transform(), Transform::new(400.0, 325.0, 1.0));
    assert!(e.core.drag().is_enabled());
}

#[test]
fn unknown_island_leaves_state_untouched() {
    let mut e = engine();
    let err = e.on_island_click(&id("ghost"), 0.0).unwrap_err();
    assert_eq!(err.error_code(), "E_INVALID_ISLAND_REFERENCE");
    assert_eq!(e.mode(), NavigationMode::Home);
    assert_eq!(e.core.revision(), 0);
}

#[test]
fn tick_when_idle_emits_nothing() {
    let mut e = engine();
    assert!(e.tick(16.0).is_empty());
}

// =============================================================
// Mutual exclusion
// =============================================================

#[test]
fn pointer_input_mid_flight_never_writes() {
    let mut e = engine();
    e.on_island_click(&id("project-1"), 0.0).unwrap();
    e.tick(200.0);
    let rev = e.core.revision();
    e.on_pointer_down(EMPTY_SCREEN, Button::Primary, 210.0);
    e.on_pointer_move(Point::new(600.0, 300.0), 220.0);
    e.on_pointer_up(Point::new(600.0, 300.0), Button::Primary, 230.0);
    e.on_wheel(EMPTY_SCREEN, WheelDelta { dx: 0.0, dy: -100.0 }, 240.0);
    assert_eq!(e.core.revision(), rev);
    assert!(!e.core.drag().is_dragging());
    assert!(e.core.is_exclusive());
}

#[test]
fn live_drag_is_cut_by_zoom_in() {
    let mut e = engine();
    e.on_pointer_down(EMPTY_SCREEN, Button::Primary, 0.0);
    e.on_pointer_move(Point::new(760.0, 200.0), 16.0);
    assert!(e.core.drag().is_dragging());
    e.on_island_click(&id("about"), 20.0).unwrap();
    assert!(!e.core.drag().is_dragging());
    assert!(!e.core.drag().is_enabled());
    let rev = e.core.revision();
    e.on_pointer_move(Point::new(700.0, 200.0), 30.0);
    assert_eq!(e.core.revision(), rev);
    assert!(e.core.is_exclusive());
}

#[test]
fn coast_is_cut_by_zoom_in() {
    let mut e = engine();
    e.on_pointer_down(EMPTY_SCREEN, Button::Primary, 0.0);
    for i in 1..=3 {
        let t = f64::from(i) * 16.0;
        e.on_pointer_move(Point::new(EMPTY_SCREEN.x - t, EMPTY_SCREEN.y), t);
    }
    e.on_pointer_up(Point::new(EMPTY_SCREEN.x - 64.0, EMPTY_SCREEN.y), Button::Primary, 64.0);
    assert!(e.core.drag().is_coasting());
    e.on_island_click(&id("about"), 70.0).unwrap();
    assert!(!e.core.drag().is_coasting());
    run_frames(&mut e, 70.0);
    assert_eq!(e.core.selected(), Some(&id("about")));
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_pans_and_reports_cursor() {
    let mut e = engine();
    let down = e.on_pointer_down(EMPTY_SCREEN, Button::Primary, 0.0);
    assert_eq!(down, vec![Action::SetCursor { cursor: "grabbing".into() }]);
    let moved = e.on_pointer_move(Point::new(750.0, 230.0), 16.0);
    assert_eq!(moved, vec![Action::TransformChanged(Transform::new(350.0, 355.0, 1.0))]);
    let up = e.on_pointer_up(Point::new(750.0, 230.0), Button::Primary, 400.0);
    assert_eq!(up, vec![Action::SetCursor { cursor: "grab".into() }]);
    assert_eq!(e.mode(), NavigationMode::Home);
}

#[test]
fn flick_past_edge_comes_to_rest_inside_bounds() {
    let mut e = engine();
    e.on_pointer_down(EMPTY_SCREEN, Button::Primary, 0.0);
    let mut x = EMPTY_SCREEN.x;
    for i in 1..=10 {
        x += 20.0;
        e.on_pointer_move(Point::new(x, EMPTY_SCREEN.y), f64::from(i) * 16.0);
    }
    assert!(e.transform().x > e.core.pan_bounds().max_x);
    e.on_pointer_up(Point::new(x, EMPTY_SCREEN.y), Button::Primary, 176.0);
    assert!(e.core.pan_bounds().contains(e.transform().translation()));
    run_frames(&mut e, 176.0);
    assert_eq!(e.transform().x, e.core.pan_bounds().max_x);
}

#[test]
fn random_sessions_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x15_1a_4d);
    for _ in 0..50 {
        let mut e = engine();
        let mut now = 0.0;
        let mut pointer = EMPTY_SCREEN;
        for _ in 0..120 {
            now += rng.random_range(1.0..40.0);
            match rng.random_range(0..8) {
                0 => {
                    e.on_pointer_down(pointer, Button::Primary, now);
                }
                1 | 2 => {
                    pointer = Point::new(pointer.x + rng.random_range(-80.0..80.0), pointer.y + rng.random_range(-80.0..80.0));
                    e.on_pointer_move(pointer, now);
                }
                3 => {
                    e.on_pointer_up(pointer, Button::Primary, now);
                }
                4 => {
                    let island = ["welcome", "project-1", "about", "contact"][rng.random_range(0..4)];
                    e.on_island_click(&id(island), now).unwrap();
                }
                5 => {
                    e.on_background_click(now);
                }
                6 => {
                    let dy = if rng.random_bool(0.5) { -100.0 } else { 100.0 };
                    e.on_wheel(pointer, WheelDelta { dx: 0.0, dy }, now);
                }
                _ => {
                    e.tick(now);
                }
            }
            assert!(e.core.is_exclusive());
            assert_eq!(e.detail_view().visible, e.mode() == NavigationMode::Focused);
            let scale = e.transform().scale;
            assert!(scale >= e.core.config().wheel_min_scale - 1e-12);
            assert!(scale <= e.core.config().max_focus_scale + 1e-12);
        }
        e.on_pointer_up(pointer, Button::Primary, now);
        let end = run_frames(&mut e, now);
        if e.mode() == NavigationMode::Home {
            let t = e.transform();
            assert!(e.core.pan_bounds_at(t.scale).contains(t.translation()), "rested at {t:?} after {end}ms");
        }
    }
}

// =============================================================
// Wheel zoom
// =============================================================

#[test]
fn wheel_zoom_keeps_point_under_pointer() {
    let mut e = engine();
    let anchor = Point::new(500.0, 400.0);
    let before = e.transform().screen_to_canvas(anchor);
    let actions = e.on_wheel(anchor, WheelDelta { dx: 0.0, dy: -120.0 }, 0.0);
    assert_eq!(actions, vec![Action::FrameRequested]);
    run_frames(&mut e, 0.0);
    let t = e.transform();
    assert!((t.scale - 1.1).abs() < 1e-12);
    let after = t.screen_to_canvas(anchor);
    assert!((after.x - before.x).abs() < 1e-9);
    assert!((after.y - before.y).abs() < 1e-9);
}

#[test]
fn wheel_steps_accumulate_onto_running_target() {
    let mut e = engine();
    e.on_wheel(EMPTY_SCREEN, WheelDelta { dx: 0.0, dy: -1.0 }, 0.0);
    e.on_wheel(EMPTY_SCREEN, WheelDelta { dx: 0.0, dy: -1.0 }, 10.0);
    let target = e.core.director().wheel_target().unwrap();
    assert!((target.scale - 1.21).abs() < 1e-12);
}

#[test]
fn wheel_scale_is_clamped() {
    let mut e = engine();
    let mut now = 0.0;
    for _ in 0..40 {
        now += 200.0;
        e.on_wheel(EMPTY_SCREEN, WheelDelta { dx: 0.0, dy: 100.0 }, now);
        e.tick(now + 199.0);
    }
    run_frames(&mut e, now + 199.0);
    assert_eq!(e.transform().scale, e.core.config().wheel_min_scale);
    let t = e.transform();
    assert!(e.core.pan_bounds_at(t.scale).contains(t.translation()));
}

#[test]
fn wheel_ignored_when_focused() {
    let mut e = engine();
    let t = focus(&mut e, "project-1");
    let rev = e.core.revision();
    assert!(e.on_wheel(EMPTY_SCREEN, WheelDelta { dx: 0.0, dy: -100.0 }, t).is_empty());
    assert_eq!(e.core.revision(), rev);
}

#[test]
fn horizontal_only_wheel_is_ignored() {
    let mut e = engine();
    assert!(!e.core.wheel_zoom(EMPTY_SCREEN, WheelDelta { dx: 40.0, dy: 0.0 }, 0.0));
}

#[test]
fn drag_cancels_wheel_tween() {
    let mut e = engine();
    e.on_wheel(EMPTY_SCREEN, WheelDelta { dx: 0.0, dy: -100.0 }, 0.0);
    e.tick(50.0);
    e.on_pointer_down(EMPTY_SCREEN, Button::Primary, 60.0);
    assert_eq!(e.core.director().wheel_target(), None);
    assert!(e.core.is_exclusive());
}

// =============================================================
// Home at the content edge
// =============================================================

/// Welcome sits at the left end of a strip of content much wider than the
/// viewport, so centring it lies outside the raw pan bounds.
fn wide_engine() -> Engine {
    let registry = ContentRegistry::new(
        vec![
            Island::new("welcome", Rect::new(0.0, 0.0, 200.0, 150.0)),
            Island::new("far", Rect::new(2800.0, 0.0, 200.0, 150.0)),
        ],
        IslandId::new("welcome"),
    )
    .unwrap();
    Engine::new(registry, NavConfig::default(), Viewport::new(1000.0, 800.0)).unwrap()
}

/// Empty water on screen from the wide layout's home.
const WIDE_EMPTY: Point = Point { x: 900.0, y: 700.0 };

fn tap(engine: &mut Engine, at: Point, now_ms: f64) -> Vec<Action> {
    let mut actions = engine.on_pointer_down(at, Button::Primary, now_ms);
    actions.extend(engine.on_pointer_up(at, Button::Primary, now_ms + 60.0));
    actions
}

fn moves_camera(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::TransformChanged(_)))
}

#[test]
fn pan_bounds_cover_home_at_content_edge() {
    let e = wide_engine();
    let home = e.core.home();
    assert_eq!(home, Transform::new(400.0, 325.0, 1.0));
    let b = e.core.pan_bounds();
    assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (-2100.0, 400.0, 100.0, 550.0));
    assert!(b.contains(home.translation()));
    assert_eq!(e.core.pan_bounds_at(1.0), b);
}

#[test]
fn tap_on_water_at_content_edge_leaves_home() {
    let mut e = wide_engine();
    let actions = tap(&mut e, WIDE_EMPTY, 0.0);
    assert!(!moves_camera(&actions));
    run_frames(&mut e, 60.0);
    assert_eq!(e.transform(), e.core.home());
    assert_eq!(e.core.revision(), 0);
}

#[test]
fn small_drag_at_content_edge_tracks_pointer() {
    let mut e = wide_engine();
    e.on_pointer_down(WIDE_EMPTY, Button::Primary, 0.0);
    let moved = e.on_pointer_move(Point::new(880.0, 700.0), 16.0);
    assert_eq!(moved, vec![Action::TransformChanged(Transform::new(380.0, 325.0, 1.0))]);
}

#[test]
fn round_trip_then_tap_at_content_edge_leaves_home() {
    let mut e = wide_engine();
    let t = focus(&mut e, "far");
    e.on_background_click(t);
    let t = run_frames(&mut e, t);
    assert_eq!(e.mode(), NavigationMode::Home);
    assert_eq!(e.transform(), e.core.home());

    let actions = tap(&mut e, WIDE_EMPTY, t);
    assert!(!moves_camera(&actions));
    run_frames(&mut e, t + 60.0);
    assert_eq!(e.transform(), e.core.home());
}

#[test]
fn resize_keeps_home_inside_bounds() {
    let mut e = wide_engine();
    e.set_viewport(1400.0, 900.0);
    let home = e.core.home();
    assert!(e.core.pan_bounds().contains(home.translation()));
    assert_eq!(e.core.pan_bounds().max_x, home.x);
}

// =============================================================
// Viewport
// =============================================================

#[test]
fn resize_in_home_recomputes_home_and_clamps() {
    let mut e = engine();
    let actions = e.set_viewport(600.0, 400.0);
    assert_eq!(e.core.home(), Transform::new(200.0, 125.0, 1.0));
    let b = e.core.pan_bounds();
    assert_eq!((b.min_x, b.max_x, b.min_y, b.max_y), (-300.0, 500.0, -400.0, 450.0));
    // (400, 325) is already inside the new bounds, so nothing moves.
    assert!(actions.is_empty());
    assert_eq!(e.transform(), Transform::new(400.0, 325.0, 1.0));
}

#[test]
fn resize_same_size_is_noop() {
    let mut e = engine();
    assert!(e.set_viewport(1000.0, 800.0).is_empty());
}

#[test]
fn resize_while_focused_refits_island() {
    let mut e = engine();
    focus(&mut e, "project-1");
    let actions = e.set_viewport(600.0, 800.0);
    let s = 600.0 * 0.8 / 300.0;
    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], Action::TransformChanged(t) if t.scale == s));
}

#[test]
fn resize_mid_flight_lands_on_new_target() {
    let mut e = engine();
    e.on_island_click(&id("project-1"), 0.0).unwrap();
    e.tick(300.0);
    e.set_viewport(600.0, 800.0);
    run_frames(&mut e, 300.0);
    assert_eq!(e.transform().scale, 600.0 * 0.8 / 300.0);
}

#[test]
fn resize_mid_zoom_out_lands_on_new_home() {
    let mut e = engine();
    let t = focus(&mut e, "project-1");
    e.on_background_click(t);
    e.tick(t + 100.0);
    e.set_viewport(600.0, 400.0);
    run_frames(&mut e, t + 100.0);
    assert_eq!(e.transform(), Transform::new(200.0, 125.0, 1.0));
}

#[test]
fn unusable_viewport_is_rejected_at_construction() {
    for (w, h) in [(0.0, 0.0), (1000.0, -1.0), (f64::NAN, 800.0), (f64::INFINITY, 800.0)] {
        let err = Engine::new(registry(), NavConfig::default(), Viewport::new(w, h)).unwrap_err();
        assert_eq!(err.error_code(), "E_INVALID_VIEWPORT");
    }
}

#[test]
fn unusable_resize_in_home_is_ignored() {
    let mut e = engine();
    assert!(e.set_viewport(f64::NAN, 800.0).is_empty());
    assert!(e.set_viewport(0.0, 0.0).is_empty());
    assert_eq!(e.core.viewport(), Viewport::new(1000.0, 800.0));
    assert_eq!(e.transform(), e.core.home());
    assert_eq!(e.core.pan_bounds().max_x, 500.0);
}

#[test]
fn hidden_viewport_while_focused_keeps_framing() {
    let mut e = engine();
    focus(&mut e, "project-1");
    let before = e.transform();
    assert!(e.set_viewport(0.0, 0.0).is_empty());
    assert_eq!(e.transform(), before);
    assert!(e.transform().scale > 0.0);

    // Shown again at a real size, the island is re-framed as usual.
    let actions = e.set_viewport(600.0, 800.0);
    assert!(matches!(actions[..], [Action::TransformChanged(t)] if t.scale == 600.0 * 0.8 / 300.0));
}

// =============================================================
// Actions
// =============================================================

#[test]
fn actions_serialize_tagged() {
    let v = serde_json::to_value(Action::TransformChanged(Transform::new(1.0, 2.0, 3.0))).unwrap();
    assert_eq!(v, json!({ "type": "transform_changed", "x": 1.0, "y": 2.0, "scale": 3.0 }));
    let v = serde_json::to_value(Action::ShowDetail { id: id("about") }).unwrap();
    assert_eq!(v, json!({ "type": "show_detail", "id": "about" }));
    let v = serde_json::to_value(Action::SetCursor { cursor: "grab".into() }).unwrap();
    assert_eq!(v, json!({ "type": "set_cursor", "cursor": "grab" }));
    assert_eq!(serde_json::to_value(Action::HideDetail).unwrap(), json!({ "type": "hide_detail" }));
}
