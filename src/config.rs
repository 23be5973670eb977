//! Navigation tunables, parsed from JSON with per-field defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::anim::Easing;
use crate::consts::*;
use crate::error::NavError;

/// What a click on another island does while one is already focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefocusPolicy {
    /// Fly home first, then into the clicked island.
    #[default]
    ZoomOutThenIn,
    /// Ignore the click; the user must return home explicitly.
    Block,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavConfig {
    pub pan_padding: f64,
    pub drag_resistance: f64,
    pub click_slop_px: f64,
    pub inertia_time_constant_ms: f64,
    pub inertia_min_speed: f64,
    pub velocity_window_ms: f64,
    pub focus_padding_ratio: f64,
    pub max_focus_scale: f64,
    pub zoom_duration_ms: f64,
    pub zoom_easing: Easing,
    pub wheel_zoom_factor: f64,
    pub wheel_min_scale: f64,
    pub wheel_duration_ms: f64,
    pub refocus: RefocusPolicy,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            pan_padding: DEFAULT_PAN_PADDING_PX,
            drag_resistance: DEFAULT_DRAG_RESISTANCE,
            click_slop_px: DEFAULT_CLICK_SLOP_PX,
            inertia_time_constant_ms: DEFAULT_INERTIA_TIME_CONSTANT_MS,
            inertia_min_speed: DEFAULT_INERTIA_MIN_SPEED,
            velocity_window_ms: DEFAULT_VELOCITY_WINDOW_MS,
            focus_padding_ratio: DEFAULT_FOCUS_PADDING_RATIO,
            max_focus_scale: DEFAULT_MAX_FOCUS_SCALE,
            zoom_duration_ms: DEFAULT_ZOOM_DURATION_MS,
            zoom_easing: Easing::default(),
            wheel_zoom_factor: DEFAULT_WHEEL_ZOOM_FACTOR,
            wheel_min_scale: DEFAULT_WHEEL_MIN_SCALE,
            wheel_duration_ms: DEFAULT_WHEEL_DURATION_MS,
            refocus: RefocusPolicy::default(),
        }
    }
}

impl NavConfig {
    /// Parse a JSON object; absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed JSON, `InvalidConfig` when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, NavError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), NavError> {
        check(self.pan_padding >= 0.0, "panPadding must be >= 0")?;
        check((0.0..1.0).contains(&self.drag_resistance), "dragResistance must be in [0, 1)")?;
        check(self.click_slop_px >= 0.0, "clickSlopPx must be >= 0")?;
        check(self.inertia_time_constant_ms > 0.0, "inertiaTimeConstantMs must be > 0")?;
        check(self.inertia_min_speed > 0.0, "inertiaMinSpeed must be > 0")?;
        check(self.velocity_window_ms > 0.0, "velocityWindowMs must be > 0")?;
        check(
            self.focus_padding_ratio > 0.0 && self.focus_padding_ratio <= 1.0,
            "focusPaddingRatio must be in (0, 1]",
        )?;
        check(self.max_focus_scale > 0.0, "maxFocusScale must be > 0")?;
        check(self.zoom_duration_ms >= 0.0, "zoomDurationMs must be >= 0")?;
        check(self.wheel_zoom_factor > 1.0, "wheelZoomFactor must be > 1")?;
        check(
            self.wheel_min_scale > 0.0 && self.wheel_min_scale <= self.max_focus_scale,
            "wheelMinScale must be in (0, maxFocusScale]",
        )?;
        check(self.wheel_duration_ms >= 0.0, "wheelDurationMs must be >= 0")?;
        Ok(())
    }
}

// NaN fails every comparison above.
fn check(ok: bool, msg: &str) -> Result<(), NavError> {
    if ok { Ok(()) } else { Err(NavError::InvalidConfig(msg.to_string())) }
}
