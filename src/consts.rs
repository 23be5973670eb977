//! Default numeric constants for the navigation engine.

// ── Panning ─────────────────────────────────────────────────────

/// Margin in pixels kept between the content edge and the viewport edge at the pan limits.
pub const DEFAULT_PAN_PADDING_PX: f64 = 100.0;

/// Boundary resistance coefficient in `[0, 1)`; 0 lets the drag overshoot freely.
pub const DEFAULT_DRAG_RESISTANCE: f64 = 0.55;

/// Pointer travel in pixels below which a press still counts as a click.
pub const DEFAULT_CLICK_SLOP_PX: f64 = 4.0;

// ── Inertia ─────────────────────────────────────────────────────

/// Exponential decay time constant of release inertia, in milliseconds.
pub const DEFAULT_INERTIA_TIME_CONSTANT_MS: f64 = 325.0;

/// Inertia stops once speed drops below this many pixels per millisecond.
pub const DEFAULT_INERTIA_MIN_SPEED: f64 = 0.02;

/// Trailing window of pointer samples used to estimate release velocity.
pub const DEFAULT_VELOCITY_WINDOW_MS: f64 = 100.0;

// ── Focus zoom ──────────────────────────────────────────────────

/// Fraction of the limiting viewport axis a focused island may occupy.
pub const DEFAULT_FOCUS_PADDING_RATIO: f64 = 0.8;

/// Upper bound on the scale produced by a focus zoom.
pub const DEFAULT_MAX_FOCUS_SCALE: f64 = 3.0;

/// Duration of zoom-in and zoom-out camera flights.
pub const DEFAULT_ZOOM_DURATION_MS: f64 = 800.0;

// ── Wheel zoom ──────────────────────────────────────────────────

/// Scale multiplier applied per discrete wheel step.
pub const DEFAULT_WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// Smallest scale the wheel may reach.
pub const DEFAULT_WHEEL_MIN_SCALE: f64 = 0.25;

/// Duration of the short tween that smooths each wheel step.
pub const DEFAULT_WHEEL_DURATION_MS: f64 = 180.0;
