//! Pure geometry: content bounds, pan bounds and camera-fit transforms.
//!
//! Nothing here holds state. Callers feed in island rectangles and the
//! current viewport and decide which results to keep. All functions are
//! deterministic so the same inputs always reproduce the same bits.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// A point in either screen (viewport) or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The visible window, in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space centre of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Both sides are finite and positive. Hidden elements measure 0 x 0.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Whether `pt` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x <= self.right() && pt.y >= self.top && pt.y <= self.bottom()
    }

    /// Both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Axis-aligned box covering every island.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl ContentBounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The same box as it appears on screen at `scale`, with the canvas
    /// origin as the scaling anchor.
    #[must_use]
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            min_x: self.min_x * scale,
            min_y: self.min_y * scale,
            max_x: self.max_x * scale,
            max_y: self.max_y * scale,
        }
    }
}

/// Allowed range for the translation part of the canvas transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PanBounds {
    /// Hard-clamp a translation into the bounds.
    #[must_use]
    pub fn clamp(&self, pt: Point) -> Point {
        Point::new(pt.x.clamp(self.min_x, self.max_x), pt.y.clamp(self.min_y, self.max_y))
    }

    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.min_x && pt.x <= self.max_x && pt.y >= self.min_y && pt.y <= self.max_y
    }

    /// Smallest bounds covering both `self` and the translation `pt`.
    #[must_use]
    pub fn including(&self, pt: Point) -> Self {
        Self {
            min_x: self.min_x.min(pt.x),
            max_x: self.max_x.max(pt.x),
            min_y: self.min_y.min(pt.y),
            max_y: self.max_y.max(pt.y),
        }
    }

    /// Soften a translation that lies outside the bounds.
    ///
    /// Inside the bounds the point is returned unchanged. Past an edge, an
    /// overshoot `d` becomes `d / (1 + k * d / span)`: with `k = 0` the drag
    /// moves freely, and larger `k` pushes back harder the further the
    /// pointer travels. The softened overshoot never exceeds the raw one.
    #[must_use]
    pub fn resist(&self, pt: Point, coefficient: f64, span: f64) -> Point {
        let span = if span > 0.0 { span } else { 1.0 };
        Point::new(
            resist_axis(pt.x, self.min_x, self.max_x, coefficient, span),
            resist_axis(pt.y, self.min_y, self.max_y, coefficient, span),
        )
    }
}

fn resist_axis(value: f64, min: f64, max: f64, coefficient: f64, span: f64) -> f64 {
    let soften = |overshoot: f64| overshoot / (1.0 + coefficient * overshoot / span);
    if value < min {
        min - soften(min - value)
    } else if value > max {
        max + soften(value - max)
    } else {
        value
    }
}

/// Bounding box of all `rects`, or `None` when there are none.
#[must_use]
pub fn content_bounds<I>(rects: I) -> Option<ContentBounds>
where
    I: IntoIterator<Item = Rect>,
{
    rects.into_iter().fold(None, |acc, r| {
        Some(match acc {
            None => ContentBounds { min_x: r.left, min_y: r.top, max_x: r.right(), max_y: r.bottom() },
            Some(b) => ContentBounds {
                min_x: b.min_x.min(r.left),
                min_y: b.min_y.min(r.top),
                max_x: b.max_x.max(r.right()),
                max_y: b.max_y.max(r.bottom()),
            },
        })
    })
}

/// Translation limits that keep the padded content in view.
///
/// At `x = -min_x + padding` the content's left edge sits `padding` pixels
/// from the viewport's left edge; at `x = width - max_x - padding` its right
/// edge sits `padding` pixels from the right edge. When the padded content
/// is narrower than the viewport those two extremes swap, so each axis is
/// ordered to keep `min <= max`.
#[must_use]
pub fn pan_bounds(viewport: Viewport, content: &ContentBounds, padding: f64) -> PanBounds {
    let (min_x, max_x) = ordered(viewport.width - content.max_x - padding, -content.min_x + padding);
    let (min_y, max_y) = ordered(viewport.height - content.max_y - padding, -content.min_y + padding);
    PanBounds { min_x, max_x, min_y, max_y }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Transform that centres `target` in the viewport at scale 1.
#[must_use]
pub fn home_transform(viewport: Viewport, target: &Rect) -> Transform {
    let c = target.center();
    Transform { x: viewport.width * 0.5 - c.x, y: viewport.height * 0.5 - c.y, scale: 1.0 }
}

/// Transform that centres `rect` and scales it to fill `padding_ratio` of the
/// limiting viewport axis, never beyond `max_scale`.
#[must_use]
pub fn focus_transform(viewport: Viewport, rect: &Rect, padding_ratio: f64, max_scale: f64) -> Transform {
    let scale_x = viewport.width * padding_ratio / rect.width;
    let scale_y = viewport.height * padding_ratio / rect.height;
    let scale = scale_x.min(scale_y).min(max_scale);
    let c = rect.center();
    Transform { x: viewport.width * 0.5 - c.x * scale, y: viewport.height * 0.5 - c.y * scale, scale }
}

/// Rescale `transform` so the canvas point under the screen point `anchor`
/// stays under it.
#[must_use]
pub fn zoom_about(transform: Transform, anchor: Point, scale: f64) -> Transform {
    let world = transform.screen_to_canvas(anchor);
    Transform { x: anchor.x - world.x * scale, y: anchor.y - world.y * scale, scale }
}
