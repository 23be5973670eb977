#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::Point;
use crate::registry::{ContentRegistry, Island};
use crate::transform::Transform;

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget<'a> {
    Island(&'a Island),
    Background,
}

/// Topmost island under the screen point `screen_pt`, or the background.
///
/// Later registry entries are drawn above earlier ones, so they win.
#[must_use]
pub fn hit_test<'a>(registry: &'a ContentRegistry, transform: &Transform, screen_pt: Point) -> HitTarget<'a> {
    let canvas_pt = transform.screen_to_canvas(screen_pt);
    registry
        .islands()
        .iter()
        .rev()
        .find(|island| island.rect.contains(canvas_pt))
        .map_or(HitTarget::Background, HitTarget::Island)
}
