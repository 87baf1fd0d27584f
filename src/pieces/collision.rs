//! Collision and containment geometry
//!
//! Pure functions over positions and sizes, so they can be tested without a
//! surface. Rectangles are top-left based; circles are center based.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// True when the rectangle lies inside a surface of `area` size
    pub fn inside(&self, area: Vec2) -> bool {
        self.pos.x >= 0.0
            && self.pos.y >= 0.0
            && self.pos.x <= area.x - self.size.x
            && self.pos.y <= area.y - self.size.y
    }
}

/// Whether a top-left position is an acceptable move target
///
/// The upper bound is exclusive: a piece may not end flush against the right
/// or bottom edge.
#[inline]
pub fn accepts_position(pos: Vec2, size: Vec2, area: Vec2) -> bool {
    let limit = area - size;
    pos.x >= 0.0 && pos.x < limit.x && pos.y >= 0.0 && pos.y < limit.y
}

/// Whether advancing `pos` by `vel` on one axis leaves `[0, limit)`
#[inline]
pub fn leaves_axis(pos: f32, vel: f32, limit: f32) -> bool {
    let next = pos + vel;
    next < 0.0 || next >= limit
}

/// Circle vs axis-aligned rectangle overlap
///
/// The "definitely overlapping" fast path compares against the full rectangle
/// extents rather than half extents, so it reports hits a little generously.
pub fn circle_rect_hit(center: Vec2, radius: f32, rect: &Bounds) -> bool {
    let half = rect.size / 2.0;
    let d = (center - rect.center()).abs();

    if d.x > radius + half.x {
        return false;
    }
    if d.y > radius + half.y {
        return false;
    }

    if d.x <= rect.size.x {
        return true;
    }
    if d.y <= rect.size.y {
        return true;
    }

    let corner = d - rect.size;
    corner.length_squared() <= radius * radius
}

/// Point inside (or on) a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    (point - center).length_squared() <= radius * radius
}
