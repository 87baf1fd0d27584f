//! Circular pieces with boundary reflection
//!
//! A ball's stored position is its *center* when drawing, bouncing and hit
//! testing, while the `move_to` boundary check it shares with every piece
//! still treats that position as a top-left corner. The mismatch is kept so
//! hosts see the same bounds they always have; `bounce` uses the same
//! top-left arithmetic.

use glam::Vec2;

use super::collision::{circle_rect_hit, leaves_axis, point_in_circle};
use super::piece::{Piece, Sprite};
use crate::style::PieceStyle;
use crate::surface::SurfaceHandle;

/// A filled circle of fixed radius
#[derive(Debug, Clone)]
pub struct Ball {
    piece: Piece,
    radius: f32,
}

impl Ball {
    /// Create a ball; its bounding box is `2 * radius` on both axes
    pub fn new(radius: f32, surface: &SurfaceHandle, style: PieceStyle) -> Self {
        Self {
            piece: Piece::new(2.0 * radius, 2.0 * radius, surface, style),
            radius,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Resize the ball; width and height follow
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.piece.set_size(Vec2::splat(2.0 * radius));
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.piece.position()
    }

    /// Advance one step, reflecting off the surface edges
    ///
    /// Each axis is tested on its own: if `pos + vel` would fall outside
    /// `[0, surface - width)`, that velocity component is negated first. The
    /// step then uses the updated velocity, so right after a reflection the
    /// ball may sit at or one step past the nominal edge for a frame.
    pub fn bounce(&mut self) {
        let area = self.piece.surface_size();
        let limit = area - self.piece.size();
        let pos = self.piece.position();
        let mut vel = self.piece.velocity();

        if leaves_axis(pos.x, vel.x, limit.x) {
            vel.x = -vel.x;
        }
        if leaves_axis(pos.y, vel.y, limit.y) {
            vel.y = -vel.y;
        }
        self.piece.set_velocity_vec(vel);

        self.clear();
        let next = pos + vel;
        self.draw(next.x, next.y);
    }

    /// Overlap test between this ball and another piece's rectangle
    pub fn hit<S: Sprite + ?Sized>(&self, other: &S) -> bool {
        circle_rect_hit(self.center(), self.radius, &other.bounds())
    }

    /// Whether (x, y) lies inside or on the ball
    pub fn is_point_in(&self, x: f32, y: f32) -> bool {
        point_in_circle(Vec2::new(x, y), self.center(), self.radius)
    }
}

impl Sprite for Ball {
    fn piece(&self) -> &Piece {
        &self.piece
    }

    fn piece_mut(&mut self) -> &mut Piece {
        &mut self.piece
    }

    /// Fill a circle centered at (x, y)
    fn draw(&mut self, x: f32, y: f32) {
        self.piece.set_position(Vec2::new(x, y));
        self.piece
            .surface()
            .borrow_mut()
            .draw_circle(x, y, self.radius, self.piece.color());
    }

    /// Erase the bounding box around the center
    fn clear(&mut self) {
        let c = self.center();
        let size = self.piece.size();
        self.piece.surface().borrow_mut().clear_region(
            c.x - self.radius,
            c.y - self.radius,
            size.x,
            size.y,
        );
    }
}
