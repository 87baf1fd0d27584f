//! The base piece and the `Sprite` interface shared by every piece kind
//!
//! A piece occupies a rectangle on exactly one surface. Moves are
//! all-or-nothing: a target outside the surface on either axis is rejected
//! without touching the raster.

use glam::Vec2;

use super::collision::{Bounds, accepts_position};
use crate::style::{Color, PieceStyle};
use crate::surface::SurfaceHandle;

/// Drawable, movable, boundable
///
/// Implementors hold a [`Piece`] and customise how it is painted. The surface
/// is borrowed mutably for the duration of each draw/clear, so hosts must not
/// hold a borrow of it across these calls.
pub trait Sprite {
    fn piece(&self) -> &Piece;
    fn piece_mut(&mut self) -> &mut Piece;

    /// Repaint at (x, y) and store that position, unchecked
    fn draw(&mut self, x: f32, y: f32);

    /// Erase the piece at its stored position
    fn clear(&mut self) {
        self.piece().erase_bounds();
    }

    /// Clear and redraw at (x, y) if the piece stays inside the surface
    fn move_to(&mut self, x: f32, y: f32) -> bool {
        let piece = self.piece();
        let target = Vec2::new(x, y);
        if !accepts_position(target, piece.size, piece.surface_size()) {
            log::debug!("Move to ({}, {}) rejected", x, y);
            return false;
        }
        self.clear();
        self.draw(x, y);
        true
    }

    fn go_right(&mut self) -> bool {
        let (pos, vel) = (self.piece().position(), self.piece().velocity());
        self.move_to(pos.x + vel.x, pos.y)
    }

    fn go_left(&mut self) -> bool {
        let (pos, vel) = (self.piece().position(), self.piece().velocity());
        self.move_to(pos.x - vel.x, pos.y)
    }

    fn go_up(&mut self) -> bool {
        let (pos, vel) = (self.piece().position(), self.piece().velocity());
        self.move_to(pos.x, pos.y - vel.y)
    }

    fn go_down(&mut self) -> bool {
        let (pos, vel) = (self.piece().position(), self.piece().velocity());
        self.move_to(pos.x, pos.y + vel.y)
    }

    fn bounds(&self) -> Bounds {
        self.piece().bounds()
    }
}

/// A movable rectangle with a velocity and a fill color
#[derive(Debug, Clone)]
pub struct Piece {
    surface: SurfaceHandle,
    pos: Vec2,
    size: Vec2,
    vel: Vec2,
    color: Color,
}

impl Piece {
    /// Create a piece on `surface`
    ///
    /// Both velocity components start at `style.speed`. The initial position
    /// is `surface / 2 - size`, which is offset from the true center.
    pub fn new(width: f32, height: f32, surface: &SurfaceHandle, style: PieceStyle) -> Self {
        let size = Vec2::new(width, height);
        let area = surface.borrow().size();
        Self {
            surface: surface.clone(),
            pos: area / 2.0 - size,
            size,
            vel: Vec2::splat(style.speed),
            color: style.color,
        }
    }

    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface.borrow().size()
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn set_velocity(&mut self, dx: f32, dy: f32) {
        self.vel = Vec2::new(dx, dy);
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            pos: self.pos,
            size: self.size,
        }
    }

    pub(crate) fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub(crate) fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub(crate) fn set_velocity_vec(&mut self, vel: Vec2) {
        self.vel = vel;
    }

    /// Clear the stored rectangle on the surface
    pub(crate) fn erase_bounds(&self) {
        self.surface
            .borrow_mut()
            .clear_region(self.pos.x, self.pos.y, self.size.x, self.size.y);
    }
}

impl Sprite for Piece {
    fn piece(&self) -> &Piece {
        self
    }

    fn piece_mut(&mut self) -> &mut Piece {
        self
    }

    fn draw(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.surface
            .borrow_mut()
            .draw_rectangle(x, y, self.size.x, self.size.y, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use proptest::prelude::*;

    fn board(w: u32, h: u32) -> SurfaceHandle {
        Surface::shared(w, h).unwrap()
    }

    fn painted(surface: &SurfaceHandle) -> usize {
        surface
            .borrow()
            .raster()
            .pixels()
            .filter(|p| p.0[3] != 0)
            .count()
    }

    #[test]
    fn test_new_uses_offset_center_and_speed() {
        let surface = board(200, 100);
        let piece = Piece::new(20.0, 10.0, &surface, PieceStyle::piece());
        assert_eq!(piece.position(), Vec2::new(80.0, 40.0));
        assert_eq!(piece.velocity(), Vec2::new(6.0, 6.0));
        assert_eq!(piece.color(), Color::RED);
        // Construction does not paint
        assert_eq!(painted(&surface), 0);
    }

    #[test]
    fn test_draw_is_unchecked() {
        let surface = board(50, 50);
        let mut piece = Piece::new(10.0, 10.0, &surface, PieceStyle::piece());
        piece.draw(-5.0, 45.0);
        assert_eq!(piece.position(), Vec2::new(-5.0, 45.0));
        assert_eq!(painted(&surface), 25);
    }

    #[test]
    fn test_move_clears_then_draws() {
        let surface = board(50, 50);
        let mut piece = Piece::new(10.0, 10.0, &surface, PieceStyle::piece());
        piece.draw(0.0, 0.0);
        assert!(piece.move_to(20.0, 20.0));
        assert_eq!(piece.position(), Vec2::new(20.0, 20.0));
        assert_eq!(painted(&surface), 100);
        assert_eq!(surface.borrow().pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(surface.borrow().pixel(25, 25), Some(Color::RED));
    }

    #[test]
    fn test_move_rejects_without_mutation() {
        let surface = board(50, 50);
        let mut piece = Piece::new(10.0, 10.0, &surface, PieceStyle::piece());
        piece.draw(5.0, 5.0);
        let before = surface.borrow().raster().clone();

        // Valid x, invalid y: rejected as a whole
        assert!(!piece.move_to(10.0, 40.0));
        assert!(!piece.move_to(-1.0, 10.0));
        assert!(!piece.move_to(40.0, 10.0));
        assert!(!piece.move_to(10.0, -0.5));

        assert_eq!(piece.position(), Vec2::new(5.0, 5.0));
        assert_eq!(surface.borrow().raster(), &before);
    }

    #[test]
    fn test_go_right_at_edge() {
        let surface = board(100, 100);
        let mut piece = Piece::new(10.0, 10.0, &surface, PieceStyle::piece().with_speed(5.0));
        piece.draw(89.0, 10.0);
        assert!(!piece.go_right());
        assert_eq!(piece.position(), Vec2::new(89.0, 10.0));
    }

    #[test]
    fn test_directional_steps() {
        let surface = board(100, 100);
        let mut piece = Piece::new(10.0, 10.0, &surface, PieceStyle::piece());
        piece.set_velocity(3.0, 4.0);
        piece.draw(50.0, 50.0);
        assert!(piece.go_right());
        assert_eq!(piece.position(), Vec2::new(53.0, 50.0));
        assert!(piece.go_down());
        assert_eq!(piece.position(), Vec2::new(53.0, 54.0));
        assert!(piece.go_left());
        assert!(piece.go_up());
        assert_eq!(piece.position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_go_left_stops_at_zero() {
        let surface = board(100, 100);
        let mut piece = Piece::new(10.0, 10.0, &surface, PieceStyle::piece());
        piece.draw(12.0, 0.0);
        assert!(piece.go_left());
        assert!(piece.go_left());
        assert_eq!(piece.x(), 0.0);
        assert!(!piece.go_left());
        assert_eq!(piece.x(), 0.0);
        assert!(!piece.go_up());
    }

    proptest! {
        #[test]
        fn prop_successful_moves_keep_piece_inside(
            w in 1u32..64,
            h in 1u32..64,
            size in 0.0f32..16.0,
            targets in prop::collection::vec((-80.0f32..80.0, -80.0f32..80.0), 1..32),
        ) {
            let surface = board(w + 16, h + 16);
            let mut piece = Piece::new(size, size, &surface, PieceStyle::piece());
            let area = surface.borrow().size();
            for (x, y) in targets {
                let before = piece.position();
                if piece.move_to(x, y) {
                    prop_assert!(piece.bounds().inside(area));
                    prop_assert_eq!(piece.position(), Vec2::new(x, y));
                } else {
                    prop_assert_eq!(piece.position(), before);
                }
            }
        }
    }
}
