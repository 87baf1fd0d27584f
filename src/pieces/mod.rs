//! Movable pieces on a surface
//!
//! Every piece kind implements [`Sprite`] over a shared [`Piece`] core:
//! - `Piece`: plain filled rectangle
//! - `Ball`: filled circle with bounce and hit tests
//! - `ImagePiece`: bitmap loaded in the background

pub mod ball;
pub mod collision;
pub mod image_piece;
pub mod piece;

pub use ball::Ball;
pub use collision::{Bounds, circle_rect_hit, point_in_circle};
pub use image_piece::{ImagePiece, LoadState, OnLoad};
pub use piece::{Piece, Sprite};
