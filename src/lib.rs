//! Piece Board - movable 2D pieces on a software raster
//!
//! Core modules:
//! - `surface`: Fixed-size RGBA raster (clear/draw primitives, export, window)
//! - `pieces`: Rectangle, ball and image pieces with bounded movement and hit tests
//! - `style`: Construction-time color/speed configuration
//! - `error`: Error types

pub mod error;
pub mod pieces;
pub mod style;
pub mod surface;

pub use error::{LoadError, StyleError, SurfaceError};
pub use pieces::{Ball, Bounds, ImagePiece, LoadState, Piece, Sprite};
pub use style::{Color, PieceStyle};
pub use surface::{Bitmap, ExportFormat, Surface, SurfaceHandle};

/// Crate-wide defaults
pub mod consts {
    /// Per-axis speed of a plain piece
    pub const DEFAULT_PIECE_SPEED: f32 = 6.0;
    /// Per-axis speed of a ball (slower pacing)
    pub const DEFAULT_BALL_SPEED: f32 = 2.0;

    /// File name used by `Surface::export_default`
    pub const DEFAULT_EXPORT_FILENAME: &str = "downloaded_image.jpg";
    /// Baseline JPEG quality for exports
    pub const DEFAULT_JPEG_QUALITY: u8 = 92;
}
