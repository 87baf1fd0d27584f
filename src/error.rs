//! Error types
//!
//! Out-of-bounds motion is not an error: `Sprite::move_to` reports it as `false`.

use std::fmt::{self, Display};

/// Failures creating or exporting a surface
#[derive(Debug)]
pub enum SurfaceError {
    /// Width or height was zero
    InvalidDimension { width: u32, height: u32 },
    /// The image encoder rejected the raster
    Encode(String),
    /// Writing the exported file failed
    Io(std::io::Error),
    /// Opening or updating the output window failed
    Window(String),
}

impl Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::InvalidDimension { width, height } => {
                write!(f, "invalid surface dimension {width}x{height}")
            }
            SurfaceError::Encode(s) => write!(f, "image encode error: {s}"),
            SurfaceError::Io(e) => write!(f, "export io error: {e}"),
            SurfaceError::Window(s) => write!(f, "window error: {s}"),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SurfaceError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SurfaceError {
    fn from(e: std::io::Error) -> Self {
        SurfaceError::Io(e)
    }
}

/// Failures loading a bitmap for an image piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source could not be opened or decoded
    Decode { source: String, reason: String },
    /// The loader thread went away without reporting
    Disconnected,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Decode { source, reason } => {
                write!(f, "failed to load bitmap '{source}': {reason}")
            }
            LoadError::Disconnected => write!(f, "bitmap loader disconnected"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Failures parsing a piece style
#[derive(Debug)]
pub enum StyleError {
    /// Malformed JSON or wrong field types
    Json(serde_json::Error),
    /// Color name or hex literal not recognised
    UnknownColor(String),
}

impl Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::Json(e) => write!(f, "style json error: {e}"),
            StyleError::UnknownColor(s) => write!(f, "unknown color '{s}'"),
        }
    }
}

impl std::error::Error for StyleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StyleError::Json(e) => Some(e),
            StyleError::UnknownColor(_) => None,
        }
    }
}

impl From<serde_json::Error> for StyleError {
    fn from(e: serde_json::Error) -> Self {
        StyleError::Json(e)
    }
}
