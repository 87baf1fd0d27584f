//! Decoded bitmaps shared between loader threads and image pieces

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::LoadError;

/// An immutable RGBA8 image, cheap to clone
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    /// Build a bitmap filled with one color
    pub fn solid(width: u32, height: u32, color: crate::Color) -> Self {
        Self::from_image(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba(color.to_array()),
        ))
    }

    /// Decode an image file (format guessed from its contents)
    pub fn open(source: impl AsRef<Path>) -> Result<Self, LoadError> {
        let source = source.as_ref();
        let decoded = image::ImageReader::open(source)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| LoadError::Decode {
                source: source.display().to_string(),
                reason: e.to_string(),
            })?
            .decode()
            .map_err(|e| LoadError::Decode {
                source: source.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_image(decoded.into_rgba8()))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }
}
