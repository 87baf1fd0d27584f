//! Snapshotting the surface raster to a compressed image
//!
//! JPEG has no alpha channel, so cleared pixels come out black.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use super::raster::{Surface, over_black};
use crate::consts::{DEFAULT_EXPORT_FILENAME, DEFAULT_JPEG_QUALITY};
use crate::error::SurfaceError;

/// Encoding used by `Surface::export_image`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Baseline JPEG, quality 1-100
    Jpeg { quality: u8 },
    /// Lossless PNG, alpha kept
    Png,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ExportFormat {
    /// Pick a format from a file extension, JPEG unless it says png
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("png") => ExportFormat::Png,
            _ => ExportFormat::default(),
        }
    }
}

impl Surface {
    /// Encode the current pixels in memory
    pub fn encode(&self, format: ExportFormat) -> Result<Vec<u8>, SurfaceError> {
        let raster = self.raster();
        let (w, h) = raster.dimensions();
        let mut out = Cursor::new(Vec::new());

        match format {
            ExportFormat::Jpeg { quality } => {
                let rgb = RgbImage::from_fn(w, h, |x, y| {
                    image::Rgb(over_black(raster.get_pixel(x, y).0))
                });
                JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
                    .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8)
                    .map_err(|e| SurfaceError::Encode(e.to_string()))?;
            }
            ExportFormat::Png => {
                PngEncoder::new(&mut out)
                    .write_image(raster.as_raw(), w, h, ExtendedColorType::Rgba8)
                    .map_err(|e| SurfaceError::Encode(e.to_string()))?;
            }
        }

        Ok(out.into_inner())
    }

    /// Write a snapshot to `path`, format chosen by extension
    pub fn export_image(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        let path = path.as_ref();
        self.export_image_as(path, ExportFormat::from_path(path))
    }

    pub fn export_image_as(
        &self,
        path: impl AsRef<Path>,
        format: ExportFormat,
    ) -> Result<(), SurfaceError> {
        let path = path.as_ref();
        let bytes = self.encode(format)?;
        std::fs::write(path, &bytes)?;
        log::info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Write a JPEG snapshot to `downloaded_image.jpg` in the working directory
    pub fn export_default(&self) -> Result<(), SurfaceError> {
        self.export_default_in(".")
    }

    /// Write a JPEG snapshot to `downloaded_image.jpg` inside `dir`
    pub fn export_default_in(&self, dir: impl AsRef<Path>) -> Result<(), SurfaceError> {
        self.export_image_as(dir.as_ref().join(DEFAULT_EXPORT_FILENAME), ExportFormat::default())
    }
}
