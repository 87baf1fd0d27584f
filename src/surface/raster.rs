//! Fixed-size RGBA raster that pieces draw onto and clear from
//!
//! Coverage is decided by pixel centers, so a rectangle at (2, 2) of size 3x3
//! paints exactly pixels 2..5 on both axes. Everything outside the raster is
//! clipped silently.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::bitmap::Bitmap;
use crate::error::SurfaceError;
use crate::style::Color;

/// Shared single-threaded handle pieces keep to their surface
pub type SurfaceHandle = Rc<RefCell<Surface>>;

/// A 2D raster with fixed width and height
#[derive(Debug, Clone)]
pub struct Surface {
    raster: RgbaImage,
    /// Top-left of the surface in viewport coordinates
    origin: Vec2,
}

impl Surface {
    /// Allocate a fully transparent raster
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimension { width, height });
        }
        log::debug!("Surface created: {}x{}", width, height);
        Ok(Self {
            raster: RgbaImage::new(width, height),
            origin: Vec2::ZERO,
        })
    }

    /// Allocate a surface already wrapped in a shareable handle
    pub fn shared(width: u32, height: u32) -> Result<SurfaceHandle, SurfaceError> {
        Ok(Rc::new(RefCell::new(Self::new(width, height)?)))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Surface size as floats, for piece geometry
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Record where the surface sits in viewport space
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = Vec2::new(x, y);
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    /// Read back one pixel, `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.raster
            .get_pixel_checked(x, y)
            .map(|p| Color::from_array(p.0))
    }

    /// Erase the whole raster
    pub fn clear(&mut self) {
        for px in self.raster.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    /// Erase the pixels covered by a rectangle
    pub fn clear_region(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let cols = self.span(x, w, self.width());
        let rows = self.span(y, h, self.height());
        for py in rows {
            for px in cols.clone() {
                self.raster.put_pixel(px, py, Rgba([0, 0, 0, 0]));
            }
        }
    }

    /// Fill a rectangle
    pub fn draw_rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let cols = self.span(x, w, self.width());
        let rows = self.span(y, h, self.height());
        for py in rows {
            for px in cols.clone() {
                self.blend(px, py, color);
            }
        }
    }

    /// Fill a circle centered at (cx, cy)
    pub fn draw_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        if r.is_nan() || r <= 0.0 {
            return;
        }
        let r2 = r * r;
        let cols = self.span(cx - r, 2.0 * r, self.width());
        let rows = self.span(cy - r, 2.0 * r, self.height());
        for py in rows {
            let dy = py as f32 + 0.5 - cy;
            for px in cols.clone() {
                let dx = px as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    /// Paint a bitmap scaled (nearest neighbour) into the w x h rectangle at (x, y)
    pub fn draw_image(&mut self, bitmap: &Bitmap, x: f32, y: f32, w: f32, h: f32) {
        if bitmap.is_empty() || w.is_nan() || h.is_nan() || w <= 0.0 || h <= 0.0 {
            return;
        }
        let src = bitmap.image();
        let (bw, bh) = (src.width(), src.height());
        let cols = self.span(x, w, self.width());
        let rows = self.span(y, h, self.height());
        for py in rows {
            let v = ((py as f32 + 0.5 - y) / h * bh as f32) as u32;
            for px in cols.clone() {
                let u = ((px as f32 + 0.5 - x) / w * bw as f32) as u32;
                let sample = src.get_pixel(u.min(bw - 1), v.min(bh - 1));
                self.blend(px, py, Color::from_array(sample.0));
            }
        }
    }

    /// Pixels as `0x00RRGGBB`, composited over black
    pub fn to_rgb_u32(&self) -> Vec<u32> {
        self.raster
            .pixels()
            .map(|p| {
                let [r, g, b] = over_black(p.0);
                ((r as u32) << 16) | ((g as u32) << 8) | b as u32
            })
            .collect()
    }

    /// Pixel indices along one axis whose centers fall in [start, start + len)
    fn span(&self, start: f32, len: f32, limit: u32) -> Range<u32> {
        if len.is_nan() || len <= 0.0 {
            return 0..0;
        }
        let lo = (start - 0.5).ceil().clamp(0.0, limit as f32) as u32;
        let hi = (start + len - 0.5).ceil().clamp(0.0, limit as f32) as u32;
        lo..hi.max(lo)
    }

    /// Source-over composite with straight alpha
    fn blend(&mut self, x: u32, y: u32, src: Color) {
        if src.a == 255 {
            self.raster.put_pixel(x, y, Rgba(src.to_array()));
            return;
        }
        if src.a == 0 {
            return;
        }
        let dst = self.raster.get_pixel(x, y).0;
        let sa = src.a as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| -> u8 {
            let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        let out = [
            mix(src.r, dst[0]),
            mix(src.g, dst[1]),
            mix(src.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ];
        self.raster.put_pixel(x, y, Rgba(out));
    }
}

/// Drop alpha by compositing onto black
#[inline]
pub(crate) fn over_black(px: [u8; 4]) -> [u8; 3] {
    let a = px[3] as u16;
    let scale = |c: u8| ((c as u16 * a + 127) / 255) as u8;
    [scale(px[0]), scale(px[1]), scale(px[2])]
}
