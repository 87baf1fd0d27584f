//! Software raster the pieces draw onto
//!
//! Creation, primitives and export live here; window output is behind the
//! `window` feature.

pub mod bitmap;
pub mod export;
pub mod raster;
#[cfg(feature = "window")]
pub mod window;

pub use bitmap::Bitmap;
pub use export::ExportFormat;
pub use raster::{Surface, SurfaceHandle};
#[cfg(feature = "window")]
pub use window::Window;
