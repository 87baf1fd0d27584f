//! Desktop window output for a surface (feature `window`)

use minifb::{Key, WindowOptions};

use super::raster::Surface;
use crate::error::SurfaceError;

/// A window sized to the surface it displays
pub struct Window {
    window: minifb::Window,
    width: usize,
    height: usize,
}

impl Window {
    /// Open a window matching the surface dimensions
    pub fn open(title: &str, surface: &Surface) -> Result<Self, SurfaceError> {
        let (width, height) = (surface.width() as usize, surface.height() as usize);
        let mut window = minifb::Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| SurfaceError::Window(e.to_string()))?;
        window.set_target_fps(60);
        log::info!("Window opened: {} ({}x{})", title, width, height);
        Ok(Self {
            window,
            width,
            height,
        })
    }

    /// Push the current raster to the screen
    pub fn present(&mut self, surface: &Surface) -> Result<(), SurfaceError> {
        self.window
            .update_with_buffer(&surface.to_rgb_u32(), self.width, self.height)
            .map_err(|e| SurfaceError::Window(e.to_string()))
    }

    /// False once the user closes the window or presses ESC
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }
}

impl Surface {
    /// Attach the surface to a desktop window and show its current pixels
    pub fn display(&self, title: &str) -> Result<Window, SurfaceError> {
        let mut window = Window::open(title, self)?;
        window.present(self)?;
        Ok(window)
    }
}
