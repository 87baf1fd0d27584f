//! Bitmap-backed pieces
//!
//! Loading is two-phase: `ImagePiece::load` starts decoding on a background
//! thread and returns a zero-sized piece; the host applies the result with
//! `poll_load` (non-blocking) or `wait_loaded` (blocking). Width and height
//! stay 0 until then.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use glam::Vec2;

use super::piece::{Piece, Sprite};
use crate::error::LoadError;
use crate::style::PieceStyle;
use crate::surface::{Bitmap, SurfaceHandle};

/// Invoked once on the host thread when the bitmap is ready
pub type OnLoad = Box<dyn FnOnce(&Bitmap)>;

/// Progress of an image piece's bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(LoadError),
}

struct PendingLoad {
    rx: Receiver<Result<Bitmap, LoadError>>,
    on_load: Option<OnLoad>,
}

/// A piece painted from a bitmap
pub struct ImagePiece {
    piece: Piece,
    bitmap: Option<Bitmap>,
    state: LoadState,
    pending: Option<PendingLoad>,
}

impl ImagePiece {
    /// Start loading `source` and return the (still empty) piece
    pub fn load(
        source: impl Into<PathBuf>,
        surface: &SurfaceHandle,
        on_load: Option<OnLoad>,
    ) -> Self {
        let source = source.into();
        let (tx, rx) = mpsc::channel();
        let piece = Piece::new(0.0, 0.0, surface, PieceStyle::piece());

        let path = source.clone();
        let spawned = std::thread::Builder::new()
            .name("bitmap-loader".into())
            .spawn(move || {
                // Receiver may be gone if the piece was dropped; nothing to do then
                let _ = tx.send(Bitmap::open(&path));
            });

        match spawned {
            Ok(_) => Self {
                piece,
                bitmap: None,
                state: LoadState::Pending,
                pending: Some(PendingLoad { rx, on_load }),
            },
            Err(e) => {
                let err = LoadError::Decode {
                    source: source.display().to_string(),
                    reason: e.to_string(),
                };
                log::warn!("{}", err);
                Self {
                    piece,
                    bitmap: None,
                    state: LoadState::Failed(err),
                    pending: None,
                }
            }
        }
    }

    /// Build a piece around an already decoded bitmap
    pub fn from_bitmap(bitmap: Bitmap, surface: &SurfaceHandle) -> Self {
        let piece = Piece::new(
            bitmap.width() as f32,
            bitmap.height() as f32,
            surface,
            PieceStyle::piece(),
        );
        Self {
            piece,
            bitmap: Some(bitmap),
            state: LoadState::Loaded,
            pending: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Apply a finished load if one is waiting, without blocking
    pub fn poll_load(&mut self) -> &LoadState {
        let received = self.pending.as_ref().map(|p| p.rx.try_recv());
        match received {
            Some(Ok(result)) => self.finish(result),
            Some(Err(TryRecvError::Disconnected)) => self.finish(Err(LoadError::Disconnected)),
            Some(Err(TryRecvError::Empty)) | None => {}
        }
        &self.state
    }

    /// Block until the load resolves
    pub fn wait_loaded(&mut self) -> Result<(), LoadError> {
        let received = self.pending.as_ref().map(|p| p.rx.recv());
        if let Some(result) = received {
            self.finish(result.unwrap_or(Err(LoadError::Disconnected)));
        }
        match &self.state {
            LoadState::Loaded => Ok(()),
            LoadState::Failed(e) => Err(e.clone()),
            LoadState::Pending => Err(LoadError::Disconnected),
        }
    }

    fn finish(&mut self, result: Result<Bitmap, LoadError>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match result {
            Ok(bitmap) => {
                log::info!("Bitmap loaded ({}x{})", bitmap.width(), bitmap.height());
                self.piece
                    .set_size(Vec2::new(bitmap.width() as f32, bitmap.height() as f32));
                self.state = LoadState::Loaded;
                if let Some(on_load) = pending.on_load {
                    on_load(&bitmap);
                }
                self.bitmap = Some(bitmap);
            }
            Err(e) => {
                log::warn!("{}", e);
                self.state = LoadState::Failed(e);
            }
        }
    }

    /// Paint at viewport coordinates (x, y), sized to the override when positive
    ///
    /// The surface's origin is subtracted so the stored position is surface-local.
    pub fn draw_sized(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let origin = self.piece.surface().borrow().origin();
        self.paint(Vec2::new(x, y) - origin, Vec2::new(width, height));
    }

    fn paint(&mut self, local: Vec2, size_override: Vec2) {
        self.piece.set_position(local);
        let w = if size_override.x > 0.0 { size_override.x } else { self.piece.width() };
        let h = if size_override.y > 0.0 { size_override.y } else { self.piece.height() };
        if let Some(bitmap) = &self.bitmap {
            self.piece
                .surface()
                .borrow_mut()
                .draw_image(bitmap, local.x, local.y, w, h);
        }
    }
}

impl Sprite for ImagePiece {
    fn piece(&self) -> &Piece {
        &self.piece
    }

    fn piece_mut(&mut self) -> &mut Piece {
        &mut self.piece
    }

    /// Paint at surface-local (x, y) with the stored size
    fn draw(&mut self, x: f32, y: f32) {
        self.paint(Vec2::new(x, y), Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use crate::surface::Surface;
    use std::cell::Cell;
    use std::rc::Rc;

    fn board(w: u32, h: u32) -> SurfaceHandle {
        Surface::shared(w, h).unwrap()
    }

    /// Write a solid PNG; the returned guard removes it on drop
    fn temp_png(name: &str, w: u32, h: u32) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        Bitmap::solid(w, h, Color::BLUE).image().save(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn test_from_bitmap_takes_bitmap_size() {
        let surface = board(100, 100);
        let piece = ImagePiece::from_bitmap(Bitmap::solid(12, 7, Color::RED), &surface);
        assert!(piece.is_loaded());
        assert_eq!(piece.piece().width(), 12.0);
        assert_eq!(piece.piece().height(), 7.0);
        assert_eq!(piece.piece().position(), Vec2::new(38.0, 43.0));
    }

    #[test]
    fn test_draw_uses_override_size() {
        let surface = board(50, 50);
        let mut piece = ImagePiece::from_bitmap(Bitmap::solid(4, 4, Color::RED), &surface);
        piece.draw_sized(10.0, 10.0, 8.0, 2.0);
        let s = surface.borrow();
        assert_eq!(s.pixel(17, 11), Some(Color::RED));
        assert_eq!(s.pixel(17, 12), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(18, 10), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_draw_translates_viewport_coordinates() {
        let surface = board(50, 50);
        surface.borrow_mut().set_origin(100.0, 20.0);
        let mut piece = ImagePiece::from_bitmap(Bitmap::solid(2, 2, Color::RED), &surface);
        piece.draw_sized(105.0, 25.0, 0.0, 0.0);
        assert_eq!(piece.piece().position(), Vec2::new(5.0, 5.0));
        assert_eq!(surface.borrow().pixel(5, 5), Some(Color::RED));
        assert_eq!(surface.borrow().pixel(7, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_sprite_draw_is_surface_local() {
        let surface = board(50, 50);
        surface.borrow_mut().set_origin(100.0, 20.0);
        let mut piece = ImagePiece::from_bitmap(Bitmap::solid(2, 2, Color::RED), &surface);
        piece.draw(5.0, 5.0);
        assert_eq!(piece.piece().position(), Vec2::new(5.0, 5.0));
        assert_eq!(surface.borrow().pixel(5, 5), Some(Color::RED));
    }

    #[test]
    fn test_move_stays_surface_local() {
        let surface = board(50, 50);
        surface.borrow_mut().set_origin(100.0, 20.0);
        let mut piece = ImagePiece::from_bitmap(Bitmap::solid(4, 4, Color::RED), &surface);
        assert!(piece.move_to(10.0, 10.0));
        assert!(piece.go_right());
        assert_eq!(piece.piece().position(), Vec2::new(16.0, 10.0));
        assert_eq!(surface.borrow().pixel(16, 10), Some(Color::RED));
        assert_eq!(surface.borrow().pixel(10, 10), Some(Color::TRANSPARENT));
        assert!(!piece.move_to(46.0, 10.0));
    }

    #[test]
    fn test_async_load_sets_size_and_fires_callback() {
        let (_dir, path) = temp_png("async.png", 9, 5);
        let surface = board(64, 64);
        let fired = Rc::new(Cell::new(0u32));
        let seen = fired.clone();

        let mut piece = ImagePiece::load(
            &path,
            &surface,
            Some(Box::new(move |bm: &Bitmap| seen.set(bm.width() * 100 + bm.height()))),
        );
        assert_eq!(piece.piece().width(), 0.0);

        piece.wait_loaded().unwrap();
        assert!(piece.is_loaded());
        assert_eq!(piece.piece().size(), Vec2::new(9.0, 5.0));
        assert_eq!(fired.get(), 905);

        // Already resolved: polling and waiting again are no-ops
        assert_eq!(piece.poll_load(), &LoadState::Loaded);
        assert!(piece.wait_loaded().is_ok());
    }

    #[test]
    fn test_poll_eventually_loads() {
        let (_dir, path) = temp_png("poll.png", 3, 3);
        let surface = board(64, 64);
        let mut piece = ImagePiece::load(&path, &surface, None);
        let mut tries = 0;
        while piece.poll_load() == &LoadState::Pending && tries < 500 {
            std::thread::sleep(std::time::Duration::from_millis(10));
            tries += 1;
        }
        assert!(piece.is_loaded());
        assert_eq!(piece.piece().size(), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_failed_load_keeps_zero_size() {
        let surface = board(64, 64);
        let fired = Rc::new(Cell::new(false));
        let seen = fired.clone();
        let mut piece = ImagePiece::load(
            "/definitely/not/here.png",
            &surface,
            Some(Box::new(move |_: &Bitmap| seen.set(true))),
        );

        let err = piece.wait_loaded().unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
        assert!(matches!(piece.state(), LoadState::Failed(_)));
        assert_eq!(piece.piece().size(), Vec2::ZERO);
        assert!(!fired.get());

        // Drawing before a bitmap exists paints nothing
        piece.draw_sized(1.0, 1.0, 10.0, 10.0);
        assert_eq!(surface.borrow().pixel(2, 2), Some(Color::TRANSPARENT));
    }
}
