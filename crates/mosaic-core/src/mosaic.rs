//! The top-level mosaic: sizing, loading state and composition triggers.

use crate::error::MosaicError;
use crate::pool::TilePool;
use crate::progress::LoadTracker;
use crate::raster::{RasterSurface, SharedImage};
use crate::tile::TilePicture;

pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 300;
pub const DEFAULT_COLUMNS: u32 = 10;
pub const DEFAULT_ROWS: u32 = 10;

/// A photomosaic under construction.
///
/// Owns the tile pool (and through it the output surface), the source image
/// and a [`LoadTracker`]. Composition happens when the last outstanding load
/// completes while a source is set, when a source arrives with nothing
/// outstanding, and on resize once tiles and a target exist.
///
/// # Example
///
/// ```
/// use mosaic_core::{Color, Mosaic, Raster};
///
/// let mut mosaic = Mosaic::new(Raster::default()).unwrap();
/// mosaic.set_size(40, 40, 2, 2).unwrap();
/// mosaic.set_color_blending(0.0).unwrap();
///
/// mosaic.begin_load();
/// mosaic.add_to_grid(Raster::solid(8, 8, Color::WHITE).into_shared()).unwrap();
/// mosaic.complete_load().unwrap();
///
/// mosaic.set_source_image(Raster::solid(4, 4, Color::BLACK).into_shared()).unwrap();
/// assert_eq!(mosaic.surface().pixel(39, 39), [255, 255, 255, 255]);
/// ```
pub struct Mosaic<S> {
    pool: TilePool<S>,
    source: Option<SharedImage>,
    loads: LoadTracker,
}

impl<S: RasterSurface> Mosaic<S> {
    /// A 300x300 mosaic with a 10x10 grid drawn onto `surface`.
    pub fn new(surface: S) -> Result<Self, MosaicError> {
        let mut pool = TilePool::new(surface);
        pool.set_size(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_COLUMNS, DEFAULT_ROWS)?;
        Ok(Self {
            pool,
            source: None,
            loads: LoadTracker::new(),
        })
    }

    /// Resize the output and the grid. A zero keeps the current value.
    ///
    /// Re-composes when a target and at least one tile exist.
    pub fn set_size(
        &mut self,
        width: u32,
        height: u32,
        columns: u32,
        rows: u32,
    ) -> Result<(), MosaicError> {
        let keep = |value: u32, current: u32| if value == 0 { current } else { value };
        let width = keep(width, self.pool.width());
        let height = keep(height, self.pool.height());
        let columns = keep(columns, self.pool.columns());
        let rows = keep(rows, self.pool.rows());

        self.pool.set_size(width, height, columns, rows)?;
        if self.pool.target().is_some() && self.pool.pool_size() > 0 {
            self.pool.draw_grid()?;
        }
        Ok(())
    }

    pub fn set_width(&mut self, width: u32) -> Result<(), MosaicError> {
        self.set_size(width, 0, 0, 0)
    }

    pub fn set_height(&mut self, height: u32) -> Result<(), MosaicError> {
        self.set_size(0, height, 0, 0)
    }

    pub fn set_columns(&mut self, columns: u32) -> Result<(), MosaicError> {
        self.set_size(0, 0, columns, 0)
    }

    pub fn set_rows(&mut self, rows: u32) -> Result<(), MosaicError> {
        self.set_size(0, 0, 0, rows)
    }

    pub fn width(&self) -> u32 {
        self.pool.width()
    }

    pub fn height(&self) -> u32 {
        self.pool.height()
    }

    pub fn columns(&self) -> u32 {
        self.pool.columns()
    }

    pub fn rows(&self) -> u32 {
        self.pool.rows()
    }

    pub fn color_blending(&self) -> f64 {
        self.pool.color_blending()
    }

    pub fn set_color_blending(&mut self, value: f64) -> Result<(), MosaicError> {
        self.pool.set_color_blending(value)
    }

    /// Width over height of one grid cell, e.g. `16/9` for 16:9 cells.
    pub fn pixel_aspect_ratio(&self) -> f64 {
        self.pool.pixel_aspect_ratio()
    }

    pub fn load_progress(&self) -> f64 {
        self.loads.progress()
    }

    /// Register an image load that has started.
    pub fn begin_load(&mut self) {
        self.loads.begin();
    }

    /// Register a finished load, successful or not.
    ///
    /// Returns `true` when it was the last outstanding one; the mosaic is
    /// then composed if a source is set.
    pub fn complete_load(&mut self) -> Result<bool, MosaicError> {
        let finished = self.loads.complete();
        if finished {
            tracing::debug!(pool_size = self.pool.pool_size(), "All loads completed");
            self.check_load_status()?;
        }
        Ok(finished)
    }

    /// Use `image` as the picture the mosaic reproduces.
    pub fn set_source_image(&mut self, image: SharedImage) -> Result<(), MosaicError> {
        self.source = Some(image);
        self.check_load_status()
    }

    /// Render `image` at tile size and add it to the pool.
    ///
    /// Returns the tile that had the same average color, if any.
    pub fn add_to_grid(&mut self, image: SharedImage) -> Result<Option<TilePicture>, MosaicError> {
        let (width, height) = self.pool.tile_size();
        let tile = TilePicture::with_image(image, width, height, 1.0)?;
        self.pool.add_picture(tile)
    }

    /// Compose again with the current tiles and target.
    pub fn redraw(&mut self) -> Result<(), MosaicError> {
        self.pool.draw_grid()
    }

    fn check_load_status(&mut self) -> Result<(), MosaicError> {
        if self.loads.progress() < 1.0 {
            return Ok(());
        }
        let Some(source) = self.source.clone() else {
            return Ok(());
        };
        let target = TilePicture::with_image(
            source,
            self.pool.columns(),
            self.pool.rows(),
            self.pool.pixel_aspect_ratio(),
        )?;
        tracing::debug!(
            columns = self.pool.columns(),
            rows = self.pool.rows(),
            pool_size = self.pool.pool_size(),
            "Composing mosaic"
        );
        self.pool.set_target(target)
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn pool(&self) -> &TilePool<S> {
        &self.pool
    }

    pub fn surface(&self) -> &S {
        self.pool.surface()
    }

    pub fn into_surface(self) -> S {
        self.pool.into_surface()
    }
}
