use super::Raster;
use crate::color::Rgba;
use crate::error::MosaicError;

/// Destination rectangle in surface coordinates. Cells are fractional when
/// the output size is not a multiple of the grid resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Integer pixel region, used for reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A 2-D raster the composition pass draws into.
///
/// This is the only output capability the core needs; the application
/// provides a tiny-skia backed implementation, and [`Raster`] provides a
/// software one.
pub trait RasterSurface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the surface. Previous content is discarded.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), MosaicError>;

    /// Draw `raster` stretched to fill `dest`.
    fn draw_scaled(&mut self, raster: &Raster, dest: Rect);

    /// Fill `rect` with a (possibly translucent) color.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// RGBA bytes for `rect`, row-major. Parts outside the surface read as
    /// transparent black.
    fn read_pixels(&self, rect: PixelRect) -> Vec<u8>;
}
