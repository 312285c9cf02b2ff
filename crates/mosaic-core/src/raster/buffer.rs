//! Owned RGBA8 pixel buffer with software compositing.

use std::sync::Arc;

use super::{DecodedImage, PixelRect, RasterSurface, Rect, SharedImage};
use crate::color::{Color, Rgba};
use crate::error::MosaicError;

/// An owned, non-premultiplied RGBA8 buffer in row-major order.
///
/// `Raster` is the cropped render a [`TilePicture`](crate::TilePicture)
/// owns, an in-memory [`DecodedImage`], and a software [`RasterSurface`]
/// (nearest-neighbour scaling, source-over blending).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// A transparent black raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap existing RGBA bytes.
    ///
    /// # Errors
    ///
    /// [`MosaicError::BufferSize`] when `data.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MosaicError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| MosaicError::dimensions(format!("{width}x{height} overflows")))?;
        if data.len() != expected {
            return Err(MosaicError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// An opaque raster filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let [r, g, b] = color.to_bytes();
        let data = [r, g, b, 255].repeat(width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    pub fn into_shared(self) -> SharedImage {
        Arc::new(self)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel index range whose centers fall inside `[start, start + len)`,
    /// clipped to `0..limit`.
    fn covered(start: f64, len: f64, limit: u32) -> std::ops::Range<u32> {
        if !start.is_finite() || !len.is_finite() || len <= 0.0 {
            return 0..0;
        }
        let first = (start - 0.5).ceil().max(0.0);
        let end = (start + len - 0.5).ceil().min(limit as f64);
        if end <= first {
            return 0..0;
        }
        first as u32..end as u32
    }

    fn blend(&mut self, x: u32, y: u32, src: [u8; 3], alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        let i = self.offset(x, y);
        let dst = &mut self.data[i..i + 4];
        if alpha >= 1.0 {
            dst.copy_from_slice(&[src[0], src[1], src[2], 255]);
            return;
        }

        let dst_alpha = dst[3] as f64 / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        for c in 0..3 {
            let value =
                (src[c] as f64 * alpha + dst[c] as f64 * dst_alpha * (1.0 - alpha)) / out_alpha;
            dst[c] = value.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl DecodedImage for Raster {
    fn natural_width(&self) -> u32 {
        self.width
    }

    fn natural_height(&self) -> u32 {
        self.height
    }

    fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u8> {
        RasterSurface::read_pixels(self, PixelRect::new(x, y, width, height))
    }
}

impl RasterSurface for Raster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), MosaicError> {
        *self = Raster::new(width, height);
        Ok(())
    }

    fn draw_scaled(&mut self, raster: &Raster, dest: Rect) {
        if raster.is_empty() {
            return;
        }
        let scale_x = raster.width as f64 / dest.width;
        let scale_y = raster.height as f64 / dest.height;

        for y in Self::covered(dest.y, dest.height, self.height) {
            let sy = ((y as f64 + 0.5 - dest.y) * scale_y) as u32;
            let sy = sy.min(raster.height - 1);
            for x in Self::covered(dest.x, dest.width, self.width) {
                let sx = ((x as f64 + 0.5 - dest.x) * scale_x) as u32;
                let sx = sx.min(raster.width - 1);
                let [r, g, b, a] = raster.pixel(sx, sy);
                self.blend(x, y, [r, g, b], a as f64 / 255.0);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let alpha = color.alpha.clamp(0.0, 1.0);
        let rgb = color.color.to_bytes();
        for y in Self::covered(rect.y, rect.height, self.height) {
            for x in Self::covered(rect.x, rect.width, self.width) {
                self.blend(x, y, rgb, alpha);
            }
        }
    }

    fn read_pixels(&self, rect: PixelRect) -> Vec<u8> {
        let mut out = vec![0u8; rect.width as usize * rect.height as usize * 4];
        for row in 0..rect.height {
            let y = rect.y as u64 + row as u64;
            if y >= self.height as u64 {
                break;
            }
            let x_end = (rect.x as u64 + rect.width as u64).min(self.width as u64);
            if rect.x as u64 >= x_end {
                break;
            }
            let count = (x_end - rect.x as u64) as usize * 4;
            let src = (y as usize * self.width as usize + rect.x as usize) * 4;
            let dst = row as usize * rect.width as usize * 4;
            out[dst..dst + count].copy_from_slice(&self.data[src..src + count]);
        }
        out
    }
}
