use mosaic_core::{MosaicError, PixelRect, Raster, RasterSurface, Rect, Rgba};
use tiny_skia::{
    ColorU8, FilterQuality, Paint, Pixmap, PixmapPaint, PremultipliedColorU8, Transform,
};

use crate::error::RenderError;
use crate::rendering::codec::encode_png;

/// Output surface backed by a tiny-skia pixmap.
///
/// Tiles are drawn with bilinear filtering and cell fills are anti-aliased,
/// so fractional cell sizes blend smoothly at their edges.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Non-premultiplied RGBA bytes of the whole surface.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Encode the surface as PNG, optionally optimized with oxipng.
    pub fn encode_png(&self, optimize: bool) -> Result<Vec<u8>, RenderError> {
        encode_png(
            self.pixmap.width(),
            self.pixmap.height(),
            &self.to_rgba(),
            optimize,
        )
    }
}

/// Premultiplied copy of `raster`, `None` when it has no pixels.
fn to_pixmap(raster: &Raster) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(raster.width(), raster.height())?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(raster.data().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

impl RasterSurface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), MosaicError> {
        self.pixmap = Pixmap::new(width, height).ok_or_else(|| {
            MosaicError::Surface(format!("failed to allocate {width}x{height} pixmap"))
        })?;
        Ok(())
    }

    fn draw_scaled(&mut self, raster: &Raster, dest: Rect) {
        let Some(tile) = to_pixmap(raster) else {
            return;
        };
        let scale_x = dest.width / raster.width() as f64;
        let scale_y = dest.height / raster.height() as f64;
        let transform = Transform::from_scale(scale_x as f32, scale_y as f32)
            .post_translate(dest.x as f32, dest.y as f32);
        self.pixmap.draw_pixmap(
            0,
            0,
            tile.as_ref(),
            &PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..Default::default()
            },
            transform,
            None,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(rect) = tiny_skia::Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };
        let [r, g, b] = color.color.to_bytes();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, color.alpha_u8());
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn read_pixels(&self, rect: PixelRect) -> Vec<u8> {
        let mut out = Vec::with_capacity(rect.width as usize * rect.height as usize * 4);
        for y in 0..rect.height {
            for x in 0..rect.width {
                let pixel = rect
                    .x
                    .checked_add(x)
                    .zip(rect.y.checked_add(y))
                    .and_then(|(px, py)| self.pixmap.pixel(px, py))
                    .unwrap_or(PremultipliedColorU8::TRANSPARENT)
                    .demultiply();
                out.extend_from_slice(&[pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]);
            }
        }
        out
    }
}
