use std::ops::Range;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::CropRect;
use crate::error::MosaicError;
use crate::raster::{DecodedImage, Raster};

/// Render the crop's source region of `image` into a new `dw x dh` raster.
///
/// The source rectangle is widened to whole pixels, read once and scaled
/// with a triangle (bilinear) filter. When downscaling, the filter widens
/// with the scale factor, so every destination pixel blends its whole
/// footprint.
///
/// # Errors
///
/// [`MosaicError::BufferSize`] when the image returns fewer bytes than the
/// region it was asked for.
pub fn resample<I: DecodedImage + ?Sized>(
    image: &I,
    crop: &CropRect,
) -> Result<Raster, MosaicError> {
    let dest_w = crop.dw as u32;
    let dest_h = crop.dh as u32;
    let (image_w, image_h) = (image.natural_width(), image.natural_height());
    if dest_w == 0 || dest_h == 0 || image_w == 0 || image_h == 0 {
        return Ok(Raster::new(dest_w, dest_h));
    }

    let cols = source_span(crop.sx, crop.sw, image_w);
    let rows = source_span(crop.sy, crop.sh, image_h);
    let region_w = cols.end - cols.start;
    let region_h = rows.end - rows.start;
    let pixels = image.read_pixels(cols.start, rows.start, region_w, region_h);

    let expected = region_w as usize * region_h as usize * 4;
    let actual = pixels.len();
    let region = RgbaImage::from_raw(region_w, region_h, pixels)
        .ok_or(MosaicError::BufferSize { expected, actual })?;

    let scaled = imageops::resize(&region, dest_w, dest_h, FilterType::Triangle);
    Raster::from_rgba(dest_w, dest_h, scaled.into_raw())
}

/// Integer pixel range covering `[start, start + len)`, clipped to the
/// image and never empty.
fn source_span(start: f64, len: f64, limit: u32) -> Range<u32> {
    let first = (start.floor().max(0.0) as u32).min(limit - 1);
    let end = ((start + len).ceil().max(0.0) as u32).clamp(first + 1, limit);
    first..end
}
