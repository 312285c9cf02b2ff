use std::io::Cursor;

use mosaic_core::Raster;

use crate::error::RenderError;

/// Decode PNG or JPEG bytes into an RGBA raster.
///
/// The format is sniffed from the bytes; every color type and bit depth is
/// converted to 8-bit RGBA.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, RenderError> {
    let decoded = image::load_from_memory(bytes)?;
    let color_type = decoded.color();
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();

    tracing::debug!(width, height, color_type = ?color_type, "Decoded image");
    Ok(Raster::from_rgba(width, height, rgba.into_raw())?)
}

/// Encode non-premultiplied RGBA pixels as an 8-bit RGBA PNG.
///
/// With `optimize`, the result is re-compressed with oxipng; if that fails
/// the plain encoding is returned.
pub fn encode_png(
    width: u32,
    height: u32,
    rgba: &[u8],
    optimize: bool,
) -> Result<Vec<u8>, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::UnsupportedDimensions { width, height });
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if optimize {
            // oxipng picks filters and compression afterwards
            encoder.set_compression(png::Compression::Fast);
            encoder.set_filter(png::FilterType::NoFilter);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }
    let before = png_bytes.len();
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    tracing::debug!(before, after = optimized.len(), "Optimized PNG");
    Ok(optimized)
}
