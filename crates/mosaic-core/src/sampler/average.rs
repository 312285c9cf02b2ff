use crate::color::Color;
use crate::error::MosaicError;

/// Mean color of an RGBA buffer.
///
/// Each channel is summed over every pixel, divided by the pixel count as a
/// float and truncated toward zero. Alpha is ignored. Trailing bytes that do
/// not form a whole pixel are ignored.
///
/// # Errors
///
/// [`MosaicError::InvalidDimensions`] for a buffer without a single pixel.
///
/// # Example
///
/// ```
/// use mosaic_core::{compute_average_color, Color};
///
/// let pixels = [255, 0, 0, 255, 0, 0, 0, 255];
/// assert_eq!(compute_average_color(&pixels).unwrap(), Color::from_rgb(127, 0, 0));
/// ```
pub fn compute_average_color(pixels: &[u8]) -> Result<Color, MosaicError> {
    let count = pixels.len() / 4;
    if count == 0 {
        return Err(MosaicError::dimensions("cannot average an empty buffer"));
    }

    let (mut red, mut green, mut blue) = (0u64, 0u64, 0u64);
    for pixel in pixels.chunks_exact(4) {
        red += pixel[0] as u64;
        green += pixel[1] as u64;
        blue += pixel[2] as u64;
    }

    let count = count as f64;
    Ok(Color::from_rgb(
        (red as f64 / count) as u8,
        (green as f64 / count) as u8,
        (blue as f64 / count) as u8,
    ))
}
