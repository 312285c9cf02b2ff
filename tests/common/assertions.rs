//! Assertion helpers for tests.

use mosaic_core::{Color, Raster};
use photomosaic::rendering::decode_image;
use pretty_assertions::assert_eq;

/// Assert bytes are a PNG and decode them
pub fn assert_png(bytes: &[u8]) -> Raster {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    decode_image(bytes).expect("PNG should decode")
}

/// Assert a pixel has the given opaque color, allowing off-by-one rounding
pub fn assert_pixel(raster: &Raster, x: u32, y: u32, expected: Color) {
    assert_pixel_near(raster, x, y, expected, 1);
}

/// Assert a pixel is opaque and within `tolerance` of `expected` per channel
pub fn assert_pixel_near(raster: &Raster, x: u32, y: u32, expected: Color, tolerance: i16) {
    let actual = raster.pixel(x, y);
    let [r, g, b] = expected.to_bytes();
    let close = |a: u8, e: u8| (a as i16 - e as i16).abs() <= tolerance;
    assert!(
        close(actual[0], r) && close(actual[1], g) && close(actual[2], b) && actual[3] == 255,
        "Pixel ({x}, {y}) is {actual:?}, expected {expected}"
    );
}

/// Assert raster dimensions
pub fn assert_size(raster: &Raster, width: u32, height: u32) {
    assert_eq!(
        (raster.width(), raster.height()),
        (width, height),
        "Unexpected raster size"
    );
}
