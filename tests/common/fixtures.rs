//! Test fixtures: image files and configs on disk.

use std::path::{Path, PathBuf};

use mosaic_core::{Color, Raster};
use photomosaic::models::{ImageSource, MosaicConfig};
use photomosaic::rendering::encode_png;
use tempfile::TempDir;

/// Colors used across tests
pub mod colors {
    use mosaic_core::Color;

    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const GREEN: Color = Color::from_rgb(0, 255, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
}

/// Encode a raster as PNG bytes
pub fn png_bytes(raster: &Raster) -> Vec<u8> {
    encode_png(raster.width(), raster.height(), raster.data(), false)
        .expect("Failed to encode fixture PNG")
}

/// Solid color PNG bytes
pub fn solid_png(width: u32, height: u32, color: Color) -> Vec<u8> {
    png_bytes(&Raster::solid(width, height, color))
}

/// Write a PNG into `dir` and return its source
pub fn write_png(dir: &Path, name: &str, raster: &Raster) -> ImageSource {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(raster)).expect("Failed to write fixture PNG");
    ImageSource::Path(path)
}

/// Write a solid color JPEG into `dir` and return its source
pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32, color: Color) -> ImageSource {
    let [r, g, b] = color.to_bytes();
    let path = dir.join(name);
    image::RgbImage::from_pixel(width, height, image::Rgb([r, g, b]))
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .expect("Failed to write fixture JPEG");
    ImageSource::Path(path)
}

/// A picture whose left half and right half have different colors
pub fn split_raster(width: u32, height: u32, left: Color, right: Color) -> Raster {
    let mut raster = Raster::new(width, height);
    let [lr, lg, lb] = left.to_bytes();
    let [rr, rg, rb] = right.to_bytes();
    for y in 0..height {
        for x in 0..width {
            let px = if x < width / 2 {
                [lr, lg, lb, 255]
            } else {
                [rr, rg, rb, 255]
            };
            raster.put_pixel(x, y, px);
        }
    }
    raster
}

/// A temp dir with a red/blue target and red, green and blue tiles
pub struct Workspace {
    pub dir: TempDir,
    pub target: ImageSource,
    pub tiles: Vec<ImageSource>,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let target = write_png(
            dir.path(),
            "target.png",
            &split_raster(40, 20, colors::RED, colors::BLUE),
        );
        let tiles = [
            ("red.png", colors::RED),
            ("green.png", colors::GREEN),
            ("blue.png", colors::BLUE),
        ]
        .iter()
        .map(|(name, color)| write_png(dir.path(), name, &Raster::solid(6, 6, *color)))
        .collect();

        Self { dir, target, tiles }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// A 40x20 output with a 4x2 grid and no color overlay
    pub fn config(&self) -> MosaicConfig {
        MosaicConfig {
            width: 40,
            height: 20,
            columns: 4,
            rows: 2,
            color_blending: 0.0,
            target: Some(self.target.clone()),
            tiles: self.tiles.clone(),
            output: self.path("mosaic.png"),
        }
    }
}
