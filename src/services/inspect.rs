use mosaic_core::{compute_crop_rect, MosaicError, Raster, TilePicture};
use serde::Serialize;

use crate::models::ImageSource;

/// How one image would be sampled as a tile or target.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InspectReport {
    pub source: String,
    pub natural_width: u32,
    pub natural_height: u32,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    pub crop: CropReport,
    /// `#rrggbb`
    pub average_color: String,
}

/// Source rectangle taken from the image.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CropReport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl InspectReport {
    /// Sample `image` at `width x height` pixels of the given aspect ratio.
    pub fn new(
        source: &ImageSource,
        image: Raster,
        width: u32,
        height: u32,
        aspect_ratio: f64,
    ) -> Result<Self, MosaicError> {
        let (natural_width, natural_height) = (image.width(), image.height());
        let crop = compute_crop_rect(natural_width, natural_height, width, height, aspect_ratio)?;
        let tile = TilePicture::with_image(image.into_shared(), width, height, aspect_ratio)?;
        let average_color = tile
            .average_color()
            .ok_or_else(|| MosaicError::InvalidDimensions(format!("{width}x{height}")))?;

        Ok(Self {
            source: source.to_string(),
            natural_width,
            natural_height,
            width,
            height,
            aspect_ratio,
            crop: CropReport {
                x: crop.sx,
                y: crop.sy,
                width: crop.sw,
                height: crop.sh,
            },
            average_color: average_color.to_string(),
        })
    }
}
