use std::fmt;

use crate::color::Color;
use crate::error::MosaicError;
use crate::raster::{Raster, SharedImage};
use crate::sampler::{compute_average_color, compute_crop_rect, resample};

/// One picture of the mosaic: a source image, center-cropped and stretched
/// into an owned raster of a fixed size, plus that raster's average color.
///
/// Rendering is eager. Every [`set_size`](Self::set_size) and
/// [`set_image`](Self::set_image) re-renders immediately, so the cached
/// raster and color always belong to the latest size/image pair. While the
/// picture has no image, or a zero size, rendering is skipped and the
/// picture stays empty; this is the normal state while images load.
///
/// # Example
///
/// ```
/// use mosaic_core::{Color, Raster, TilePicture};
///
/// let image = Raster::solid(40, 20, Color::from_rgb(200, 10, 10)).into_shared();
/// let tile = TilePicture::with_image(image, 8, 8, 1.0).unwrap();
///
/// assert_eq!(tile.average_color(), Some(Color::from_rgb(200, 10, 10)));
/// assert_eq!(tile.raster().width(), 8);
/// ```
#[derive(Clone)]
pub struct TilePicture {
    aspect_ratio: f64,
    width: u32,
    height: u32,
    image: Option<SharedImage>,
    raster: Raster,
    average_color: Option<Color>,
}

impl TilePicture {
    /// An empty picture of the given raster size.
    pub fn new(width: u32, height: u32, aspect_ratio: f64) -> Result<Self, MosaicError> {
        let mut tile = Self {
            aspect_ratio: 1.0,
            width: 0,
            height: 0,
            image: None,
            raster: Raster::default(),
            average_color: None,
        };
        tile.set_size(width, height, aspect_ratio)?;
        Ok(tile)
    }

    /// A picture rendered from `image` right away.
    pub fn with_image(
        image: SharedImage,
        width: u32,
        height: u32,
        aspect_ratio: f64,
    ) -> Result<Self, MosaicError> {
        let mut tile = Self::new(width, height, aspect_ratio)?;
        tile.set_image(image)?;
        Ok(tile)
    }

    /// Change the raster size and pixel aspect ratio, then re-render.
    ///
    /// # Errors
    ///
    /// [`MosaicError::InvalidDimensions`] for a non-positive or non-finite
    /// aspect ratio, or when the image itself has no pixels.
    pub fn set_size(
        &mut self,
        width: u32,
        height: u32,
        aspect_ratio: f64,
    ) -> Result<(), MosaicError> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(MosaicError::dimensions(format!(
                "aspect ratio {aspect_ratio} is not positive"
            )));
        }
        self.aspect_ratio = aspect_ratio;
        self.width = width;
        self.height = height;
        self.render()
    }

    /// Replace the source image and re-render.
    pub fn set_image(&mut self, image: SharedImage) -> Result<(), MosaicError> {
        self.image = Some(image);
        self.render()
    }

    fn render(&mut self) -> Result<(), MosaicError> {
        // the raster always has the requested size, even before an image arrives
        self.raster = Raster::new(self.width, self.height);
        self.average_color = None;

        let Some(image) = self.image.as_ref() else {
            return Ok(());
        };
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        let crop = compute_crop_rect(
            image.natural_width(),
            image.natural_height(),
            self.width,
            self.height,
            self.aspect_ratio,
        )?;
        self.raster = resample(image.as_ref(), &crop)?;
        let color = compute_average_color(self.raster.data())?;
        self.average_color = Some(color);

        tracing::trace!(
            width = self.width,
            height = self.height,
            color = %color,
            "Rendered tile picture"
        );
        Ok(())
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
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Average color of the current render, `None` while the picture is empty.
    #[inline]
    pub fn average_color(&self) -> Option<Color> {
        self.average_color
    }

    #[inline]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    #[inline]
    pub fn image(&self) -> Option<&SharedImage> {
        self.image.as_ref()
    }

    /// The cropped render, `width x height`.
    #[inline]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// RGBA bytes of the cropped render.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.raster.data()
    }
}

impl fmt::Debug for TilePicture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TilePicture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("aspect_ratio", &self.aspect_ratio)
            .field("has_image", &self.image.is_some())
            .field("average_color", &self.average_color)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn split_image() -> SharedImage {
        // left half red, right half blue
        let mut raster = Raster::new(20, 10);
        for y in 0..10 {
            for x in 0..20 {
                let px = if x < 10 {
                    [255, 0, 0, 255]
                } else {
                    [0, 0, 255, 255]
                };
                raster.put_pixel(x, y, px);
            }
        }
        raster.into_shared()
    }

    #[test]
    fn test_empty_until_image_is_set() {
        let mut tile = TilePicture::new(4, 4, 1.0).unwrap();
        assert!(!tile.has_image());
        assert_eq!(tile.average_color(), None);
        assert_eq!(tile.raster().pixel_count(), 16);

        tile.set_image(Raster::solid(3, 3, Color::WHITE).into_shared())
            .unwrap();
        assert_eq!(tile.average_color(), Some(Color::WHITE));
    }

    #[test]
    fn test_zero_size_skips_render() {
        let image = Raster::solid(3, 3, Color::WHITE).into_shared();
        let mut tile = TilePicture::with_image(image, 0, 5, 1.0).unwrap();
        assert_eq!(tile.average_color(), None);
        assert!(tile.raster().is_empty());

        tile.set_size(2, 2, 1.0).unwrap();
        assert_eq!(tile.average_color(), Some(Color::WHITE));
    }

    #[test]
    fn test_set_size_recomputes_color() {
        // a square cell sees the centered square: half red, half blue
        let mut tile = TilePicture::with_image(split_image(), 2, 2, 1.0).unwrap();
        assert_eq!(tile.average_color(), Some(Color::from_rgb(127, 0, 127)));

        // a 2:1 cell sees the whole image, still half and half
        tile.set_size(4, 2, 1.0).unwrap();
        assert_eq!(tile.raster().pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(tile.raster().pixel(3, 1), [0, 0, 255, 255]);

        // a tall cell crops to the middle column pair
        tile.set_size(1, 10, 1.0).unwrap();
        assert_eq!(tile.average_color(), Some(Color::from_rgb(127, 0, 127)));
    }

    #[test]
    fn test_set_size_is_idempotent() {
        let mut tile = TilePicture::with_image(split_image(), 3, 5, 1.5).unwrap();
        tile.set_size(7, 3, 1.25).unwrap();
        let raster = tile.raster().clone();
        let color = tile.average_color();

        tile.set_size(7, 3, 1.25).unwrap();
        assert_eq!(tile.raster(), &raster);
        assert_eq!(tile.average_color(), color);
    }

    #[test]
    fn test_invalid_aspect_ratio() {
        assert!(matches!(
            TilePicture::new(4, 4, 0.0),
            Err(MosaicError::InvalidDimensions(_))
        ));
        let mut tile = TilePicture::new(4, 4, 1.0).unwrap();
        assert!(tile.set_size(4, 4, f64::NAN).is_err());
        assert_eq!(tile.aspect_ratio(), 1.0, "failed resize keeps old state");
    }

    #[test]
    fn test_image_without_pixels_fails() {
        let image = Raster::new(0, 0).into_shared();
        let mut tile = TilePicture::new(4, 4, 1.0).unwrap();
        assert!(matches!(
            tile.set_image(image),
            Err(MosaicError::InvalidDimensions(_))
        ));
        assert_eq!(tile.average_color(), None);
    }
}
