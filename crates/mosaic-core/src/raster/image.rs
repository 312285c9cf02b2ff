use std::sync::Arc;

/// A decoded image the core can sample from.
///
/// Implementations return tightly packed RGBA8 rows for the requested region.
/// The region is always within `natural_width() x natural_height()`.
pub trait DecodedImage {
    fn natural_width(&self) -> u32;
    fn natural_height(&self) -> u32;

    /// RGBA bytes for the `width x height` region at `(x, y)`, row-major.
    fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<u8>;
}

/// Shared handle to a decoded image.
///
/// A [`TilePicture`](crate::TilePicture) keeps its image so it can re-render
/// on resize; the loader that produced the image may keep a handle too.
pub type SharedImage = Arc<dyn DecodedImage + Send + Sync>;
