//! Pixel buffers and the two capabilities the core consumes.
//!
//! - [`DecodedImage`]: a read-only source of RGBA pixels (the loader's output).
//! - [`RasterSurface`]: a 2-D drawing target (the composition output).
//!
//! [`Raster`] is an owned RGBA8 buffer implementing both, so the whole
//! pipeline runs without any rendering backend.

mod buffer;
mod image;
mod surface;

pub use buffer::Raster;
pub use image::{DecodedImage, SharedImage};
pub use surface::{PixelRect, RasterSurface, Rect};
