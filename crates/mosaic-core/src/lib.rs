//! mosaic-core: photomosaic composition
//!
//! This library turns a source picture and a pool of small images into a
//! photomosaic. The source is sampled at one pixel per grid cell; every cell
//! is then drawn with the pool image whose average color is closest to that
//! pixel, optionally tinted toward the pixel's exact color.
//!
//! # Quick Start
//!
//! [`Mosaic`] is the primary entry point. It draws onto any
//! [`RasterSurface`]; the in-memory [`Raster`] is one.
//!
//! ```
//! use mosaic_core::{Color, Mosaic, Raster};
//!
//! let mut mosaic = Mosaic::new(Raster::default()).unwrap();
//! mosaic.set_size(100, 100, 10, 10).unwrap();
//!
//! for color in [Color::BLACK, Color::WHITE, Color::from_rgb(200, 30, 30)] {
//!     mosaic.add_to_grid(Raster::solid(16, 16, color).into_shared()).unwrap();
//! }
//! mosaic
//!     .set_source_image(Raster::solid(64, 64, Color::from_rgb(220, 40, 40)).into_shared())
//!     .unwrap();
//!
//! let output = mosaic.into_surface();
//! assert_eq!((output.width(), output.height()), (100, 100));
//! ```
//!
//! # Building Blocks
//!
//! - [`compute_crop_rect`] / [`resample`]: center-crop an image to a cell's
//!   aspect ratio and stretch it to the cell's pixel size, never letterboxing
//! - [`compute_average_color`]: truncated per-channel mean of RGBA bytes
//! - [`TilePicture`]: one image rendered at a fixed size with its average color
//! - [`TilePool`]: color-keyed tiles, nearest-color lookup and the composition pass
//! - [`LoadTracker`]: progress over a batch of asynchronous loads
//!
//! # Cell Geometry
//!
//! A `width x height` output split into `columns x rows` cells has cells of
//! `width / columns` by `height / rows` pixels, fractional when the division
//! is not exact. Tiles are rendered at the rounded-down cell size with
//! square pixels. The target is rendered at `columns x rows` pixels whose
//! aspect ratio is the cell's, so each of its pixels averages exactly the
//! region of the source its cell covers.
//!
//! ```text
//! source image ──crop/resample──> target (columns x rows)
//!                                     │ one pixel per cell
//!                                     v
//! tile images ──crop/resample──> tiles ──nearest color──> surface (width x height)
//! ```

pub mod color;
pub mod error;
pub mod mosaic;
pub mod pool;
pub mod progress;
pub mod raster;
pub mod sampler;
pub mod tile;


pub use color::{Color, ParseColorError, Rgba};
pub use error::{parse_dimension, parse_ratio, MosaicError};
pub use mosaic::Mosaic;
pub use pool::{closest_color, TilePool};
pub use progress::LoadTracker;
pub use raster::{DecodedImage, PixelRect, Raster, RasterSurface, Rect, SharedImage};
pub use sampler::{compute_average_color, compute_crop_rect, resample, CropRect};
pub use tile::TilePicture;
