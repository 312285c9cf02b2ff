//! Representative-color extraction.
//!
//! A source image is center-cropped to the aspect ratio of its destination
//! cell ([`compute_crop_rect`]), stretched into a raster of the cell size
//! ([`resample`]), and reduced to one color ([`compute_average_color`]).

mod average;
mod crop;
mod resample;

pub use average::compute_average_color;
pub use crop::{compute_crop_rect, CropRect};
pub use resample::resample;
