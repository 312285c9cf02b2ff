//! A single source image rendered at cell size.

mod picture;

pub use picture::TilePicture;
