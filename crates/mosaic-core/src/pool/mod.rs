//! Color-keyed tile pool and grid composition.

mod grid;
mod nearest;

pub use grid::TilePool;
pub use nearest::closest_color;
