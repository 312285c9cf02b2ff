//! Color types
//!
//! - [`Color`]: packed 24-bit RGB, the identity key of a tile.
//! - [`Rgba`]: a color plus a fractional alpha, used for translucent fills.

mod rgb;
mod rgba;

pub use rgb::{Color, ParseColorError};
pub use rgba::Rgba;
