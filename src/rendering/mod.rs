pub mod codec;
pub mod pixmap_surface;

pub use codec::{decode_image, encode_png};
pub use pixmap_surface::PixmapSurface;
