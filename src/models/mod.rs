pub mod config;
pub mod source;

pub use config::{MosaicConfig, RenderOverrides};
pub use source::ImageSource;
