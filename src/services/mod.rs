pub mod inspect;
pub mod loader;
pub mod pipeline;

pub use inspect::{CropReport, InspectReport};
pub use loader::ImageLoader;
pub use pipeline::{MosaicPipeline, RenderReport};
