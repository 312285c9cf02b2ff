use futures_util::stream::{FuturesUnordered, StreamExt};
use mosaic_core::{Mosaic, MosaicError, Raster, RasterSurface};

use crate::error::{LoadError, RenderError};
use crate::models::{ImageSource, MosaicConfig};
use crate::rendering::PixmapSurface;
use crate::services::ImageLoader;

/// What an image is loaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Target,
    Tile,
}

/// Counts from one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Distinct tiles in the pool after loading
    pub pool_size: usize,
    /// Tiles that loaded and decoded
    pub tiles_loaded: usize,
    /// Tiles that replaced an earlier tile of the same average color
    pub tiles_replaced: usize,
    /// Loads that failed (target included)
    pub failed: usize,
}

/// Loads every image of a config concurrently and composes the mosaic.
///
/// Loads run concurrently but complete into a single task, which is the
/// only one touching the mosaic. Failed loads are logged and skipped.
pub struct MosaicPipeline {
    loader: ImageLoader,
}

impl MosaicPipeline {
    pub fn new(loader: ImageLoader) -> Self {
        Self { loader }
    }

    /// Build the mosaic described by `config` onto `surface`.
    pub async fn compose<S: RasterSurface>(
        &self,
        config: &MosaicConfig,
        surface: S,
    ) -> Result<(Mosaic<S>, RenderReport), RenderError> {
        let target = config
            .target
            .as_ref()
            .ok_or(MosaicError::MissingTarget)?;

        let mut mosaic = Mosaic::new(surface)?;
        mosaic.set_size(config.width, config.height, config.columns, config.rows)?;
        mosaic.set_color_blending(config.color_blending)?;

        let mut pending = FuturesUnordered::new();
        for source in &config.tiles {
            mosaic.begin_load();
            pending.push(self.load(Role::Tile, source));
        }
        mosaic.begin_load();
        pending.push(self.load(Role::Target, target));

        tracing::info!(
            tiles = config.tiles.len(),
            target = %target,
            "Loading images"
        );

        let mut report = RenderReport::default();
        while let Some((role, source, result)) = pending.next().await {
            match result {
                Ok(raster) => self.accept(&mut mosaic, &mut report, role, source, raster),
                Err(e) => {
                    tracing::warn!(source = %source, error = %e, "Failed to load image");
                    report.failed += 1;
                }
            }
            mosaic.complete_load()?;
            tracing::debug!(progress = mosaic.load_progress(), "Load completed");
        }

        report.pool_size = mosaic.pool().pool_size();
        if !mosaic.has_source() {
            return Err(MosaicError::MissingTarget.into());
        }

        tracing::info!(
            pool_size = report.pool_size,
            loaded = report.tiles_loaded,
            replaced = report.tiles_replaced,
            failed = report.failed,
            "Composed mosaic"
        );
        Ok((mosaic, report))
    }

    /// Compose onto a tiny-skia surface and encode the result as PNG.
    pub async fn render_png(
        &self,
        config: &MosaicConfig,
        optimize: bool,
    ) -> Result<(Vec<u8>, RenderReport), RenderError> {
        let surface = PixmapSurface::new(config.width, config.height)?;
        let (mosaic, report) = self.compose(config, surface).await?;
        let png = mosaic.into_surface().encode_png(optimize)?;
        Ok((png, report))
    }

    async fn load<'a>(
        &self,
        role: Role,
        source: &'a ImageSource,
    ) -> (Role, &'a ImageSource, Result<Raster, LoadError>) {
        (role, source, self.loader.load(source).await)
    }

    fn accept<S: RasterSurface>(
        &self,
        mosaic: &mut Mosaic<S>,
        report: &mut RenderReport,
        role: Role,
        source: &ImageSource,
        raster: Raster,
    ) {
        match role {
            Role::Tile => match mosaic.add_to_grid(raster.into_shared()) {
                Ok(replaced) => {
                    report.tiles_loaded += 1;
                    if replaced.is_some() {
                        tracing::debug!(source = %source, "Tile replaced one of the same color");
                        report.tiles_replaced += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(source = %source, error = %e, "Skipping tile");
                    report.failed += 1;
                }
            },
            Role::Target => {
                // composition waits for the outstanding loads, this only stores the source
                if let Err(e) = mosaic.set_source_image(raster.into_shared()) {
                    tracing::warn!(source = %source, error = %e, "Failed to set source image");
                    report.failed += 1;
                }
            }
        }
    }
}
