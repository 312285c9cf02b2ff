use std::time::Duration;

use mosaic_core::Raster;

use crate::error::LoadError;
use crate::models::ImageSource;
use crate::rendering::decode_image;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches and decodes PNG and JPEG images from disk or over HTTP.
#[derive(Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
}

impl ImageLoader {
    pub fn new() -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Load and decode one image.
    pub async fn load(&self, source: &ImageSource) -> Result<Raster, LoadError> {
        let bytes = match source {
            ImageSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| LoadError::Read {
                        path: path.clone(),
                        source,
                    })?
            }
            ImageSource::Url(url) => self.fetch(url).await?,
        };

        let raster = decode_image(&bytes)?;
        tracing::debug!(
            source = %source,
            width = raster.width(),
            height = raster.height(),
            "Loaded image"
        );
        Ok(raster)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        tracing::debug!(url = %url, "Fetching image");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
