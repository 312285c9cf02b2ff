use serde::Deserialize;
use std::path::{Path, PathBuf};

use mosaic_core::mosaic::{DEFAULT_COLUMNS, DEFAULT_HEIGHT, DEFAULT_ROWS, DEFAULT_WIDTH};

use super::ImageSource;
use crate::error::ConfigError;

/// Mosaic configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MosaicConfig {
    /// Output width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_columns")]
    pub columns: u32,

    #[serde(default = "default_rows")]
    pub rows: u32,

    /// Opacity of the flat color drawn over each tile (0 = tiles only, 1 = no tiles)
    #[serde(default = "default_color_blending")]
    pub color_blending: f64,

    /// The picture to reproduce
    #[serde(default)]
    pub target: Option<ImageSource>,

    /// Images to build the mosaic from
    #[serde(default)]
    pub tiles: Vec<ImageSource>,

    /// Where the PNG is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_columns() -> u32 {
    DEFAULT_COLUMNS
}

fn default_rows() -> u32 {
    DEFAULT_ROWS
}

fn default_color_blending() -> f64 {
    0.2
}

fn default_output() -> PathBuf {
    PathBuf::from("mosaic.png")
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            columns: default_columns(),
            rows: default_rows(),
            color_blending: default_color_blending(),
            target: None,
            tiles: Vec::new(),
            output: default_output(),
        }
    }
}

impl MosaicConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // an empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            tiles = config.tiles.len(),
            target = config.target.is_some(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `path` if given, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check sizes and blending before anything is loaded
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("columns", self.columns),
            ("rows", self.rows),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        // a cell below one pixel renders every tile empty
        if self.columns > self.width || self.rows > self.height {
            return Err(ConfigError::Invalid(format!(
                "{}x{} grid is finer than the {}x{} output",
                self.columns, self.rows, self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.color_blending) {
            return Err(mosaic_core::MosaicError::InvalidBlending(self.color_blending).into());
        }
        Ok(())
    }

    pub fn apply(&mut self, overrides: RenderOverrides) {
        let RenderOverrides {
            width,
            height,
            columns,
            rows,
            color_blending,
            target,
            tiles,
            output,
        } = overrides;

        self.width = width.unwrap_or(self.width);
        self.height = height.unwrap_or(self.height);
        self.columns = columns.unwrap_or(self.columns);
        self.rows = rows.unwrap_or(self.rows);
        self.color_blending = color_blending.unwrap_or(self.color_blending);
        if target.is_some() {
            self.target = target;
        }
        if !tiles.is_empty() {
            self.tiles = tiles;
        }
        if let Some(output) = output {
            self.output = output;
        }
    }
}

/// Command line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct RenderOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub columns: Option<u32>,
    pub rows: Option<u32>,
    pub color_blending: Option<f64>,
    pub target: Option<ImageSource>,
    /// Replaces the configured tiles when non-empty
    pub tiles: Vec<ImageSource>,
    pub output: Option<PathBuf>,
}
