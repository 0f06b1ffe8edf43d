use crate::assets::AssetLoader;
use crate::models::swatch_spec::MAX_SWATCH_SIDE;
use mosaic_tiles::{ColorCode, InvalidInput, ParseColorCodeError, SamplingStrategy, TileGeometry};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Tile size in source pixels
    #[serde(default)]
    pub tile: TileConfig,

    /// How each tile's color is picked
    #[serde(default)]
    pub sampling: SamplingMode,

    /// Hex color drawn for tiles that failed to resolve
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Where swatches come from
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_placeholder() -> String {
    "ff00ff".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// Tile dimensions
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TileConfig {
    #[serde(default = "default_tile_side")]
    pub width: u32,
    #[serde(default = "default_tile_side")]
    pub height: u32,
}

fn default_tile_side() -> u32 {
    16
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            width: default_tile_side(),
            height: default_tile_side(),
        }
    }
}

/// Sampling mode as written in config
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    #[default]
    Corner,
    Average,
}

impl From<SamplingMode> for SamplingStrategy {
    fn from(mode: SamplingMode) -> Self {
        match mode {
            SamplingMode::Corner => SamplingStrategy::TopLeft,
            SamplingMode::Average => SamplingStrategy::AreaAverage,
        }
    }
}

/// Tile resolver settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Swatch server base URL; `None` renders swatches in-process
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-tile request timeout for the HTTP resolver
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Invalid configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid tile size: {0}")]
    Tile(#[from] InvalidInput),

    #[error("Invalid placeholder color {value:?}: {source}")]
    Placeholder {
        value: String,
        #[source]
        source: ParseColorCodeError,
    },

    #[error("Tile size {width}x{height} exceeds the {max}px swatch limit")]
    TileTooLarge { width: u32, height: u32, max: u32 },

    #[error("Invalid resolver base_url {0:?}: must start with http:// or https://")]
    ResolverUrl(String),

    #[error("Resolver timeout must be positive")]
    ResolverTimeout,
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        tile_width = config.tile.width,
                        tile_height = config.tile.height,
                        sampling = ?config.sampling,
                        http_resolver = config.resolver.base_url.is_some(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Tile geometry from the configured size
    pub fn geometry(&self) -> Result<TileGeometry, ConfigError> {
        Ok(TileGeometry::new(self.tile.width, self.tile.height)?)
    }

    /// Placeholder color as a code
    pub fn placeholder_code(&self) -> Result<ColorCode, ConfigError> {
        self.placeholder
            .parse()
            .map_err(|source| ConfigError::Placeholder {
                value: self.placeholder.clone(),
                source,
            })
    }

    /// Check every value that can be wrong after deserialization
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry()?;
        if self.tile.width > MAX_SWATCH_SIDE || self.tile.height > MAX_SWATCH_SIDE {
            return Err(ConfigError::TileTooLarge {
                width: self.tile.width,
                height: self.tile.height,
                max: MAX_SWATCH_SIDE,
            });
        }
        self.placeholder_code()?;
        if let Some(ref url) = self.resolver.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ResolverUrl(url.clone()));
            }
        }
        if self.resolver.timeout_secs == 0 {
            return Err(ConfigError::ResolverTimeout);
        }
        Ok(())
    }

    /// Copy with the tile size replaced where given
    pub fn with_tile_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        if let Some(w) = width {
            self.tile.width = w;
        }
        if let Some(h) = height {
            self.tile.height = h;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tile: TileConfig::default(),
            sampling: SamplingMode::default(),
            placeholder: default_placeholder(),
            resolver: ResolverConfig::default(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
