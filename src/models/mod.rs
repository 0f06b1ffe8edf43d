pub mod config;
pub mod mosaic;
pub mod swatch_spec;

pub use config::{AppConfig, ConfigError, ResolverConfig, SamplingMode, TileConfig};
pub use mosaic::{RenderedMosaic, TileResolution, TileResource};
pub use swatch_spec::SwatchSpec;
