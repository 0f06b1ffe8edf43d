pub mod mosaic_pipeline;
pub mod mosaic_renderer;
pub mod swatch_cache;
pub mod tile_resolver;

pub use mosaic_pipeline::{DecodedImage, MosaicOutput, MosaicPipeline, PipelineError};
pub use mosaic_renderer::{MosaicRenderer, RenderStats, RowSink};
pub use swatch_cache::SwatchCache;
pub use tile_resolver::{HttpTileResolver, ResolveError, SwatchResolver, TileResolver};
