use std::sync::Arc;

use crate::error::RenderError;
use crate::models::{AppConfig, ConfigError, RenderedMosaic};
use crate::rendering::compose_png;
use crate::services::{MosaicRenderer, TileResolver};
use mosaic_tiles::{ColorCode, ColorGrid, PixelBuffer, SamplingStrategy, TileGeometry, TileSampler};

/// An uploaded image decoded to RGBA8
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA samples, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn pixel_buffer(&self) -> Result<PixelBuffer<'_>, mosaic_tiles::InvalidInput> {
        PixelBuffer::new(&self.pixels, self.width, self.height)
    }
}

/// Result from running the full pipeline
pub struct MosaicOutput {
    pub grid: ColorGrid,
    pub mosaic: RenderedMosaic,
    /// Composed mosaic PNG
    pub png: Vec<u8>,
}

/// Error from the mosaic pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] mosaic_tiles::InvalidInput),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Blocking task failed: {0}")]
    Task(String),
}

/// Pipeline that orchestrates decode → sample → render → compose
pub struct MosaicPipeline {
    geometry: TileGeometry,
    strategy: SamplingStrategy,
    placeholder: ColorCode,
    resolver: Arc<dyn TileResolver>,
    renderer: MosaicRenderer,
}

impl MosaicPipeline {
    pub fn new(config: &AppConfig, resolver: Arc<dyn TileResolver>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            geometry: config.geometry()?,
            strategy: config.sampling.into(),
            placeholder: config.placeholder_code()?,
            resolver,
            renderer: MosaicRenderer::new(),
        })
    }

    pub fn geometry(&self) -> TileGeometry {
        self.geometry
    }

    pub fn placeholder(&self) -> &ColorCode {
        &self.placeholder
    }

    /// Decode encoded image bytes (PNG, JPEG, GIF, BMP, WebP)
    pub async fn decode(&self, bytes: Vec<u8>) -> Result<DecodedImage, PipelineError> {
        tokio::task::spawn_blocking(move || -> Result<DecodedImage, PipelineError> {
            let image =
                image::load_from_memory(&bytes).map_err(|e| PipelineError::Decode(e.to_string()))?;
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            tracing::debug!(width, height, "Decoded source image");
            Ok(DecodedImage {
                width,
                height,
                pixels: rgba.into_raw(),
            })
        })
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))?
    }

    /// Sample a decoded image into a color grid
    pub fn sample(&self, image: &DecodedImage) -> Result<ColorGrid, PipelineError> {
        let pixels = image.pixel_buffer()?;
        let grid = TileSampler::new(self.geometry)
            .strategy(self.strategy)
            .sample(&pixels);

        tracing::debug!(
            rows = grid.row_count(),
            columns = grid.column_count(),
            strategy = ?self.strategy,
            "Sampled color grid"
        );
        Ok(grid)
    }

    /// Decode then sample
    pub async fn grid(&self, bytes: Vec<u8>) -> Result<ColorGrid, PipelineError> {
        let image = self.decode(bytes).await?;
        self.sample(&image)
    }

    /// Resolve every tile of a grid
    pub async fn render(&self, grid: &ColorGrid) -> RenderedMosaic {
        self.renderer.render(grid, self.resolver.as_ref()).await
    }

    /// Compose a rendered mosaic into a PNG
    ///
    /// Takes the mosaic by value so the blocking task can own it; it is
    /// handed back alongside the PNG.
    pub async fn compose(
        &self,
        mosaic: RenderedMosaic,
    ) -> Result<(RenderedMosaic, Vec<u8>), PipelineError> {
        if mosaic.is_empty() {
            return Err(RenderError::EmptyMosaic.into());
        }
        let geometry = self.geometry;
        let placeholder = self.placeholder.clone();
        tokio::task::spawn_blocking(move || -> Result<_, PipelineError> {
            let png = compose_png(&mosaic, geometry, &placeholder)?;
            Ok((mosaic, png))
        })
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))?
    }

    /// Run the full pipeline on encoded image bytes
    pub async fn generate(&self, bytes: Vec<u8>) -> Result<MosaicOutput, PipelineError> {
        let grid = self.grid(bytes).await?;
        let mosaic = self.render(&grid).await;
        let (mosaic, png) = self.compose(mosaic).await?;

        tracing::info!(
            rows = grid.row_count(),
            columns = grid.column_count(),
            placeholders = mosaic.placeholder_count(),
            png_bytes = png.len(),
            "Generated mosaic"
        );

        Ok(MosaicOutput { grid, mosaic, png })
    }
}
