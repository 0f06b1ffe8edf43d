//! Tile sampling: pixel buffer to color grid.
//!
//! [`TileSampler`] walks the tile grid row by row and reduces each tile to a
//! single RGB triple using its [`SamplingStrategy`], then encodes it as a
//! [`ColorCode`]. The walk is pure and deterministic.

use crate::color::ColorCode;
use crate::error::InvalidInput;
use crate::geometry::TileGeometry;
use crate::grid::ColorGrid;
use crate::pixels::PixelBuffer;

/// How a tile's representative color is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingStrategy {
    /// Color of the tile's top-left pixel.
    #[default]
    TopLeft,
    /// Rounded mean of every pixel in the tile.
    AreaAverage,
}

/// Reusable sampler for a fixed tile geometry.
///
/// # Example
///
/// ```
/// use mosaic_tiles::{PixelBuffer, SamplingStrategy, TileGeometry, TileSampler};
///
/// // 2x1 image: black then white
/// let data = [0, 0, 0, 255, 255, 255, 255, 255];
/// let pixels = PixelBuffer::new(&data, 2, 1).unwrap();
/// let geometry = TileGeometry::new(2, 1).unwrap();
///
/// let corner = TileSampler::new(geometry).sample(&pixels);
/// assert_eq!(corner.get(0, 0).unwrap().as_str(), "000000");
///
/// let average = TileSampler::new(geometry)
///     .strategy(SamplingStrategy::AreaAverage)
///     .sample(&pixels);
/// assert_eq!(average.get(0, 0).unwrap().as_str(), "808080");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TileSampler {
    geometry: TileGeometry,
    strategy: SamplingStrategy,
}

impl TileSampler {
    pub fn new(geometry: TileGeometry) -> Self {
        Self {
            geometry,
            strategy: SamplingStrategy::default(),
        }
    }

    /// Set the sampling strategy (default: [`SamplingStrategy::TopLeft`]).
    pub fn strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn geometry(&self) -> TileGeometry {
        self.geometry
    }

    /// Sample a validated pixel buffer into a color grid.
    ///
    /// Tiles that would extend past the right or bottom edge are not
    /// sampled; see the crate docs for the grid shape.
    pub fn sample(&self, pixels: &PixelBuffer<'_>) -> ColorGrid {
        let (rows, columns) = self.geometry.grid_shape(pixels.width(), pixels.height());

        let grid = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| ColorCode::from(self.tile_rgb(pixels, row, column)))
                    .collect()
            })
            .collect();

        ColorGrid::with_columns(columns, grid)
    }

    fn tile_rgb(&self, pixels: &PixelBuffer<'_>, row: usize, column: usize) -> [u8; 3] {
        let (x0, y0) = self.geometry.origin(row, column);
        match self.strategy {
            SamplingStrategy::TopLeft => pixels.rgb_at(x0, y0),
            SamplingStrategy::AreaAverage => {
                let (w, h) = (self.geometry.tile_width(), self.geometry.tile_height());
                let mut sums = [0u64; 3];
                for y in y0..y0 + h {
                    for x in x0..x0 + w {
                        let rgb = pixels.rgb_at(x, y);
                        for (sum, channel) in sums.iter_mut().zip(rgb) {
                            *sum += u64::from(channel);
                        }
                    }
                }
                let count = u64::from(w) * u64::from(h);
                sums.map(|sum| ((sum + count / 2) / count) as u8)
            }
        }
    }
}

/// Sample raw RGBA bytes into a color grid using top-left sampling.
///
/// All preconditions are checked before any pixel is read.
///
/// # Errors
///
/// Returns [`InvalidInput`] if the image is empty or `pixels.len()` is not
/// `image_width * image_height * 4`.
///
/// # Example
///
/// ```
/// use mosaic_tiles::{sample, TileGeometry};
///
/// let pixels = vec![0u8; 100 * 50 * 4];
/// let grid = sample(&pixels, 100, 50, TileGeometry::new(16, 16).unwrap()).unwrap();
/// assert_eq!((grid.row_count(), grid.column_count()), (3, 6));
/// ```
pub fn sample(
    pixels: &[u8],
    image_width: u32,
    image_height: u32,
    geometry: TileGeometry,
) -> Result<ColorGrid, InvalidInput> {
    let buffer = PixelBuffer::new(pixels, image_width, image_height)?;
    Ok(TileSampler::new(geometry).sample(&buffer))
}
