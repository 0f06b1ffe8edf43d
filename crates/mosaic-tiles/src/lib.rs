//! mosaic-tiles: Tile sampling for photo mosaics
//!
//! This library turns a decoded RGBA pixel buffer into a grid of hex color
//! codes, one per fixed-size tile. It has no I/O and no concurrency; the
//! application crate feeds the resulting [`ColorGrid`] to its renderer.
//!
//! # Quick Start
//!
//! ```
//! use mosaic_tiles::{sample, TileGeometry};
//!
//! // 4x2 image, every pixel pure red
//! let pixels = [255u8, 0, 0, 255].repeat(8);
//! let geometry = TileGeometry::new(2, 2).unwrap();
//!
//! let grid = sample(&pixels, 4, 2, geometry).unwrap();
//! assert_eq!(grid.row_count(), 1);
//! assert_eq!(grid.column_count(), 2);
//! assert_eq!(grid.get(0, 1).unwrap().as_str(), "ff0000");
//! ```
//!
//! # Grid Shape
//!
//! The grid has `floor(height / tile_height)` rows and
//! `floor(width / tile_width)` columns. Pixels along the right and bottom
//! edges that do not fill a whole tile are dropped: partial tiles are never
//! sampled.
//!
//! ```text
//!  width = 100, tile_width = 16  ->  6 columns, 4px strip dropped
//!  +----+----+----+----+----+----+--+
//!  |    |    |    |    |    |    |xx|
//!  +----+----+----+----+----+----+--+
//!  |    |    |    |    |    |    |xx|
//!  +----+----+----+----+----+----+--+
//!  |    |    |    |    |    |    |xx|
//!  +----+----+----+----+----+----+--+
//!  |xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx|   height = 50, tile_height = 16
//!  +--------------------------------+   -> 3 rows, 2px strip dropped
//! ```
//!
//! # Sampling
//!
//! By default each tile takes the color of its top-left pixel
//! ([`SamplingStrategy::TopLeft`]). This is cheap and deterministic, but
//! noisy on high-frequency images. [`SamplingStrategy::AreaAverage`] takes
//! the mean over the whole tile instead; it changes the colors, never the
//! grid shape or the encoding.
//!
//! # Color Codes
//!
//! [`ColorCode`] is always six lower-case hex digits. Encoding packs the
//! channels under a sentinel bit, `(1 << 24) | (r << 16) | (g << 8) | b`,
//! formats it as hex and drops the leading `1`, so small values come out
//! zero-padded without a separate padding step.

pub mod color;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pixels;
pub mod sampler;


pub use color::{ColorCode, ParseColorCodeError};
pub use error::InvalidInput;
pub use geometry::TileGeometry;
pub use grid::ColorGrid;
pub use pixels::{PixelBuffer, CHANNELS};
pub use sampler::{sample, SamplingStrategy, TileSampler};
