//! Error types for sampling preconditions
//!
//! Sampling itself cannot fail; every error here is a precondition that is
//! checked before the first pixel is read.

use std::fmt;

/// Precondition failure for a sampling call.
///
/// Returned by [`TileGeometry::new`](crate::TileGeometry::new),
/// [`PixelBuffer::new`](crate::PixelBuffer::new) and
/// [`sample`](crate::sample). Nothing is produced when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// Image width or height is zero
    EmptyImage { width: u32, height: u32 },
    /// Tile width or height is zero
    EmptyTile { tile_width: u32, tile_height: u32 },
    /// Pixel buffer length is not `width * height * 4`
    BufferLength { expected: usize, actual: usize },
    /// `width * height * 4` does not fit in `usize`
    DimensionsOverflow { width: u32, height: u32 },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::EmptyImage { width, height } => {
                write!(f, "image dimensions must be positive, got {}x{}", width, height)
            }
            InvalidInput::EmptyTile {
                tile_width,
                tile_height,
            } => write!(
                f,
                "tile dimensions must be positive, got {}x{}",
                tile_width, tile_height
            ),
            InvalidInput::BufferLength { expected, actual } => write!(
                f,
                "pixel buffer length mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            InvalidInput::DimensionsOverflow { width, height } => {
                write!(f, "image dimensions {}x{} overflow the address space", width, height)
            }
        }
    }
}

impl std::error::Error for InvalidInput {}
