//! Tile size configuration.

use crate::error::InvalidInput;

/// Width and height of one mosaic tile in source pixels.
///
/// Both dimensions are positive; the only way to build one is
/// [`TileGeometry::new`], which checks that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileGeometry {
    tile_width: u32,
    tile_height: u32,
}

impl TileGeometry {
    /// Create a tile geometry.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::EmptyTile`] if either dimension is zero.
    ///
    /// # Example
    /// ```
    /// use mosaic_tiles::TileGeometry;
    /// assert!(TileGeometry::new(16, 16).is_ok());
    /// assert!(TileGeometry::new(0, 16).is_err());
    /// ```
    pub fn new(tile_width: u32, tile_height: u32) -> Result<Self, InvalidInput> {
        if tile_width == 0 || tile_height == 0 {
            return Err(InvalidInput::EmptyTile {
                tile_width,
                tile_height,
            });
        }
        Ok(Self {
            tile_width,
            tile_height,
        })
    }

    #[inline]
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    #[inline]
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Grid shape `(rows, columns)` for an image of the given size.
    ///
    /// Integer division: remainder strips are not counted.
    ///
    /// ```
    /// use mosaic_tiles::TileGeometry;
    /// let geometry = TileGeometry::new(16, 16).unwrap();
    /// assert_eq!(geometry.grid_shape(100, 50), (3, 6));
    /// ```
    #[inline]
    pub fn grid_shape(&self, image_width: u32, image_height: u32) -> (usize, usize) {
        (
            (image_height / self.tile_height) as usize,
            (image_width / self.tile_width) as usize,
        )
    }

    /// Top-left source pixel `(x, y)` of the tile at `(row, column)`.
    #[inline]
    pub fn origin(&self, row: usize, column: usize) -> (u32, u32) {
        (
            column as u32 * self.tile_width,
            row as u32 * self.tile_height,
        )
    }
}

impl Default for TileGeometry {
    /// 16x16 tiles.
    fn default() -> Self {
        Self {
            tile_width: 16,
            tile_height: 16,
        }
    }
}
