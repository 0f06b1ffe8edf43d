use crate::error::RenderError;
use mosaic_tiles::TileGeometry;

/// Largest swatch side served by `/color/{hex}`
pub const MAX_SWATCH_SIDE: u32 = 256;

/// Pixel size of one solid-color swatch image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwatchSpec {
    pub width: u32,
    pub height: u32,
}

impl SwatchSpec {
    /// Swatch matching one mosaic tile
    pub fn for_tile(geometry: TileGeometry) -> Self {
        Self {
            width: geometry.tile_width(),
            height: geometry.tile_height(),
        }
    }

    /// Determine spec from optional `w`/`h` query values, defaulting to the tile size
    pub fn from_query(
        width: Option<u32>,
        height: Option<u32>,
        default: TileGeometry,
    ) -> Result<Self, RenderError> {
        let spec = Self {
            width: width.unwrap_or(default.tile_width()),
            height: height.unwrap_or(default.tile_height()),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Validate that both sides are within 1..=MAX_SWATCH_SIDE
    pub fn validate(&self) -> Result<(), RenderError> {
        let in_range = |side: u32| (1..=MAX_SWATCH_SIDE).contains(&side);
        if in_range(self.width) && in_range(self.height) {
            Ok(())
        } else {
            Err(RenderError::UnsupportedDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}
