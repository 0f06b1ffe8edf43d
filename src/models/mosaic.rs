use mosaic_tiles::ColorCode;

/// A displayable tile obtained for one color code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileResource {
    /// The color this tile represents
    pub code: ColorCode,
    /// Where the tile came from (`/color/<hex>` or a full URL)
    pub source: String,
    /// Encoded image bytes (PNG)
    pub data: Vec<u8>,
}

/// Outcome of resolving one tile
///
/// A failed tile is a value, not an error: it stays in its grid position
/// and is drawn as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileResolution {
    Resolved(TileResource),
    Failed { code: ColorCode, reason: String },
}

impl TileResolution {
    pub fn code(&self) -> &ColorCode {
        match self {
            TileResolution::Resolved(resource) => &resource.code,
            TileResolution::Failed { code, .. } => code,
        }
    }

    pub fn resource(&self) -> Option<&TileResource> {
        match self {
            TileResolution::Resolved(resource) => Some(resource),
            TileResolution::Failed { .. } => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TileResolution::Failed { .. })
    }
}

/// Row-major grid of tile resolutions produced by the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMosaic {
    rows: Vec<Vec<TileResolution>>,
}

impl RenderedMosaic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a settled row below the existing ones
    pub fn push_row(&mut self, row: Vec<TileResolution>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[TileResolution]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&TileResolution> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Total number of tiles
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tiles that failed and will be drawn as placeholders
    pub fn placeholder_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|tile| tile.is_placeholder())
            .count()
    }
}
