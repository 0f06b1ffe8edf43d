use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::RenderError;
use crate::models::SwatchSpec;
use crate::rendering::render_swatch_png;
use mosaic_tiles::ColorCode;

/// Default maximum number of swatches kept in memory
const DEFAULT_MAX_ENTRIES: usize = 4096;

type SwatchKey = (ColorCode, SwatchSpec);

struct Entries {
    map: HashMap<SwatchKey, Arc<Vec<u8>>>,
    /// Keys by insertion time (oldest first)
    order: VecDeque<SwatchKey>,
}

/// Cache for encoded swatch PNGs, keyed by color and size
///
/// Photos repeat colors heavily, so most tiles of a mosaic hit the cache.
/// Eviction is first-in first-out once `max_entries` is reached.
pub struct SwatchCache {
    entries: Arc<RwLock<Entries>>,
    max_entries: usize,
}

impl SwatchCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries {
                map: HashMap::new(),
                order: VecDeque::new(),
            })),
            max_entries: max_entries.max(1),
        }
    }

    /// Retrieve a cached swatch
    pub async fn get(&self, code: &ColorCode, spec: SwatchSpec) -> Option<Arc<Vec<u8>>> {
        let entries = self.entries.read().await;
        entries.map.get(&(code.clone(), spec)).cloned()
    }

    /// Store an encoded swatch
    pub async fn store(&self, code: ColorCode, spec: SwatchSpec, png: Arc<Vec<u8>>) {
        let mut entries = self.entries.write().await;
        let key = (code, spec);
        if entries.map.insert(key.clone(), png).is_some() {
            return;
        }
        entries.order.push_back(key);

        while entries.map.len() > self.max_entries {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.map.remove(&oldest);
            tracing::trace!(code = %oldest.0, "Swatch cache: evicted oldest entry");
        }
    }

    /// Return the cached swatch, rendering and storing it on a miss
    pub async fn get_or_render(
        &self,
        code: &ColorCode,
        spec: SwatchSpec,
    ) -> Result<Arc<Vec<u8>>, RenderError> {
        if let Some(png) = self.get(code, spec).await {
            return Ok(png);
        }
        let png = Arc::new(render_swatch_png(code, spec)?);
        self.store(code.clone(), spec, png.clone()).await;
        Ok(png)
    }

    /// Number of cached swatches
    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SwatchCache {
    fn default() -> Self {
        Self::new()
    }
}
