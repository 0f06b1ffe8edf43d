//! Tile resolvers: map a color code to a displayable tile.
//!
//! The renderer only knows the [`TileResolver`] trait. Two implementations
//! are provided:
//!
//! - [`SwatchResolver`] renders the swatch in-process (through the shared
//!   [`SwatchCache`]), the same bytes `/color/{hex}` would serve.
//! - [`HttpTileResolver`] fetches `/color/{hex}` from a swatch server. This
//!   is where per-tile timeouts live; the renderer itself never times out.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{SwatchSpec, TileResource};
use crate::services::SwatchCache;
use mosaic_tiles::ColorCode;

/// Why a single tile could not be resolved
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Empty response body from {0}")]
    EmptyBody(String),

    #[error("Swatch render error: {0}")]
    Render(String),

    #[error("Resolver panicked")]
    Panicked,
}

/// Resolves one color code to a tile resource.
///
/// Implementations must be safe to call many times concurrently; the
/// renderer issues one call per tile of a row without waiting in between.
#[async_trait]
pub trait TileResolver: Send + Sync {
    async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError>;
}

#[async_trait]
impl<T: TileResolver + ?Sized> TileResolver for Arc<T> {
    async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError> {
        (**self).resolve(code).await
    }
}

/// Path of the swatch endpoint for a color
pub fn swatch_path(code: &ColorCode) -> String {
    format!("/color/{code}")
}

/// In-process resolver backed by the swatch cache
pub struct SwatchResolver {
    cache: Arc<SwatchCache>,
    spec: SwatchSpec,
}

impl SwatchResolver {
    pub fn new(cache: Arc<SwatchCache>, spec: SwatchSpec) -> Self {
        Self { cache, spec }
    }
}

#[async_trait]
impl TileResolver for SwatchResolver {
    async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError> {
        let png = self
            .cache
            .get_or_render(code, self.spec)
            .await
            .map_err(|e| ResolveError::Render(e.to_string()))?;

        Ok(TileResource {
            code: code.clone(),
            source: swatch_path(code),
            data: png.as_ref().clone(),
        })
    }
}

/// Resolver that fetches swatches from a remote `/color/{hex}` endpoint
pub struct HttpTileResolver {
    client: reqwest::Client,
    base_url: String,
    spec: SwatchSpec,
}

impl HttpTileResolver {
    /// Create a resolver for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, spec: SwatchSpec, timeout: Duration) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResolveError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spec,
        })
    }

    /// Full URL requested for a color
    pub fn url_for(&self, code: &ColorCode) -> String {
        format!(
            "{}{}?w={}&h={}",
            self.base_url,
            swatch_path(code),
            self.spec.width,
            self.spec.height
        )
    }
}

#[async_trait]
impl TileResolver for HttpTileResolver {
    async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError> {
        let url = self.url_for(code);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ResolveError::Http(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ResolveError::Http(format!("Failed to read {url}: {e}")))?;
        if body.is_empty() {
            return Err(ResolveError::EmptyBody(url));
        }

        tracing::trace!(%url, bytes = body.len(), "Fetched tile");

        Ok(TileResource {
            code: code.clone(),
            source: url,
            data: body.to_vec(),
        })
    }
}
