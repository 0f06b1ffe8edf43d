use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::SwatchSpec;
use crate::services::SwatchCache;
use mosaic_tiles::{ColorCode, TileGeometry};

/// Swatches never change for a given URL
pub const SWATCH_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Optional swatch size
#[derive(Debug, Deserialize, IntoParams)]
pub struct SwatchQuery {
    /// Swatch width in pixels (1-256, default: tile width)
    #[serde(default)]
    pub w: Option<u32>,
    /// Swatch height in pixels (1-256, default: tile height)
    #[serde(default)]
    pub h: Option<u32>,
}

/// Get a solid-color swatch
///
/// This is the tile resource a mosaic cell points at.
#[utoipa::path(
    get,
    path = "/color/{hex}",
    responses(
        (status = 200, description = "PNG swatch", content_type = "image/png"),
        (status = 400, description = "Invalid color code or size"),
    ),
    params(
        ("hex" = String, Path, description = "Six hex digits, e.g. ff0000"),
        SwatchQuery,
    ),
    tag = "Tiles"
)]
pub async fn handle_color(
    State(cache): State<Arc<SwatchCache>>,
    State(geometry): State<TileGeometry>,
    Path(hex): Path<String>,
    Query(query): Query<SwatchQuery>,
) -> Result<Response, ApiError> {
    let hex = hex.strip_suffix(".png").unwrap_or(&hex);
    let code: ColorCode = hex
        .parse()
        .map_err(|e| ApiError::InvalidColor(format!("{hex:?}: {e}")))?;
    let spec = SwatchSpec::from_query(query.w, query.h, geometry)?;

    let png_bytes = cache.get_or_render(&code, spec).await?;

    tracing::debug!(
        %code,
        width = spec.width,
        height = spec.height,
        size_bytes = png_bytes.len(),
        "Serving swatch"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, SWATCH_CACHE_CONTROL),
        ],
        Bytes::from(png_bytes.as_ref().clone()),
    )
        .into_response())
}
