use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::MosaicPipeline;

/// Number of tiles drawn as placeholders in a rendered mosaic
pub const PLACEHOLDERS_HEADER: HeaderName = HeaderName::from_static("x-mosaic-placeholders");

/// Color grid of an uploaded image
#[derive(Debug, Serialize, ToSchema)]
pub struct MosaicGridResponse {
    /// Number of tile rows
    pub rows: usize,
    /// Number of tile columns
    pub columns: usize,
    /// Tile width in source pixels
    pub tile_width: u32,
    /// Tile height in source pixels
    pub tile_height: u32,
    /// Row-major color codes, six lower-case hex digits each
    pub tiles: Vec<Vec<String>>,
}

/// Sample an image into a color grid
///
/// The body is the encoded image (PNG, JPEG, GIF, BMP or WebP). Edge strips
/// narrower than one tile are dropped.
#[utoipa::path(
    post,
    path = "/api/mosaic",
    request_body(content = Vec<u8>, description = "Encoded image", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Color grid", body = MosaicGridResponse),
        (status = 400, description = "Image could not be decoded"),
        (status = 413, description = "Upload too large"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_mosaic_grid(
    State(pipeline): State<Arc<MosaicPipeline>>,
    body: Bytes,
) -> Result<Json<MosaicGridResponse>, ApiError> {
    tracing::info!(size_bytes = body.len(), "Mosaic grid request received");

    let grid = pipeline.grid(body.to_vec()).await?;
    let geometry = pipeline.geometry();

    Ok(Json(MosaicGridResponse {
        rows: grid.row_count(),
        columns: grid.column_count(),
        tile_width: geometry.tile_width(),
        tile_height: geometry.tile_height(),
        tiles: grid.to_strings(),
    }))
}

/// Render an image as a composed mosaic PNG
///
/// Tiles that fail to resolve are drawn in the placeholder color; their count
/// is reported in the `X-Mosaic-Placeholders` header.
#[utoipa::path(
    post,
    path = "/api/mosaic/render",
    request_body(content = Vec<u8>, description = "Encoded image", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Composed mosaic", content_type = "image/png"),
        (status = 400, description = "Image could not be decoded"),
        (status = 413, description = "Upload too large"),
        (status = 422, description = "Image is smaller than one tile"),
    ),
    tag = "Mosaic"
)]
pub async fn handle_mosaic_render(
    State(pipeline): State<Arc<MosaicPipeline>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    tracing::info!(size_bytes = body.len(), "Mosaic render request received");

    let output = pipeline.generate(body.to_vec()).await?;
    let placeholders = output.mosaic.placeholder_count();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, output.png.len().to_string()),
            (PLACEHOLDERS_HEADER, placeholders.to_string()),
        ],
        Bytes::from(output.png),
    )
        .into_response())
}
