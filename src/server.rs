//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header::CACHE_CONTROL, HeaderValue},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::{AppConfig, SwatchSpec};
use crate::services::{
    HttpTileResolver, MosaicPipeline, SwatchCache, SwatchResolver, TileResolver,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub swatch_cache: Arc<SwatchCache>,
    pub pipeline: Arc<MosaicPipeline>,
}

/// Build the tile resolver the config asks for.
///
/// With `resolver.base_url` set, tiles are fetched over HTTP; otherwise
/// swatches are rendered in-process through `cache`.
pub fn build_resolver(
    config: &AppConfig,
    cache: Arc<SwatchCache>,
) -> anyhow::Result<Arc<dyn TileResolver>> {
    let spec = SwatchSpec::for_tile(config.geometry()?);
    match config.resolver.base_url {
        Some(ref base_url) => {
            tracing::info!(%base_url, timeout_secs = config.resolver.timeout_secs, "Using HTTP tile resolver");
            let resolver = HttpTileResolver::new(base_url, spec, config.resolver.timeout())?;
            Ok(Arc::new(resolver))
        }
        None => Ok(Arc::new(SwatchResolver::new(cache, spec))),
    }
}

/// Create application state from a configuration.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    config.validate()?;

    let config = Arc::new(config);
    let swatch_cache = Arc::new(SwatchCache::new());
    let resolver = build_resolver(&config, swatch_cache.clone())?;
    let pipeline = Arc::new(MosaicPipeline::new(&config, resolver)?);

    Ok(AppState {
        config,
        swatch_cache,
        pipeline,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. Responses
/// without their own `Cache-Control` get `no-store`; swatches set theirs.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Tile resources
        .route("/color/:hex", get(handle_color))
        // Mosaic endpoints
        .route("/api/mosaic", post(handle_mosaic_grid))
        .route("/api/mosaic/render", post(handle_mosaic_render))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_color(
    State(state): State<AppState>,
    path: Path<String>,
    query: Query<api::SwatchQuery>,
) -> Result<Response, ApiError> {
    let geometry = state.pipeline.geometry();
    api::handle_color(State(state.swatch_cache), State(geometry), path, query).await
}

async fn handle_mosaic_grid(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Json<api::MosaicGridResponse>, ApiError> {
    api::handle_mosaic_grid(State(state.pipeline), body).await
}

async fn handle_mosaic_render(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_mosaic_render(State(state.pipeline), body).await
}
