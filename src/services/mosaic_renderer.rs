//! Settle-all mosaic renderer.
//!
//! Rows are processed in grid order. Within a row every tile is resolved
//! concurrently and the row is committed only once all of its tiles have
//! settled. A failed (or panicking) resolution becomes a placeholder in its
//! own position; it never cancels sibling tiles or other rows.
//!
//! The renderer spawns no tasks: the futures of one row are multiplexed on
//! the calling task, and the output is only touched between rows.

use futures_util::future::join_all;
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;

use crate::models::{RenderedMosaic, TileResolution};
use crate::services::tile_resolver::{ResolveError, TileResolver};
use mosaic_tiles::{ColorCode, ColorGrid};

/// Destination for committed rows.
///
/// `commit` is called exactly once per grid row, in row order, with the
/// row's tiles in column order.
pub trait RowSink {
    fn commit(&mut self, row_index: usize, row: Vec<TileResolution>);
}

impl RowSink for RenderedMosaic {
    fn commit(&mut self, _row_index: usize, row: Vec<TileResolution>) {
        self.push_row(row);
    }
}

/// Summary of one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub rows: usize,
    pub tiles: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MosaicRenderer;

impl MosaicRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Resolve every tile of `grid` and collect the settled rows.
    ///
    /// Cannot fail: tile failures are recorded as placeholders.
    pub async fn render<R>(&self, grid: &ColorGrid, resolver: &R) -> RenderedMosaic
    where
        R: TileResolver + ?Sized,
    {
        let mut mosaic = RenderedMosaic::new();
        self.render_into(grid, resolver, &mut mosaic).await;
        mosaic
    }

    /// Resolve every tile of `grid`, committing each settled row to `sink`.
    pub async fn render_into<R, S>(&self, grid: &ColorGrid, resolver: &R, sink: &mut S) -> RenderStats
    where
        R: TileResolver + ?Sized,
        S: RowSink + ?Sized,
    {
        let mut stats = RenderStats::default();

        for (row_index, codes) in grid.rows().enumerate() {
            let settled = settle_row(codes, resolver).await;

            let failed = settled.iter().filter(|tile| tile.is_placeholder()).count();
            tracing::debug!(
                row = row_index,
                tiles = settled.len(),
                failed,
                "Committing mosaic row"
            );

            stats.rows += 1;
            stats.tiles += settled.len();
            stats.failed += failed;
            sink.commit(row_index, settled);
        }

        tracing::info!(
            rows = stats.rows,
            tiles = stats.tiles,
            failed = stats.failed,
            "Mosaic rendered"
        );
        stats
    }
}

/// Resolve one row concurrently and wait for every tile, whatever the outcome.
async fn settle_row<R>(codes: &[ColorCode], resolver: &R) -> Vec<TileResolution>
where
    R: TileResolver + ?Sized,
{
    join_all(codes.iter().map(|code| settle_tile(code, resolver))).await
}

async fn settle_tile<R>(code: &ColorCode, resolver: &R) -> TileResolution
where
    R: TileResolver + ?Sized,
{
    // Building the future inside the guarded block also catches resolvers
    // that panic before returning one.
    let outcome = AssertUnwindSafe(async move { resolver.resolve(code).await })
        .catch_unwind()
        .await
        .unwrap_or(Err(ResolveError::Panicked));

    match outcome {
        Ok(resource) => TileResolution::Resolved(resource),
        Err(e) => {
            tracing::warn!(%code, error = %e, "Tile failed to resolve, using placeholder");
            TileResolution::Failed {
                code: code.clone(),
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TileResource;
    use async_trait::async_trait;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn grid(rows: usize, columns: usize) -> ColorGrid {
        ColorGrid::from_rows(
            (0..rows)
                .map(|r| {
                    (0..columns)
                        .map(|c| ColorCode::from_rgb(r as u8, c as u8, 0))
                        .collect()
                })
                .collect(),
        )
    }

    fn resource(code: &ColorCode) -> TileResource {
        TileResource {
            code: code.clone(),
            source: format!("/color/{code}"),
            data: vec![1],
        }
    }

    /// Fails for one specific color, delays another
    struct ScriptedResolver {
        fail: ColorCode,
        slow: Option<ColorCode>,
    }

    #[async_trait]
    impl TileResolver for ScriptedResolver {
        async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError> {
            if self.slow.as_ref() == Some(code) {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            if *code == self.fail {
                return Err(ResolveError::Http("unreachable".to_string()));
            }
            Ok(resource(code))
        }
    }

    #[tokio::test]
    async fn test_one_failure_in_three_by_three() {
        let grid = grid(3, 3);
        let resolver = ScriptedResolver {
            fail: ColorCode::from_rgb(1, 1, 0),
            slow: None,
        };

        let mosaic = MosaicRenderer::new().render(&grid, &resolver).await;

        assert_eq!(mosaic.row_count(), 3);
        assert_eq!(mosaic.column_count(), 3);
        assert_eq!(mosaic.len(), 9);
        assert_eq!(mosaic.placeholder_count(), 1);
        assert!(mosaic.get(1, 1).unwrap().is_placeholder());
        for (r, row) in mosaic.rows().enumerate() {
            for (c, tile) in row.iter().enumerate() {
                assert_eq!(tile.code(), grid.get(r, c).unwrap());
            }
        }
    }

    struct RecordingSink {
        commits: Vec<(usize, Vec<String>)>,
    }

    impl RowSink for RecordingSink {
        fn commit(&mut self, row_index: usize, row: Vec<TileResolution>) {
            let codes = row.iter().map(|t| t.code().to_string()).collect();
            self.commits.push((row_index, codes));
        }
    }

    /// Earlier tiles take longer, so completion order is reversed
    struct ReverseDelayResolver;

    #[async_trait]
    impl TileResolver for ReverseDelayResolver {
        async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError> {
            let [r, g, _] = code.to_rgb();
            let delay = 40u64.saturating_sub(u64::from(r) * 10 + u64::from(g) * 3);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(resource(code))
        }
    }

    #[tokio::test]
    async fn test_commit_order_ignores_completion_order() {
        let grid = grid(3, 4);
        let mut sink = RecordingSink {
            commits: Vec::new(),
        };

        let stats = MosaicRenderer::new()
            .render_into(&grid, &ReverseDelayResolver, &mut sink)
            .await;

        assert_eq!(stats.rows, 3);
        let indices: Vec<usize> = sink.commits.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        for (row_index, codes) in &sink.commits {
            let expected: Vec<String> = grid
                .rows()
                .nth(*row_index)
                .unwrap()
                .iter()
                .map(ToString::to_string)
                .collect();
            assert_eq!(codes, &expected);
        }
    }

    #[tokio::test]
    async fn test_slow_tile_does_not_reorder_row() {
        let grid = grid(2, 3);
        let resolver = ScriptedResolver {
            fail: ColorCode::from_rgb(9, 9, 9),
            slow: Some(ColorCode::from_rgb(0, 0, 0)),
        };

        let mosaic = MosaicRenderer::new().render(&grid, &resolver).await;

        assert_eq!(mosaic.placeholder_count(), 0);
        assert_eq!(mosaic.get(0, 0).unwrap().code().as_str(), "000000");
    }

    /// Tracks how many resolutions are in flight at once
    #[derive(Default)]
    struct ConcurrencyGauge {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TileResolver for ConcurrencyGauge {
        async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.calls.lock().unwrap().push(code.to_string());
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(resource(code))
        }
    }

    #[tokio::test]
    async fn test_row_tiles_resolve_concurrently_rows_do_not_overlap() {
        let grid = grid(3, 5);
        let gauge = ConcurrencyGauge::default();

        MosaicRenderer::new().render(&grid, &gauge).await;

        assert_eq!(gauge.max_in_flight.load(Ordering::SeqCst), 5);
        assert_eq!(gauge.calls.lock().unwrap().len(), 15);
    }

    struct PanickingResolver;

    #[async_trait]
    impl TileResolver for PanickingResolver {
        async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError> {
            if code.as_str() == "000100" {
                panic!("resolver bug");
            }
            Ok(resource(code))
        }
    }

    #[tokio::test]
    async fn test_panicking_tile_becomes_placeholder() {
        let grid = grid(2, 2);

        let mosaic = MosaicRenderer::new().render(&grid, &PanickingResolver).await;

        assert_eq!(mosaic.len(), 4);
        assert_eq!(mosaic.placeholder_count(), 1);
        match mosaic.get(0, 1).unwrap() {
            TileResolution::Failed { reason, .. } => assert_eq!(reason, "Resolver panicked"),
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    /// Written without the attribute macro so it can panic while building
    /// its future, before anything is polled.
    struct PanicsBeforeFuture;

    impl TileResolver for PanicsBeforeFuture {
        fn resolve<'life0, 'life1, 'async_trait>(
            &'life0 self,
            code: &'life1 ColorCode,
        ) -> Pin<Box<dyn Future<Output = Result<TileResource, ResolveError>> + Send + 'async_trait>>
        where
            'life0: 'async_trait,
            'life1: 'async_trait,
            Self: 'async_trait,
        {
            if code.as_str() == "010000" {
                panic!("resolver bug before the future exists");
            }
            let resource = resource(code);
            Box::pin(async move { Ok(resource) })
        }
    }

    #[tokio::test]
    async fn test_panic_while_building_future_becomes_placeholder() {
        let grid = grid(2, 2);

        let mosaic = MosaicRenderer::new().render(&grid, &PanicsBeforeFuture).await;

        assert_eq!(mosaic.len(), 4);
        assert_eq!(mosaic.placeholder_count(), 1);
        assert!(mosaic.get(1, 0).unwrap().is_placeholder());
        assert!(!mosaic.get(0, 0).unwrap().is_placeholder());
    }

    #[tokio::test]
    async fn test_empty_grid_commits_nothing() {
        let mut sink = RecordingSink {
            commits: Vec::new(),
        };
        let stats = MosaicRenderer::new()
            .render_into(&ColorGrid::from_rows(Vec::new()), &PanickingResolver, &mut sink)
            .await;

        assert_eq!(stats, RenderStats::default());
        assert!(sink.commits.is_empty());
    }

    #[tokio::test]
    async fn test_all_failures_still_complete() {
        struct AlwaysFails;

        #[async_trait]
        impl TileResolver for AlwaysFails {
            async fn resolve(&self, code: &ColorCode) -> Result<TileResource, ResolveError> {
                Err(ResolveError::EmptyBody(format!("/color/{code}")))
            }
        }

        let mosaic = MosaicRenderer::new().render(&grid(2, 2), &AlwaysFails).await;
        assert_eq!(mosaic.len(), 4);
        assert_eq!(mosaic.placeholder_count(), 4);
    }
}
