use crate::error::RenderError;
use crate::models::{RenderedMosaic, TileResource};
use crate::rendering::encode::{encode_png, optimize_png};
use image::{imageops, Rgba, RgbaImage};
use mosaic_tiles::{ColorCode, TileGeometry};

/// Compose a rendered mosaic into a single PNG.
///
/// The output is `columns * tile_width` by `rows * tile_height`. Each
/// resolved tile is decoded and scaled to the tile size; failed tiles and
/// tiles whose bytes do not decode are filled with `placeholder`.
///
/// CPU-bound: call from `spawn_blocking` inside async code.
pub fn compose_png(
    mosaic: &RenderedMosaic,
    geometry: TileGeometry,
    placeholder: &ColorCode,
) -> Result<Vec<u8>, RenderError> {
    let canvas = compose_image(mosaic, geometry, placeholder)?;
    let (width, height) = canvas.dimensions();

    let png_bytes = encode_png(
        width,
        height,
        png::ColorType::Rgba,
        png::BitDepth::Eight,
        None,
        canvas.as_raw(),
    )?;
    Ok(optimize_png(png_bytes))
}

/// Compose into an in-memory RGBA image.
pub fn compose_image(
    mosaic: &RenderedMosaic,
    geometry: TileGeometry,
    placeholder: &ColorCode,
) -> Result<RgbaImage, RenderError> {
    let (rows, columns) = (mosaic.row_count(), mosaic.column_count());
    if rows == 0 || columns == 0 {
        return Err(RenderError::EmptyMosaic);
    }

    let (tile_width, tile_height) = (geometry.tile_width(), geometry.tile_height());
    let width = u32::try_from(columns)
        .ok()
        .and_then(|c| c.checked_mul(tile_width));
    let height = u32::try_from(rows)
        .ok()
        .and_then(|r| r.checked_mul(tile_height));
    let (Some(width), Some(height)) = (width, height) else {
        return Err(RenderError::UnsupportedDimensions {
            width: u32::MAX,
            height: u32::MAX,
        });
    };

    let [r, g, b] = placeholder.to_rgb();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

    let mut drawn = 0usize;
    for (row_index, row) in mosaic.rows().enumerate() {
        for (column_index, tile) in row.iter().enumerate() {
            let Some(tile_image) = tile
                .resource()
                .and_then(|resource| decode_tile(resource, tile_width, tile_height))
            else {
                continue;
            };
            let x = column_index as i64 * i64::from(tile_width);
            let y = row_index as i64 * i64::from(tile_height);
            imageops::replace(&mut canvas, &tile_image, x, y);
            drawn += 1;
        }
    }

    tracing::debug!(
        width,
        height,
        drawn,
        placeholders = mosaic.len() - drawn,
        "Composed mosaic image"
    );

    Ok(canvas)
}

/// Decode a tile's bytes and fit them to the tile size.
fn decode_tile(resource: &TileResource, tile_width: u32, tile_height: u32) -> Option<RgbaImage> {
    match image::load_from_memory(&resource.data) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            if rgba.dimensions() == (tile_width, tile_height) {
                Some(rgba)
            } else {
                Some(imageops::resize(
                    &rgba,
                    tile_width,
                    tile_height,
                    imageops::FilterType::Nearest,
                ))
            }
        }
        Err(e) => {
            tracing::warn!(
                code = %resource.code,
                source = %resource.source,
                %e,
                "Tile image did not decode, drawing placeholder"
            );
            None
        }
    }
}
