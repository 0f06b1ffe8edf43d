//! Solid-color swatch images served at `/color/{hex}`.
//!
//! A swatch is encoded as a 1-bit indexed PNG whose palette holds the single
//! tile color, so even large swatches stay a few dozen bytes.

use crate::error::RenderError;
use crate::models::SwatchSpec;
use crate::rendering::encode::{encode_png, pack_nbits};
use mosaic_tiles::ColorCode;

/// Render a `spec.width` x `spec.height` PNG filled with `code`.
pub fn render_swatch_png(code: &ColorCode, spec: SwatchSpec) -> Result<Vec<u8>, RenderError> {
    spec.validate()?;

    let plte = code.to_rgb();
    // Every pixel is palette index 0
    let indices = vec![0u8; spec.width as usize * spec.height as usize];
    let packed = pack_nbits(&indices, spec.width, 1);

    encode_png(
        spec.width,
        spec.height,
        png::ColorType::Indexed,
        png::BitDepth::One,
        Some(&plte),
        &packed,
    )
}
