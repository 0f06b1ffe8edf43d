use crate::error::RenderError;
use std::io::Cursor;

/// Encode raw pixel rows as a PNG.
///
/// `data` must already be packed for `bit_depth` (see [`pack_nbits`]).
pub fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress a PNG with oxipng, keeping the input if that fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) if optimized.len() < png_bytes.len() => optimized,
        Ok(_) => png_bytes,
        Err(e) => {
            tracing::debug!(%e, "oxipng failed, keeping fast encoding");
            png_bytes
        }
    }
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
///
/// Each row is padded to a whole byte, as PNG requires.
pub fn pack_nbits(values: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let width = width as usize;
    let row_bytes = width.div_ceil(pixels_per_byte);
    let rows = if width == 0 { 0 } else { values.len() / width };
    let mask = (1u8 << bits) - 1;

    let mut packed = vec![0u8; row_bytes * rows];
    for (y, row) in values.chunks_exact(width.max(1)).take(rows).enumerate() {
        for (x, &value) in row.iter().enumerate() {
            let shift = 8 - bits as usize * (x % pixels_per_byte + 1);
            packed[y * row_bytes + x / pixels_per_byte] |= (value & mask) << shift;
        }
    }
    packed
}
