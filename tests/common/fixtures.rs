//! Test fixtures: generated source images.

use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Colors used by the fixture images
pub mod colors {
    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const GREEN: [u8; 4] = [0, 255, 0, 255];
    pub const BLUE: [u8; 4] = [0, 0, 255, 255];
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
    pub const PLACEHOLDER: [u8; 4] = [255, 0, 255, 255];
}

/// Encode an image in the given format
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, format)
        .expect("Failed to encode fixture");
    buf.into_inner()
}

/// Solid-color PNG
pub fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    encode(
        &RgbaImage::from_pixel(width, height, Rgba(color)),
        ImageFormat::Png,
    )
}

/// Image made of `tile`-sized blocks, colored by `colors[row][column]`.
///
/// Extra `margin` pixels are added on the right and bottom edges (filled
/// white), which must be dropped by sampling.
pub fn block_image(tile: u32, colors: &[Vec<[u8; 4]>], margin: u32) -> RgbaImage {
    let rows = colors.len() as u32;
    let columns = colors.first().map_or(0, Vec::len) as u32;
    RgbaImage::from_fn(columns * tile + margin, rows * tile + margin, |x, y| {
        let (row, column) = ((y / tile) as usize, (x / tile) as usize);
        colors
            .get(row)
            .and_then(|r| r.get(column))
            .map_or(Rgba(colors::WHITE), |c| Rgba(*c))
    })
}

/// PNG of a `block_image`
pub fn block_png(tile: u32, colors: &[Vec<[u8; 4]>], margin: u32) -> Vec<u8> {
    encode(&block_image(tile, colors, margin), ImageFormat::Png)
}

/// 2x3 grid of 16px blocks with a 5px remainder strip
pub fn rgb_blocks_png() -> Vec<u8> {
    use colors::*;
    block_png(
        16,
        &[vec![RED, GREEN, BLUE], vec![BLUE, RED, GREEN]],
        5,
    )
}
