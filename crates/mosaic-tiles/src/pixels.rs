//! Borrowed RGBA pixel buffer.

use crate::error::InvalidInput;

/// Channels per pixel: red, green, blue, alpha.
pub const CHANNELS: usize = 4;

/// A validated view over row-major RGBA8 pixel data.
///
/// The buffer is borrowed for the duration of a sampling call; the caller
/// keeps ownership of the decoded image.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data` as a `width` x `height` RGBA image.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::EmptyImage`] if either dimension is zero
    /// - [`InvalidInput::DimensionsOverflow`] if the byte length overflows
    /// - [`InvalidInput::BufferLength`] if `data.len() != width * height * 4`
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self, InvalidInput> {
        if width == 0 || height == 0 {
            return Err(InvalidInput::EmptyImage { width, height });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(InvalidInput::DimensionsOverflow { width, height })?;

        if data.len() != expected {
            return Err(InvalidInput::BufferLength {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// RGB of the pixel at `(x, y)`; alpha is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }
}
