//! Hex color codes for mosaic tiles
//!
//! A [`ColorCode`] is the only thing the renderer knows about a tile. It is
//! also the path component of the swatch URL (`/color/<code>`), so its text
//! form is fixed: six lower-case hex digits, no prefix.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Bit set above the 24 color bits so the hex text always has 7 digits.
const SENTINEL_BIT: u32 = 1 << 24;

/// Six lower-case hex digits encoding one RGB triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorCode(String);

impl ColorCode {
    /// Encode an RGB triple.
    ///
    /// # Example
    /// ```
    /// use mosaic_tiles::ColorCode;
    /// assert_eq!(ColorCode::from_rgb(18, 52, 86).as_str(), "123456");
    /// assert_eq!(ColorCode::from_rgb(0, 0, 0).as_str(), "000000");
    /// ```
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let packed = SENTINEL_BIT | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        let hex = format!("{:x}", packed);
        // Drop the sentinel digit; the rest is already zero-padded.
        Self(hex[1..].to_string())
    }

    /// The code as text, e.g. `"ff0000"`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to `[r, g, b]`.
    pub fn to_rgb(&self) -> [u8; 3] {
        // Construction guarantees six valid hex digits.
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [channel(0), channel(2), channel(4)]
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColorCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<[u8; 3]> for ColorCode {
    fn from(rgb: [u8; 3]) -> Self {
        Self::from_rgb(rgb[0], rgb[1], rgb[2])
    }
}

/// Error type for parsing a [`ColorCode`] from text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorCodeError {
    /// Not exactly six digits after stripping an optional '#'
    InvalidLength(usize),
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorCodeError {
    fn from(err: ParseIntError) -> Self {
        ParseColorCodeError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorCodeError::InvalidLength(len) => {
                write!(f, "invalid color code length {} (expected 6 hex digits)", len)
            }
            ParseColorCodeError::InvalidHex(err) => write!(f, "invalid hex character: {}", err),
        }
    }
}

impl std::error::Error for ParseColorCodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorCodeError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

impl FromStr for ColorCode {
    type Err = ParseColorCodeError;

    /// Parse `RRGGBB` or `#RRGGBB`, in either case.
    ///
    /// The result is normalized to lower-case.
    ///
    /// ```
    /// use mosaic_tiles::ColorCode;
    /// let code: ColorCode = "#FF00aa".parse().unwrap();
    /// assert_eq!(code.as_str(), "ff00aa");
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if s.len() != 6 || !s.is_ascii() {
            return Err(ParseColorCodeError::InvalidLength(s.chars().count()));
        }
        // from_str_radix accepts a leading '+', which is not a hex digit
        if s.starts_with('+') {
            return Err(u8::from_str_radix("+", 16).unwrap_err().into());
        }

        let r = u8::from_str_radix(&s[0..2], 16)?;
        let g = u8::from_str_radix(&s[2..4], 16)?;
        let b = u8::from_str_radix(&s[4..6], 16)?;
        Ok(Self::from_rgb(r, g, b))
    }
}
