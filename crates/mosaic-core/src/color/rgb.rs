//! Packed 24-bit RGB color.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

/// A 24-bit RGB color packed as `0x00RRGGBB`.
///
/// Colors are always derived from pixel data. There is no alpha channel:
/// two colors are equal when all three channels are equal.
///
/// # Example
///
/// ```
/// use mosaic_core::Color;
///
/// let orange = Color::from_rgb(255, 128, 0);
/// assert_eq!(orange.packed(), 0xFF8000);
/// assert_eq!(orange.to_string(), "#ff8000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xFFFFFF);

    #[inline]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self((red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    /// Build a color from a packed value. Bits above the low 24 are dropped.
    #[inline]
    pub const fn from_packed(value: u32) -> Self {
        Self(value & 0xFF_FFFF)
    }

    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16 & 0xFF) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8 & 0xFF) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.red(), self.green(), self.blue()]
    }

    /// Squared Euclidean distance over the independent R, G, B channels.
    #[inline]
    pub fn distance_squared(self, other: Self) -> u32 {
        let dr = self.red() as i32 - other.red() as i32;
        let dg = self.green() as i32 - other.green() as i32;
        let db = self.blue() as i32 - other.blue() as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance over R, G, B, in `0.0..=441.67`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl From<[u8; 3]> for Color {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_rgb(bytes[0], bytes[1], bytes[2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    #[error("invalid hex color length (expected 3 or 6 digits)")]
    InvalidLength,
    #[error("invalid hex digit: {0}")]
    InvalidHex(#[from] ParseIntError),
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_rgb(r, g, b))
            }
            6 => Ok(Self::from_packed(u32::from_str_radix(s, 16)?)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
