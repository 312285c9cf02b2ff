use super::Color;

/// A color with a fractional alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Color,
    pub alpha: f64,
}

impl Rgba {
    pub fn new(color: Color, alpha: f64) -> Self {
        Self { color, alpha }
    }

    /// Alpha scaled to a byte, clamped and rounded.
    pub fn alpha_u8(&self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}
