//! Gradient fills

use crate::color::Color;

/// Vertical two-color gradient
///
/// Shapes filled with a gradient interpolate from `start` on their first row
/// to `end` on their last row. A `factor` above one compresses the
/// transition into the first `1 / factor` of the shape; the remaining rows
/// keep the end color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
    pub factor: u32,
}

impl Gradient {
    /// Create a simple gradient between two colors
    pub const fn new(start: Color, end: Color) -> Self {
        Self {
            start,
            end,
            factor: 1,
        }
    }

    pub const fn with_factor(mut self, factor: u32) -> Self {
        self.factor = if factor == 0 { 1 } else { factor };
        self
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new(Color::WHITE, Color::BLACK)
    }
}
