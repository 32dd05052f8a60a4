//! Gradient cache and ordered dithering
//!
//! A gradient-filled shape first builds a [`GradientCache`] for its height:
//! one packed color per band of rows that quantize to the same value. Rows
//! are then painted through [`RowFill`], which dithers between a band and
//! the next one with a 2x2 ordered pattern so 16-bit targets do not show
//! hard steps.

use stipple_paint::Gradient;

use crate::format::PixelFormat;

/// Quantized gradient colors and the rows where they start
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradientCache {
    colors: Vec<u32>,
    /// `breaks[k]` is the first row of band `k`; the last entry is the height
    breaks: Vec<i32>,
}

impl GradientCache {
    /// Interpolate `gradient` over `height` rows in `format`
    pub fn new(format: &PixelFormat, gradient: &Gradient, height: i32) -> Self {
        let height = height.max(1);
        let factor = gradient.factor.max(1) as i64;
        let start = format.rgb_to_color(gradient.start.r, gradient.start.g, gradient.start.b);
        let end = format.rgb_to_color(gradient.end.r, gradient.end.g, gradient.end.b);
        let masks = [format.red_mask(), format.green_mask(), format.blue_mask()];
        let alpha = format.alpha_mask();
        let last = (height - 1) as i64;

        let mut colors: Vec<u32> = Vec::new();
        let mut breaks: Vec<i32> = Vec::new();
        for row in 0..height {
            let pos = if last == 0 {
                0
            } else {
                ((row as i64 * factor).min(last) << 12) / last
            };
            let color = masks.iter().fold(alpha, |acc, &m| {
                let s = (start & m) as i64;
                let diff = (end & m) as i64 - s;
                acc | ((s + ((diff * pos) >> 12)) as u32 & m)
            });
            if colors.last() != Some(&color) {
                colors.push(color);
                breaks.push(row);
            }
        }
        breaks.push(height);
        Self { colors, breaks }
    }

    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    pub fn breaks(&self) -> &[i32] {
        &self.breaks
    }

    /// Band holding local row `row` (clamped to the table)
    pub fn band(&self, row: i32) -> usize {
        let bands = self.colors.len();
        match self.breaks[..bands].binary_search(&row) {
            Ok(k) => k,
            Err(0) => 0,
            Err(k) => (k - 1).min(bands - 1),
        }
    }

    /// Undithered color of local row `row`
    pub fn row_color(&self, row: i32) -> u32 {
        self.colors[self.band(row)]
    }

    /// Fill rule for local row `row`
    pub fn row_fill(&self, row: i32) -> RowFill {
        let k = self.band(row);
        let current = self.colors[k];
        let Some(&next) = self.colors.get(k + 1) else {
            return RowFill::Solid(current);
        };
        let strip = self.breaks[k + 1] - self.breaks[k];
        if strip < 2 || current == next {
            return RowFill::Solid(current);
        }
        let grade = (((row - self.breaks[k]).max(0) % strip) * 4 / strip) as u8;
        let odd_row = row & 1 != 0;
        if grade == 0 {
            RowFill::Solid(current)
        } else if grade == 3 && odd_row {
            RowFill::Solid(next)
        } else {
            RowFill::Dither {
                current,
                next,
                grade,
                odd_row,
            }
        }
    }
}

/// How one gradient row is painted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowFill {
    Solid(u32),
    /// Per-pixel choice between two adjacent bands
    Dither {
        current: u32,
        next: u32,
        grade: u8,
        odd_row: bool,
    },
}

impl RowFill {
    /// Color at absolute column `x`
    #[inline]
    pub fn pixel(&self, x: i32) -> u32 {
        match *self {
            RowFill::Solid(c) => c,
            RowFill::Dither {
                current,
                next,
                grade,
                odd_row,
            } => {
                let odd_col = x & 1 != 0;
                if (odd_row && odd_col) || (grade >= 2 && odd_row && !odd_col) || (grade == 3 && odd_col)
                {
                    next
                } else {
                    current
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stipple_paint::Color;

    #[test]
    fn test_endpoints_exact() {
        let fmt = PixelFormat::rgb565();
        let cache = GradientCache::new(&fmt, &Gradient::new(Color::RED, Color::BLUE), 100);
        assert_eq!(cache.row_color(0), fmt.rgb_to_color(255, 0, 0));
        assert_eq!(cache.row_color(99), fmt.rgb_to_color(0, 0, 255));
        assert_eq!(cache.row_fill(0), RowFill::Solid(fmt.rgb_to_color(255, 0, 0)));
        assert_eq!(cache.row_fill(99), RowFill::Solid(fmt.rgb_to_color(0, 0, 255)));
    }

    #[test]
    fn test_breaks_cover_rows() {
        let fmt = PixelFormat::argb8888();
        let cache = GradientCache::new(&fmt, &Gradient::new(Color::BLACK, Color::WHITE), 37);
        let breaks = cache.breaks();
        assert_eq!(breaks[0], 0);
        assert_eq!(*breaks.last().unwrap(), 37);
        assert_eq!(breaks.len(), cache.colors().len() + 1);
        assert!(breaks.windows(2).all(|w| w[0] < w[1]));
        assert!(cache.colors().windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_monotonic_channels() {
        let fmt = PixelFormat::rgb888();
        let cache = GradientCache::new(&fmt, &Gradient::new(Color::RED, Color::BLUE), 50);
        let reds: Vec<u8> = (0..50).map(|y| fmt.color_to_rgb(cache.row_color(y)).0).collect();
        let blues: Vec<u8> = (0..50).map(|y| fmt.color_to_rgb(cache.row_color(y)).2).collect();
        assert!(reds.windows(2).all(|w| w[0] >= w[1]));
        assert!(blues.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_factor_finishes_early() {
        let fmt = PixelFormat::rgb888();
        let g = Gradient::new(Color::BLACK, Color::WHITE).with_factor(2);
        let cache = GradientCache::new(&fmt, &g, 21);
        let white = fmt.rgb_to_color(255, 255, 255);
        assert_eq!(cache.row_color(10), white);
        assert_eq!(cache.row_color(20), white);
        assert_ne!(cache.row_color(9), white);
    }

    #[test]
    fn test_dither_pattern() {
        let fill = RowFill::Dither {
            current: 1,
            next: 2,
            grade: 1,
            odd_row: true,
        };
        assert_eq!([fill.pixel(0), fill.pixel(1)], [1, 2]);

        let fill = RowFill::Dither {
            current: 1,
            next: 2,
            grade: 3,
            odd_row: false,
        };
        assert_eq!([fill.pixel(0), fill.pixel(1)], [1, 2]);

        let fill = RowFill::Dither {
            current: 1,
            next: 2,
            grade: 2,
            odd_row: true,
        };
        assert_eq!([fill.pixel(0), fill.pixel(1)], [2, 2]);
    }

    #[test]
    fn test_single_row() {
        let fmt = PixelFormat::rgb888();
        let cache = GradientCache::new(&fmt, &Gradient::new(Color::RED, Color::BLUE), 1);
        assert_eq!(cache.colors().len(), 1);
        assert_eq!(cache.breaks(), &[0, 1]);
    }
}
