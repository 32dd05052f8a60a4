//! Per-pixel blending on packed values
//!
//! All arithmetic happens on the native channel positions of the format, so
//! a 16-bit pixel is never widened to 8-bit channels except for luminance.

use crate::format::PixelFormat;

/// Blending helpers for one pixel format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blender {
    format: PixelFormat,
    red: u32,
    green: u32,
    blue: u32,
    alpha: u32,
    /// Lowest bit of every color channel
    low1: u32,
    /// Lowest two bits of every color channel
    low2: u32,
}

impl Blender {
    pub const fn new(format: PixelFormat) -> Self {
        Self {
            format,
            red: format.red_mask(),
            green: format.green_mask(),
            blue: format.blue_mask(),
            alpha: format.alpha_mask(),
            low1: (1 << format.r_shift) | (1 << format.g_shift) | (1 << format.b_shift),
            low2: (3 << format.r_shift) | (3 << format.g_shift) | (3 << format.b_shift),
        }
    }

    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    pub const fn rgb_mask(&self) -> u32 {
        self.red | self.green | self.blue
    }

    pub const fn alpha_mask(&self) -> u32 {
        self.alpha
    }

    /// Blend `src` over `dst` with `alpha / 256` weight, keeping the
    /// destination alpha. 255 overwrites, 0 is a no-op.
    #[inline]
    pub fn blend(&self, dst: u32, src: u32, alpha: u8) -> u32 {
        match alpha {
            0 => dst,
            0xFF => src | self.alpha,
            a => {
                let a = a as i64;
                let mix = |mask: u32| {
                    let d = (dst & mask) as i64;
                    let s = (src & mask) as i64;
                    ((d + (((s - d) * a) >> 8)) as u32) & mask
                };
                mix(self.red) | mix(self.green) | mix(self.blue) | (dst & self.alpha)
            }
        }
    }

    /// Blend for outer anti-aliased edges
    ///
    /// Over a fully transparent destination the color is written with the
    /// coverage as its alpha, so the edge composites later instead of
    /// fading toward whatever garbage color the transparent pixel held.
    #[inline]
    pub fn blend_dest_alpha(&self, dst: u32, src: u32, alpha: u8) -> u32 {
        if self.alpha != 0 && dst & self.alpha == 0 {
            if alpha == 0 {
                return dst;
            }
            let a = ((alpha as u32) >> self.format.a_loss) << self.format.a_shift;
            return (src & self.rgb_mask()) | a;
        }
        self.blend(dst, src, alpha)
    }

    /// Quarter every channel while raising alpha toward opaque
    #[inline]
    pub fn darken(&self, dst: u32) -> u32 {
        let rgb = (dst & self.rgb_mask() & !self.low2) >> 2;
        if self.alpha == 0 {
            return rgb;
        }
        let max = self.alpha >> self.format.a_shift;
        let a = (dst & self.alpha) >> self.format.a_shift;
        let a = a / 4 + max - max / 4;
        rgb | ((a << self.format.a_shift) & self.alpha)
    }

    /// Halve every channel, forcing full alpha
    #[inline]
    pub fn dim(&self, p: u32) -> u32 {
        ((p & self.rgb_mask() & !self.low1) >> 1) | self.alpha
    }

    /// Replace with an opaque gray of the pixel's luminance
    #[inline]
    pub fn luminance(&self, p: u32) -> u32 {
        let (r, g, b) = self.format.color_to_rgb(p);
        let lum = (r >> 2) + (g >> 1) + (b >> 3);
        self.format.rgb_to_color(lum, lum, lum)
    }
}
