//! Pixel format descriptors
//!
//! A [`PixelFormat`] describes how 8-bit R/G/B/A channels are packed into a
//! 16-bit or 32-bit pixel: each channel keeps its top `8 - loss` bits and is
//! stored at `shift`. A channel with a loss of 8 is absent.

use std::fmt;
use std::str::FromStr;

use crate::error::{RasterError, Result};

/// Packed pixel layout
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat {
    pub bytes_per_pixel: u8,
    pub r_loss: u8,
    pub g_loss: u8,
    pub b_loss: u8,
    pub a_loss: u8,
    pub r_shift: u8,
    pub g_shift: u8,
    pub b_shift: u8,
    pub a_shift: u8,
}

impl PixelFormat {
    /// Create from channel bit counts and shifts
    pub const fn new(bytes_per_pixel: u8, bits: [u8; 4], shifts: [u8; 4]) -> Self {
        Self {
            bytes_per_pixel,
            r_loss: 8 - bits[0],
            g_loss: 8 - bits[1],
            b_loss: 8 - bits[2],
            a_loss: 8 - bits[3],
            r_shift: shifts[0],
            g_shift: shifts[1],
            b_shift: shifts[2],
            a_shift: shifts[3],
        }
    }

    pub const fn rgb555() -> Self {
        Self::new(2, [5, 5, 5, 0], [10, 5, 0, 0])
    }

    pub const fn rgb565() -> Self {
        Self::new(2, [5, 6, 5, 0], [11, 5, 0, 0])
    }

    pub const fn argb1555() -> Self {
        Self::new(2, [5, 5, 5, 1], [10, 5, 0, 15])
    }

    pub const fn argb4444() -> Self {
        Self::new(2, [4, 4, 4, 4], [8, 4, 0, 12])
    }

    /// 32-bit XRGB, the top byte unused
    pub const fn rgb888() -> Self {
        Self::new(4, [8, 8, 8, 0], [16, 8, 0, 0])
    }

    pub const fn argb8888() -> Self {
        Self::new(4, [8, 8, 8, 8], [16, 8, 0, 24])
    }

    pub const fn rgba8888() -> Self {
        Self::new(4, [8, 8, 8, 8], [24, 16, 8, 0])
    }

    pub const fn r_bits(&self) -> u8 {
        8 - self.r_loss
    }

    pub const fn g_bits(&self) -> u8 {
        8 - self.g_loss
    }

    pub const fn b_bits(&self) -> u8 {
        8 - self.b_loss
    }

    pub const fn a_bits(&self) -> u8 {
        8 - self.a_loss
    }

    pub const fn has_alpha(&self) -> bool {
        self.a_loss < 8
    }

    pub const fn red_mask(&self) -> u32 {
        (0xFF >> self.r_loss) << self.r_shift
    }

    pub const fn green_mask(&self) -> u32 {
        (0xFF >> self.g_loss) << self.g_shift
    }

    pub const fn blue_mask(&self) -> u32 {
        (0xFF >> self.b_loss) << self.b_shift
    }

    pub const fn alpha_mask(&self) -> u32 {
        (0xFF >> self.a_loss) << self.a_shift
    }

    /// Check the storage width is one the rasterizer can drive
    pub fn validate(&self) -> Result<()> {
        match self.bytes_per_pixel {
            2 | 4 => Ok(()),
            other => Err(RasterError::UnsupportedDepth(other)),
        }
    }

    /// Pack an opaque color
    #[inline]
    pub const fn rgb_to_color(&self, r: u8, g: u8, b: u8) -> u32 {
        self.argb_to_color(0xFF, r, g, b)
    }

    /// Pack a color with alpha (ignored when the format has no alpha)
    #[inline]
    pub const fn argb_to_color(&self, a: u8, r: u8, g: u8, b: u8) -> u32 {
        (((a as u32) >> self.a_loss) << self.a_shift)
            | (((r as u32) >> self.r_loss) << self.r_shift)
            | (((g as u32) >> self.g_loss) << self.g_shift)
            | (((b as u32) >> self.b_loss) << self.b_shift)
    }

    /// Unpack to 8-bit channels, replicating high bits into the low ones
    #[inline]
    pub fn color_to_rgb(&self, color: u32) -> (u8, u8, u8) {
        (
            expand(self.r_bits(), (color & self.red_mask()) >> self.r_shift),
            expand(self.g_bits(), (color & self.green_mask()) >> self.g_shift),
            expand(self.b_bits(), (color & self.blue_mask()) >> self.b_shift),
        )
    }

    /// Unpack with alpha; formats without alpha report 255
    #[inline]
    pub fn color_to_argb(&self, color: u32) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.color_to_rgb(color);
        let a = if self.has_alpha() {
            expand(self.a_bits(), (color & self.alpha_mask()) >> self.a_shift)
        } else {
            0xFF
        };
        (a, r, g, b)
    }
}

impl fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match FormatId::ALL.iter().find(|id| id.format() == *self) {
            Some(id) => write!(f, "PixelFormat({})", id.name()),
            None => write!(
                f,
                "PixelFormat({}bpp r{}@{} g{}@{} b{}@{} a{}@{})",
                self.bytes_per_pixel * 8,
                self.r_bits(),
                self.r_shift,
                self.g_bits(),
                self.g_shift,
                self.b_bits(),
                self.b_shift,
                self.a_bits(),
                self.a_shift
            ),
        }
    }
}

/// Scale an n-bit channel value to 8 bits by bit replication
#[inline]
fn expand(bits: u8, value: u32) -> u8 {
    if bits == 0 {
        return 0xFF;
    }
    let bits = bits as i32;
    let mut out = 0u32;
    let mut shift = 8 - bits;
    while shift > -bits {
        out |= if shift >= 0 {
            value << shift
        } else {
            value >> -shift
        };
        shift -= bits;
    }
    (out & 0xFF) as u8
}

/// Named pixel layouts, as used in configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatId {
    Rgb555,
    Rgb565,
    Argb1555,
    Argb4444,
    Rgb888,
    Argb8888,
    Rgba8888,
}

impl FormatId {
    pub const ALL: [FormatId; 7] = [
        FormatId::Rgb555,
        FormatId::Rgb565,
        FormatId::Argb1555,
        FormatId::Argb4444,
        FormatId::Rgb888,
        FormatId::Argb8888,
        FormatId::Rgba8888,
    ];

    pub const fn format(self) -> PixelFormat {
        match self {
            FormatId::Rgb555 => PixelFormat::rgb555(),
            FormatId::Rgb565 => PixelFormat::rgb565(),
            FormatId::Argb1555 => PixelFormat::argb1555(),
            FormatId::Argb4444 => PixelFormat::argb4444(),
            FormatId::Rgb888 => PixelFormat::rgb888(),
            FormatId::Argb8888 => PixelFormat::argb8888(),
            FormatId::Rgba8888 => PixelFormat::rgba8888(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FormatId::Rgb555 => "rgb555",
            FormatId::Rgb565 => "rgb565",
            FormatId::Argb1555 => "argb1555",
            FormatId::Argb4444 => "argb4444",
            FormatId::Rgb888 => "rgb888",
            FormatId::Argb8888 => "argb8888",
            FormatId::Rgba8888 => "rgba8888",
        }
    }
}

impl FromStr for FormatId {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        FormatId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| RasterError::UnknownFormat(s.to_string()))
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
