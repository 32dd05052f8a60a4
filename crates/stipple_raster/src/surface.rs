//! Pixel surfaces
//!
//! A [`Surface`] is a plain 2D pixel buffer: width, height, row pitch (in
//! pixels), a [`PixelFormat`] and the backing storage. The renderer never
//! keeps a surface; every draw call borrows one mutably.

use bytemuck::Pod;
use image::RgbaImage;
use stipple_paint::{Color, Rect};

use crate::error::{RasterError, Result};
use crate::format::PixelFormat;

/// Packed pixel storage type (`u16` for 16-bit formats, `u32` for 32-bit)
pub trait Pixel: Pod + Default + PartialEq + Send + Sync + 'static {
    /// Storage width in bytes
    const BYTES: u8;

    fn from_u32(value: u32) -> Self;

    fn to_u32(self) -> u32;

    /// Borrow the storage when it holds this pixel type
    fn slice(data: &PixelData) -> Option<&[Self]>;

    fn slice_mut(data: &mut PixelData) -> Option<&mut [Self]>;
}

impl Pixel for u16 {
    const BYTES: u8 = 2;

    #[inline]
    fn from_u32(value: u32) -> Self {
        value as u16
    }

    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }

    fn slice(data: &PixelData) -> Option<&[Self]> {
        match data {
            PixelData::U16(pixels) => Some(pixels),
            PixelData::U32(_) => None,
        }
    }

    fn slice_mut(data: &mut PixelData) -> Option<&mut [Self]> {
        match data {
            PixelData::U16(pixels) => Some(pixels),
            PixelData::U32(_) => None,
        }
    }
}

impl Pixel for u32 {
    const BYTES: u8 = 4;

    #[inline]
    fn from_u32(value: u32) -> Self {
        value
    }

    #[inline]
    fn to_u32(self) -> u32 {
        self
    }

    fn slice(data: &PixelData) -> Option<&[Self]> {
        match data {
            PixelData::U32(pixels) => Some(pixels),
            PixelData::U16(_) => None,
        }
    }

    fn slice_mut(data: &mut PixelData) -> Option<&mut [Self]> {
        match data {
            PixelData::U32(pixels) => Some(pixels),
            PixelData::U16(_) => None,
        }
    }
}

/// Backing storage of a surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PixelData {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl PixelData {
    pub fn len(&self) -> usize {
        match self {
            PixelData::U16(p) => p.len(),
            PixelData::U32(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bytes_per_pixel(&self) -> u8 {
        match self {
            PixelData::U16(_) => 2,
            PixelData::U32(_) => 4,
        }
    }
}

/// A caller-owned 2D pixel buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pitch: usize,
    format: PixelFormat,
    data: PixelData,
}

impl Surface {
    /// Allocate a zeroed surface with `pitch == width`
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        format.validate()?;
        check_dimensions(width, height)?;
        let len = width as usize * height as usize;
        let data = match format.bytes_per_pixel {
            2 => PixelData::U16(vec![0; len]),
            _ => PixelData::U32(vec![0; len]),
        };
        Ok(Self {
            width,
            height,
            pitch: width as usize,
            format,
            data,
        })
    }

    /// Wrap existing storage
    ///
    /// `pitch` is the row stride in pixels and must be at least `width`.
    pub fn from_data(
        width: u32,
        height: u32,
        pitch: usize,
        format: PixelFormat,
        data: PixelData,
    ) -> Result<Self> {
        format.validate()?;
        check_dimensions(width, height)?;
        if data.bytes_per_pixel() != format.bytes_per_pixel {
            return Err(RasterError::UnsupportedDepth(data.bytes_per_pixel()));
        }
        if pitch < width as usize {
            return Err(RasterError::InvalidGeometry(format!(
                "pitch {} is smaller than width {}",
                pitch, width
            )));
        }
        let required = if height == 0 {
            0
        } else {
            pitch * (height as usize - 1) + width as usize
        };
        if data.len() < required {
            return Err(RasterError::BufferTooSmall {
                required,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pitch,
            format,
            data,
        })
    }

    /// Convert an RGBA image, dropping its alpha unless the format keeps it
    pub fn from_rgba_image(image: &RgbaImage, format: PixelFormat) -> Result<Self> {
        let mut surface = Self::new(image.width(), image.height(), format)?;
        for (x, y, px) in image.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            surface.set_pixel(x as i32, y as i32, format.argb_to_color(a, r, g, b));
        }
        Ok(surface)
    }

    /// Width as a signed coordinate
    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// Row stride in pixels
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn pitch_bytes(&self) -> usize {
        self.pitch * self.format.bytes_per_pixel as usize
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }

    pub fn into_data(self) -> PixelData {
        self.data
    }

    /// Typed view of the storage
    pub fn pixels<P: Pixel>(&self) -> Option<&[P]> {
        P::slice(&self.data)
    }

    pub fn pixels_mut<P: Pixel>(&mut self) -> Option<&mut [P]> {
        P::slice_mut(&mut self.data)
    }

    /// Raw bytes in native endianness, as handed to display backends
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            PixelData::U16(p) => bytemuck::cast_slice(p),
            PixelData::U32(p) => bytemuck::cast_slice(p),
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        Some(y as usize * self.pitch + x as usize)
    }

    /// Packed pixel at `(x, y)`, `None` outside the surface
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        let i = self.index(x, y)?;
        match &self.data {
            PixelData::U16(p) => p.get(i).map(|&v| v as u32),
            PixelData::U32(p) => p.get(i).copied(),
        }
    }

    /// Write one packed pixel; out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        match &mut self.data {
            PixelData::U16(p) => {
                if let Some(px) = p.get_mut(i) {
                    *px = color as u16;
                }
            }
            PixelData::U32(p) => {
                if let Some(px) = p.get_mut(i) {
                    *px = color;
                }
            }
        }
    }

    /// Pixel at `(x, y)` as an 8-bit color
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.get_pixel(x, y).map(|p| {
            let (r, g, b) = self.format.color_to_rgb(p);
            Color::new(r, g, b)
        })
    }

    /// Pack a style color in this surface's format
    pub fn map_color(&self, color: Color) -> u32 {
        self.format.rgb_to_color(color.r, color.g, color.b)
    }

    /// Set every visible pixel to `color`
    pub fn clear(&mut self, color: u32) {
        let (w, pitch) = (self.width as usize, self.pitch);
        match &mut self.data {
            PixelData::U16(p) => fill_rows(p, pitch, w, color as u16),
            PixelData::U32(p) => fill_rows(p, pitch, w, color),
        }
    }

    /// Copy into an RGBA image for encoding
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.get_pixel(x as i32, y as i32).unwrap_or(0);
            let (a, r, g, b) = self.format.color_to_argb(p);
            image::Rgba([r, g, b, a])
        })
    }
}

fn fill_rows<P: Copy>(pixels: &mut [P], pitch: usize, width: usize, value: P) {
    if width == 0 {
        return;
    }
    for row in pixels.chunks_mut(pitch) {
        let end = width.min(row.len());
        row[..end].fill(value);
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(RasterError::InvalidGeometry(format!(
            "{}x{} exceeds the coordinate range",
            width, height
        )));
    }
    Ok(())
}
