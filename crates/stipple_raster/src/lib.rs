//! Stipple Raster
//!
//! Software rasterizer for GUI widget geometry. Shapes are painted straight
//! into caller-owned 16-bit or 32-bit pixel buffers.
//!
//! # Features
//!
//! - Lines, circles, squares, rounded squares, triangles, tabs, beveled
//!   squares and crosses
//! - Solid and dithered gradient fills, stroke widths, drop shadows, bevels
//! - Axis-aligned clipping with a fast path for unclipped shapes
//! - Optional Wu anti-aliasing
//! - Opaque, color-keyed and alpha bitmap blits, text through an injected
//!   font, screen shading and dirty-rect presentation
//!
//! # Example
//!
//! ```ignore
//! use stipple_paint::{Color, FillMode};
//! use stipple_raster::{create_renderer, Canvas, PixelFormat, RenderMode, Surface};
//!
//! let format = PixelFormat::rgb565();
//! let mut surface = Surface::new(320, 200, format)?;
//! let mut canvas = Canvas::new(create_renderer(format, RenderMode::Antialiased)?, &mut surface)?;
//! canvas.set_fg_color(Color::WHITE);
//! canvas.set_fill_mode(FillMode::Foreground);
//! canvas.draw_rounded_square(10, 10, 4, 100, 24);
//! ```

pub mod blend;
pub mod canvas;
pub mod error;
pub mod format;
pub mod gradient;
pub mod present;
pub mod renderer;
pub mod step;
pub mod surface;
pub mod target;
pub mod text;

mod blit;
mod raster;
mod shading;

pub use canvas::Canvas;
pub use error::{RasterError, Result};
pub use format::{FormatId, PixelFormat};
pub use gradient::GradientCache;
pub use present::{DirtyRects, DisplayBackend};
pub use renderer::{create_renderer, Rasterizer, RenderMode, RendererConfig, TabBase, VectorRenderer};
pub use step::{DrawStep, HAlign, StepExtra, StepRadius, StepShape, VAlign};
pub use surface::{Pixel, PixelData, Surface};
pub use text::{Font, GlyphBitmap, TextOptions};
