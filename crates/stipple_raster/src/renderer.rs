//! Renderer contract and construction
//!
//! [`VectorRenderer`] is the object-safe set of drawing operations. The only
//! implementation, [`Rasterizer`], is generic over the pixel storage type;
//! [`create_renderer`] picks the instantiation once from the bytes per
//! pixel of the target format.

use std::marker::PhantomData;

use image::RgbaImage;
use stipple_paint::{AutoScale, Color, Point, Rect, ShadingStyle, Style, TextAlign, TextAlignVertical, TriangleOrientation};

use crate::blit;
use crate::error::{RasterError, Result};
use crate::format::{FormatId, PixelFormat};
use crate::present::DisplayBackend;
use crate::raster::{circle, line, square, tab, triangle, Brush};
use crate::shading;
use crate::step::{self, DrawStep, StepExtra};
use crate::surface::{Pixel, Surface};
use crate::target::Target;
use crate::text::{self, Font, TextOptions};

pub use crate::raster::tab::TabBase;

/// Edge rendering mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    #[default]
    Aliased,
    /// Wu anti-aliasing on lines, circles, rounded borders and tabs
    Antialiased,
}

/// Renderer selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererConfig {
    pub format: FormatId,
    pub mode: RenderMode,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            format: FormatId::Argb8888,
            mode: RenderMode::Aliased,
        }
    }
}

impl RendererConfig {
    pub fn new(format: FormatId, mode: RenderMode) -> Self {
        Self { format, mode }
    }

    pub fn build(&self) -> Result<Box<dyn VectorRenderer>> {
        create_renderer(self.format.format(), self.mode)
    }
}

/// Create the renderer for `format`
///
/// Fails with [`RasterError::UnsupportedDepth`] unless the format stores
/// pixels in 2 or 4 bytes.
pub fn create_renderer(format: PixelFormat, mode: RenderMode) -> Result<Box<dyn VectorRenderer>> {
    tracing::debug!("creating {:?} renderer for {:?}", mode, format);
    match format.bytes_per_pixel {
        2 => Ok(Box::new(Rasterizer::<u16>::new(format, mode))),
        4 => Ok(Box::new(Rasterizer::<u32>::new(format, mode))),
        other => Err(RasterError::UnsupportedDepth(other)),
    }
}

/// Drawing operations on a borrowed surface
///
/// Calls never fail: geometry outside the surface or the style clip is
/// clipped, degenerate geometry is skipped, and a surface whose format
/// differs from [`VectorRenderer::format`] is left untouched.
pub trait VectorRenderer: Send + Sync {
    /// Pixel format this renderer was built for
    fn format(&self) -> PixelFormat;

    fn mode(&self) -> RenderMode;

    /// Line from `from` to `to`, both inclusive
    fn draw_line(&self, surface: &mut Surface, style: &Style, from: Point, to: Point);

    fn draw_circle(&self, surface: &mut Surface, style: &Style, center: Point, r: i32);

    fn draw_square(&self, surface: &mut Surface, style: &Style, rect: Rect);

    fn draw_rounded_square(&self, surface: &mut Surface, style: &Style, rect: Rect, r: i32);

    fn draw_triangle(
        &self,
        surface: &mut Surface,
        style: &Style,
        rect: Rect,
        orientation: TriangleOrientation,
    );

    /// Tab with rounded top corners and an open bottom
    fn draw_tab(&self, surface: &mut Surface, style: &Style, rect: Rect, r: i32, base: TabBase);

    /// Square grown outward by `style.bevel` with a two-tone edge
    fn draw_beveled_square(&self, surface: &mut Surface, style: &Style, rect: Rect);

    /// Both diagonals of `rect`
    fn draw_cross(&self, surface: &mut Surface, style: &Style, rect: Rect);

    /// Paint the clip area with the style's fill
    fn fill_surface(&self, surface: &mut Surface, style: &Style);

    /// Opaque copy of `source` with its top-left corner at `dest`
    fn blit_surface(&self, surface: &mut Surface, style: &Style, source: &Surface, dest: Point);

    /// Opaque copy of `src_rect` of `source`
    fn blit_sub_surface(
        &self,
        surface: &mut Surface,
        style: &Style,
        source: &Surface,
        src_rect: Rect,
        dest: Point,
    );

    /// Copy skipping pixels equal to `key`
    fn blit_key_bitmap(
        &self,
        surface: &mut Surface,
        style: &Style,
        source: &Surface,
        dest: Point,
        key: Color,
    );

    /// Alpha-blend an RGBA bitmap into `area`
    #[allow(clippy::too_many_arguments)]
    fn blit_alpha_bitmap(
        &self,
        surface: &mut Surface,
        style: &Style,
        source: &RgbaImage,
        area: Rect,
        scale: AutoScale,
        align: TextAlign,
        valign: TextAlignVertical,
    );

    /// Draw `text` in `style.fg` inside `area`
    fn draw_string(
        &self,
        surface: &mut Surface,
        style: &Style,
        font: &dyn Font,
        text: &str,
        area: Rect,
        options: &TextOptions,
    );

    fn apply_screen_shading(&self, surface: &mut Surface, shading: ShadingStyle);

    /// Hand `rect` of `surface` to the display backend
    fn copy_frame(&self, surface: &Surface, backend: &mut dyn DisplayBackend, rect: Rect) {
        crate::present::copy_rect(surface, backend, rect);
    }

    fn copy_whole_frame(&self, surface: &Surface, backend: &mut dyn DisplayBackend) {
        self.copy_frame(surface, backend, surface.bounds());
    }

    /// Position `step` inside `area` and draw it over `base`
    ///
    /// Returns the region that may have changed, for dirty tracking.
    fn draw_step(
        &self,
        surface: &mut Surface,
        base: &Style,
        area: Rect,
        step: &DrawStep,
        extra: StepExtra,
    ) -> Rect {
        step::draw_step(self, surface, base, area, step, extra)
    }
}

/// Software rasterizer for one pixel storage type
pub struct Rasterizer<P: Pixel> {
    format: PixelFormat,
    mode: RenderMode,
    _pixel: PhantomData<fn() -> P>,
}

impl<P: Pixel> Rasterizer<P> {
    pub fn new(format: PixelFormat, mode: RenderMode) -> Self {
        Self {
            format,
            mode,
            _pixel: PhantomData,
        }
    }

    fn brush<'s>(&self, style: &'s Style) -> Brush<'s> {
        Brush::new(self.format, style, self.mode == RenderMode::Antialiased)
    }

    /// Bind `surface` with the style clip, refusing foreign formats
    fn target<'a>(&self, surface: &'a mut Surface, clip: Option<Rect>) -> Option<Target<'a, P>> {
        if surface.format() != self.format {
            tracing::warn!(
                "surface format {:?} does not match renderer format {:?}; skipping draw",
                surface.format(),
                self.format
            );
            return None;
        }
        let clip = match clip {
            Some(c) => c.clip_to_size(surface.width(), surface.height()),
            None => surface.bounds(),
        };
        Target::new(surface, clip)
    }

    fn with_target(
        &self,
        surface: &mut Surface,
        style: &Style,
        f: impl FnOnce(&mut Target<'_, P>, &Brush<'_>),
    ) {
        let brush = self.brush(style);
        if let Some(mut t) = self.target(surface, style.clip) {
            f(&mut t, &brush);
        }
    }
}

impl<P: Pixel> VectorRenderer for Rasterizer<P> {
    fn format(&self) -> PixelFormat {
        self.format
    }

    fn mode(&self) -> RenderMode {
        self.mode
    }

    fn draw_line(&self, surface: &mut Surface, style: &Style, from: Point, to: Point) {
        let (w, h) = (surface.width(), surface.height());
        self.with_target(surface, style, |t, b| {
            line::draw_line(t, b, w, h, from.x, from.y, to.x, to.y)
        });
    }

    fn draw_circle(&self, surface: &mut Surface, style: &Style, center: Point, r: i32) {
        self.with_target(surface, style, |t, b| {
            circle::draw_circle(t, b, center.x, center.y, r)
        });
    }

    fn draw_square(&self, surface: &mut Surface, style: &Style, rect: Rect) {
        self.with_target(surface, style, |t, b| {
            square::draw_square(t, b, rect.left, rect.top, rect.width(), rect.height())
        });
    }

    fn draw_rounded_square(&self, surface: &mut Surface, style: &Style, rect: Rect, r: i32) {
        self.with_target(surface, style, |t, b| {
            square::draw_rounded_square(t, b, rect.left, rect.top, r, rect.width(), rect.height())
        });
    }

    fn draw_triangle(
        &self,
        surface: &mut Surface,
        style: &Style,
        rect: Rect,
        orientation: TriangleOrientation,
    ) {
        self.with_target(surface, style, |t, b| {
            triangle::draw_triangle(
                t,
                b,
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                orientation,
            )
        });
    }

    fn draw_tab(&self, surface: &mut Surface, style: &Style, rect: Rect, r: i32, base: TabBase) {
        self.with_target(surface, style, |t, b| {
            tab::draw_tab(t, b, rect.left, rect.top, r, rect.width(), rect.height(), base)
        });
    }

    fn draw_beveled_square(&self, surface: &mut Surface, style: &Style, rect: Rect) {
        self.with_target(surface, style, |t, b| {
            square::draw_beveled_square(t, b, rect.left, rect.top, rect.width(), rect.height())
        });
    }

    fn draw_cross(&self, surface: &mut Surface, style: &Style, rect: Rect) {
        let (w, h) = (surface.width(), surface.height());
        self.with_target(surface, style, |t, b| {
            line::draw_cross(t, b, w, h, rect.left, rect.top, rect.width(), rect.height())
        });
    }

    fn fill_surface(&self, surface: &mut Surface, style: &Style) {
        let height = surface.height();
        self.with_target(surface, style, |t, b| blit::fill_surface(t, b, height));
    }

    fn blit_surface(&self, surface: &mut Surface, style: &Style, source: &Surface, dest: Point) {
        self.blit_sub_surface(surface, style, source, source.bounds(), dest);
    }

    fn blit_sub_surface(
        &self,
        surface: &mut Surface,
        style: &Style,
        source: &Surface,
        src_rect: Rect,
        dest: Point,
    ) {
        if !self.compatible(source) {
            return;
        }
        if let Some(mut t) = self.target(surface, style.clip) {
            blit::copy(&mut t, source, src_rect, dest, None);
        }
    }

    fn blit_key_bitmap(
        &self,
        surface: &mut Surface,
        style: &Style,
        source: &Surface,
        dest: Point,
        key: Color,
    ) {
        if !self.compatible(source) {
            return;
        }
        let key = source.map_color(key);
        if let Some(mut t) = self.target(surface, style.clip) {
            blit::copy(&mut t, source, source.bounds(), dest, Some(key));
        }
    }

    fn blit_alpha_bitmap(
        &self,
        surface: &mut Surface,
        style: &Style,
        source: &RgbaImage,
        area: Rect,
        scale: AutoScale,
        align: TextAlign,
        valign: TextAlignVertical,
    ) {
        let format = self.format;
        if let Some(mut t) = self.target(surface, style.clip) {
            blit::blit_alpha(&mut t, &format, source, area, scale, align, valign);
        }
    }

    fn draw_string(
        &self,
        surface: &mut Surface,
        style: &Style,
        font: &dyn Font,
        text: &str,
        area: Rect,
        options: &TextOptions,
    ) {
        let color = self.format.rgb_to_color(style.fg.r, style.fg.g, style.fg.b);
        if let Some(mut t) = self.target(surface, style.clip) {
            text::draw_string(&mut t, font, text, area, options, color);
        }
    }

    fn apply_screen_shading(&self, surface: &mut Surface, shading: ShadingStyle) {
        if let Some(mut t) = self.target(surface, None) {
            shading::apply(&mut t, shading);
        }
    }
}

impl<P: Pixel> Rasterizer<P> {
    fn compatible(&self, source: &Surface) -> bool {
        if source.format() != self.format {
            tracing::warn!(
                "bitmap format {:?} does not match renderer format {:?}; skipping blit",
                source.format(),
                self.format
            );
            return false;
        }
        true
    }
}
