//! Stateful drawing front-end
//!
//! [`Canvas`] pairs a renderer with a borrowed surface and a persistent
//! [`Style`]. Setters change the style for every following call until they
//! are called again; nothing is reset implicitly.

use image::RgbaImage;
use stipple_paint::{
    AutoScale, Color, FillMode, Point, Rect, ShadingStyle, ShadowFillMode, Style, TextAlign,
    TextAlignVertical, TriangleOrientation,
};

use crate::error::{RasterError, Result};
use crate::present::DisplayBackend;
use crate::raster::tab::TabBase;
use crate::renderer::VectorRenderer;
use crate::step::{DrawStep, StepExtra};
use crate::surface::Surface;
use crate::text::{Font, TextOptions};

pub struct Canvas<'s> {
    renderer: Box<dyn VectorRenderer>,
    surface: &'s mut Surface,
    style: Style,
}

impl<'s> Canvas<'s> {
    /// Bind `renderer` to `surface`
    ///
    /// Fails with [`RasterError::FormatMismatch`] when the surface is not in
    /// the renderer's format.
    pub fn new(renderer: Box<dyn VectorRenderer>, surface: &'s mut Surface) -> Result<Self> {
        check_format(renderer.as_ref(), surface)?;
        tracing::debug!(
            "canvas bound to {}x{} surface",
            surface.width(),
            surface.height()
        );
        Ok(Self {
            renderer,
            surface,
            style: Style::default(),
        })
    }

    /// Re-target to `surface`, returning the previous one
    pub fn attach_surface(&mut self, surface: &'s mut Surface) -> Result<&'s mut Surface> {
        check_format(self.renderer.as_ref(), surface)?;
        tracing::debug!(
            "canvas re-targeted to {}x{} surface",
            surface.width(),
            surface.height()
        );
        Ok(std::mem::replace(&mut self.surface, surface))
    }

    pub fn surface(&self) -> &Surface {
        &*self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut *self.surface
    }

    pub fn renderer(&self) -> &dyn VectorRenderer {
        self.renderer.as_ref()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Replace the whole style at once
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    // === State ===

    pub fn set_fg_color(&mut self, color: Color) {
        self.style.fg = color;
    }

    pub fn set_bg_color(&mut self, color: Color) {
        self.style.bg = color;
    }

    pub fn set_bevel_color(&mut self, color: Color) {
        self.style.bevel_color = color;
    }

    pub fn set_gradient_colors(&mut self, start: Color, end: Color) {
        self.style.gradient.start = start;
        self.style.gradient.end = end;
    }

    /// The gradient completes after `height / factor` rows
    pub fn set_gradient_factor(&mut self, factor: u32) {
        self.style.gradient.factor = factor.max(1);
    }

    /// `None` clips to the surface only
    pub fn set_clip_rect(&mut self, clip: Option<Rect>) {
        self.style.clip = clip;
    }

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.style.fill_mode = mode;
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.style.stroke_width = width;
    }

    pub fn set_shadow_offset(&mut self, offset: u32) {
        self.style.shadow_offset = offset;
    }

    pub fn set_shadow_fill_mode(&mut self, mode: ShadowFillMode) {
        self.style.shadow_fill_mode = mode;
    }

    pub fn set_bevel(&mut self, bevel: u32) {
        self.style.bevel = bevel;
    }

    // === Primitives ===

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.renderer
            .draw_line(self.surface, &self.style, Point::new(x1, y1), Point::new(x2, y2));
    }

    pub fn draw_circle(&mut self, x: i32, y: i32, r: i32) {
        self.renderer
            .draw_circle(self.surface, &self.style, Point::new(x, y), r);
    }

    pub fn draw_square(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.renderer
            .draw_square(self.surface, &self.style, Rect::from_xywh(x, y, w, h));
    }

    pub fn draw_rounded_square(&mut self, x: i32, y: i32, r: i32, w: i32, h: i32) {
        self.renderer
            .draw_rounded_square(self.surface, &self.style, Rect::from_xywh(x, y, w, h), r);
    }

    pub fn draw_triangle(&mut self, x: i32, y: i32, w: i32, h: i32, orientation: TriangleOrientation) {
        self.renderer.draw_triangle(
            self.surface,
            &self.style,
            Rect::from_xywh(x, y, w, h),
            orientation,
        );
    }

    pub fn draw_tab(&mut self, x: i32, y: i32, r: i32, w: i32, h: i32, base: TabBase) {
        self.renderer
            .draw_tab(self.surface, &self.style, Rect::from_xywh(x, y, w, h), r, base);
    }

    pub fn draw_beveled_square(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.renderer
            .draw_beveled_square(self.surface, &self.style, Rect::from_xywh(x, y, w, h));
    }

    pub fn draw_cross(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.renderer
            .draw_cross(self.surface, &self.style, Rect::from_xywh(x, y, w, h));
    }

    pub fn fill_surface(&mut self) {
        self.renderer.fill_surface(self.surface, &self.style);
    }

    // === Bitmaps and text ===

    pub fn blit_surface(&mut self, source: &Surface, dest: Point) {
        self.renderer
            .blit_surface(self.surface, &self.style, source, dest);
    }

    pub fn blit_sub_surface(&mut self, source: &Surface, src_rect: Rect, dest: Point) {
        self.renderer
            .blit_sub_surface(self.surface, &self.style, source, src_rect, dest);
    }

    pub fn blit_key_bitmap(&mut self, source: &Surface, dest: Point, key: Color) {
        self.renderer
            .blit_key_bitmap(self.surface, &self.style, source, dest, key);
    }

    pub fn blit_alpha_bitmap(
        &mut self,
        source: &RgbaImage,
        area: Rect,
        scale: AutoScale,
        align: TextAlign,
        valign: TextAlignVertical,
    ) {
        self.renderer.blit_alpha_bitmap(
            self.surface,
            &self.style,
            source,
            area,
            scale,
            align,
            valign,
        );
    }

    pub fn draw_string(&mut self, font: &dyn Font, text: &str, area: Rect, options: &TextOptions) {
        self.renderer
            .draw_string(self.surface, &self.style, font, text, area, options);
    }

    pub fn apply_screen_shading(&mut self, shading: ShadingStyle) {
        self.renderer.apply_screen_shading(self.surface, shading);
    }

    // === Presentation ===

    pub fn copy_frame(&self, backend: &mut dyn DisplayBackend, rect: Rect) {
        self.renderer.copy_frame(&*self.surface, backend, rect);
    }

    pub fn copy_whole_frame(&self, backend: &mut dyn DisplayBackend) {
        self.renderer.copy_whole_frame(&*self.surface, backend);
    }

    /// Draw `step` inside `area` on top of the current style
    ///
    /// `clip` narrows the canvas clip for this step only. Returns the region
    /// that may have changed.
    pub fn draw_step(
        &mut self,
        area: Rect,
        clip: Option<Rect>,
        step: &DrawStep,
        extra: StepExtra,
    ) -> Rect {
        let mut base = self.style.clone();
        base.clip = match (self.style.clip, clip) {
            (Some(a), Some(b)) => Some(a.intersect(&b)),
            (a, b) => a.or(b),
        };
        self.renderer
            .draw_step(self.surface, &base, area, step, extra)
    }
}

fn check_format(renderer: &dyn VectorRenderer, surface: &Surface) -> Result<()> {
    if surface.format() != renderer.format() {
        return Err(RasterError::FormatMismatch {
            expected: renderer.format(),
            found: surface.format(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;
    use crate::renderer::{create_renderer, RenderMode};
    use crate::step::StepShape;

    fn renderer() -> Box<dyn VectorRenderer> {
        create_renderer(PixelFormat::rgb565(), RenderMode::Aliased).unwrap()
    }

    #[test]
    fn test_rejects_foreign_surface() {
        let mut s = Surface::new(4, 4, PixelFormat::argb8888()).unwrap();
        let err = Canvas::new(renderer(), &mut s).err();
        assert!(matches!(err, Some(RasterError::FormatMismatch { .. })));
    }

    #[test]
    fn test_state_persists_across_calls() {
        let mut s = Surface::new(10, 10, PixelFormat::rgb565()).unwrap();
        let mut canvas = Canvas::new(renderer(), &mut s).unwrap();
        canvas.set_fg_color(Color::WHITE);
        canvas.set_fill_mode(FillMode::Foreground);
        canvas.draw_square(0, 0, 2, 2);
        canvas.draw_square(5, 5, 2, 2);
        assert_eq!(canvas.surface().color_at(1, 1), Some(Color::WHITE));
        assert_eq!(canvas.surface().color_at(6, 6), Some(Color::WHITE));
        assert_eq!(canvas.surface().color_at(3, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_attach_surface_swaps() {
        let mut a = Surface::new(4, 4, PixelFormat::rgb565()).unwrap();
        let mut b = Surface::new(6, 6, PixelFormat::rgb565()).unwrap();
        let mut canvas = Canvas::new(renderer(), &mut a).unwrap();
        canvas.set_fg_color(Color::WHITE);
        canvas.set_fill_mode(FillMode::Foreground);

        let previous = canvas.attach_surface(&mut b).unwrap();
        assert_eq!(previous.width(), 4);
        canvas.fill_surface();
        assert_eq!(canvas.surface().width(), 6);
        assert_eq!(canvas.surface().color_at(5, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_draw_step_clip_narrows() {
        let mut s = Surface::new(10, 10, PixelFormat::rgb565()).unwrap();
        let mut canvas = Canvas::new(renderer(), &mut s).unwrap();
        let step = DrawStep {
            fg: Some(Color::WHITE),
            fill_mode: FillMode::Foreground,
            ..DrawStep::new(StepShape::Fill)
        };
        let dirty = canvas.draw_step(
            Rect::from_size(10, 10),
            Some(Rect::from_xywh(2, 2, 3, 3)),
            &step,
            StepExtra::None,
        );
        assert_eq!(dirty, Rect::from_xywh(2, 2, 3, 3));
        assert_eq!(canvas.surface().color_at(3, 3), Some(Color::WHITE));
        assert_eq!(canvas.surface().color_at(6, 6), Some(Color::BLACK));
        // Step colors do not leak into the canvas style
        assert_eq!(canvas.style().fg, Color::BLACK);
    }
}
