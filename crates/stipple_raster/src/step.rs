//! Draw steps: one themed primitive positioned inside a widget area
//!
//! A widget's look is a list of [`DrawStep`]s. Each step names a shape and
//! its paint, and says where the shape sits inside the area the widget
//! occupies. [`draw_step`] resolves the position, builds the call style and
//! dispatches to the renderer.

use stipple_paint::{
    Color, FillMode, Padding, Point, Rect, ShadowFillMode, Style, TriangleOrientation,
};

use crate::raster::tab::TabBase;
use crate::renderer::VectorRenderer;
use crate::surface::Surface;

/// Fixed-point one for [`DrawStep::scale`]
pub const SCALE_ONE: i32 = 1 << 16;

/// Shape a step draws
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StepShape {
    /// Nothing; the step only reserves its area
    #[default]
    Void,
    /// Fill the whole clip area
    Fill,
    Line,
    Circle,
    Square,
    RoundedSquare,
    Triangle,
    Tab,
    BeveledSquare,
    Cross,
}

/// Corner or circle radius of a step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepRadius {
    Fixed(i32),
    /// Half the smaller side of the area
    Auto,
}

impl Default for StepRadius {
    fn default() -> Self {
        StepRadius::Fixed(0)
    }
}

/// Horizontal placement inside the area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HAlign {
    /// `DrawStep::x` from the left edge, or from the right edge when negative
    #[default]
    Manual,
    Left,
    Right,
    Center,
}

/// Vertical placement inside the area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VAlign {
    /// `DrawStep::y` from the top edge, or from the bottom edge when negative
    #[default]
    Manual,
    Top,
    Bottom,
    Center,
}

/// Per-call data that is not part of the step itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepExtra {
    #[default]
    None,
    /// Overrides the step's triangle orientation
    Orientation(TriangleOrientation),
    /// Base extents of the active tab
    TabBase(TabBase),
}

/// One primitive of a widget look
///
/// Unset colors keep the value of the base style the step is drawn with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawStep {
    pub shape: StepShape,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bevel_color: Option<Color>,
    pub gradient: Option<(Color, Color)>,
    pub gradient_factor: u32,
    pub fill_mode: FillMode,
    pub stroke: u32,
    pub radius: StepRadius,
    /// Radius multiplier in 16.16 fixed point
    pub scale: i32,
    pub shadow: u32,
    pub shadow_fill_mode: ShadowFillMode,
    pub bevel: u32,
    pub orientation: TriangleOrientation,
    pub x_align: HAlign,
    pub y_align: VAlign,
    /// Manual offsets, see [`HAlign::Manual`] and [`VAlign::Manual`]
    pub x: i32,
    pub y: i32,
    /// Explicit size; `None` uses the area's other dimension
    pub w: Option<i32>,
    pub h: Option<i32>,
    /// Take the full area width (minus padding), ignoring `x_align`
    pub auto_width: bool,
    pub auto_height: bool,
    pub padding: Padding,
}

impl Default for DrawStep {
    fn default() -> Self {
        Self {
            shape: StepShape::Void,
            fg: None,
            bg: None,
            bevel_color: None,
            gradient: None,
            gradient_factor: 1,
            fill_mode: FillMode::Disabled,
            stroke: 1,
            radius: StepRadius::default(),
            scale: SCALE_ONE,
            shadow: 0,
            shadow_fill_mode: ShadowFillMode::Linear,
            bevel: 0,
            orientation: TriangleOrientation::Auto,
            x_align: HAlign::Manual,
            y_align: VAlign::Manual,
            x: 0,
            y: 0,
            w: None,
            h: None,
            auto_width: true,
            auto_height: true,
            padding: Padding::default(),
        }
    }
}

impl DrawStep {
    pub fn new(shape: StepShape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// Style for this step on top of `base`
    pub fn style(&self, base: &Style) -> Style {
        let mut style = base.clone();
        if let Some(c) = self.fg {
            style.fg = c;
        }
        if let Some(c) = self.bg {
            style.bg = c;
        }
        if let Some(c) = self.bevel_color {
            style.bevel_color = c;
        }
        if let Some((start, end)) = self.gradient {
            style.gradient.start = start;
            style.gradient.end = end;
        }
        style.gradient.factor = self.gradient_factor.max(1);
        style.fill_mode = self.fill_mode;
        style.stroke_width = self.stroke;
        style.shadow_offset = self.shadow;
        style.shadow_fill_mode = self.shadow_fill_mode;
        style.bevel = self.bevel;
        style
    }

    /// Radius resolved against `area`
    pub fn radius_in(&self, area: Rect) -> i32 {
        let radius = match self.radius {
            StepRadius::Fixed(r) => r,
            StepRadius::Auto => area.width().min(area.height()) / 2,
        };
        if self.scale != SCALE_ONE && self.scale != 0 {
            ((radius as i64 * self.scale as i64) >> 16) as i32
        } else {
            radius
        }
    }

    /// Shape box inside `area`
    pub fn position_in(&self, area: Rect) -> Rect {
        let pad = self.padding;
        let (x, w) = if self.auto_width {
            (area.left + pad.left, area.width() - pad.left - pad.right)
        } else {
            let w = self.w.unwrap_or(area.height());
            let x = match self.x_align {
                HAlign::Manual if self.x >= 0 => area.left + self.x + pad.left,
                HAlign::Manual => area.right + self.x + pad.left,
                HAlign::Left => area.left + pad.left,
                HAlign::Right => area.right - w - pad.right,
                HAlign::Center => area.left + (area.width() - w) / 2,
            };
            (x, w)
        };
        let (y, h) = if self.auto_height {
            (area.top + pad.top, area.height() - pad.top - pad.bottom)
        } else {
            let h = self.h.unwrap_or(area.width());
            let y = match self.y_align {
                VAlign::Manual if self.y >= 0 => area.top + self.y + pad.top,
                VAlign::Manual => area.bottom + self.y + pad.top,
                VAlign::Top => area.top + pad.top,
                VAlign::Bottom => area.bottom - h - pad.bottom,
                VAlign::Center => area.top + (area.height() - h) / 2,
            };
            (y, h)
        };
        Rect::from_xywh(x, y, w, h)
    }

    /// Pixels the step may touch when drawn at `pos`
    fn extent(&self, pos: Rect) -> Rect {
        let grown = pos.grow(self.bevel.min(i16::MAX as u32) as i32);
        let shadow = if self.fill_mode != FillMode::Disabled
            && self.shadow_fill_mode != ShadowFillMode::None
        {
            self.shadow.min(i16::MAX as u32) as i32
        } else {
            0
        };
        Rect::new(grown.left, grown.top, grown.right + shadow, grown.bottom + shadow)
    }
}

/// Draw `step` inside `area` with `base` as the starting style
///
/// Returns the surface region the step may have changed.
pub fn draw_step<R: VectorRenderer + ?Sized>(
    renderer: &R,
    surface: &mut Surface,
    base: &Style,
    area: Rect,
    step: &DrawStep,
    extra: StepExtra,
) -> Rect {
    let style = step.style(base);
    let clip = style.clip_for(surface.width(), surface.height());
    let pos = step.position_in(area);

    let dirty = match step.shape {
        StepShape::Void => return Rect::EMPTY,
        StepShape::Fill => {
            renderer.fill_surface(surface, &style);
            clip
        }
        StepShape::Line => {
            let to = Point::new(pos.right - 1, pos.bottom - 1);
            renderer.draw_line(surface, &style, pos.origin(), to);
            step.extent(pos)
        }
        StepShape::Circle => {
            let r = step.radius_in(area);
            renderer.draw_circle(surface, &style, Point::new(pos.left + r, pos.top + r), r);
            step.extent(Rect::from_xywh(pos.left, pos.top, 2 * r + 1, 2 * r + 1))
        }
        StepShape::Square => {
            renderer.draw_square(surface, &style, pos);
            step.extent(pos)
        }
        StepShape::RoundedSquare => {
            renderer.draw_rounded_square(surface, &style, pos, step.radius_in(area));
            step.extent(pos)
        }
        StepShape::Triangle => {
            let orientation = match extra {
                StepExtra::Orientation(o) => o,
                _ => step.orientation,
            };
            renderer.draw_triangle(surface, &style, pos, orientation);
            step.extent(pos)
        }
        StepShape::Tab => {
            let base = match extra {
                StepExtra::TabBase(b) => b,
                _ => TabBase::NONE,
            };
            renderer.draw_tab(surface, &style, pos, step.radius_in(area), base);
            let e = step.extent(pos);
            Rect::new(e.left - base.left.max(0), e.top, e.right + base.right.max(0), e.bottom)
        }
        StepShape::BeveledSquare => {
            renderer.draw_beveled_square(surface, &style, pos);
            step.extent(pos)
        }
        StepShape::Cross => {
            renderer.draw_cross(surface, &style, pos);
            step.extent(pos)
        }
    };
    dirty.intersect(&clip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_position_uses_padding() {
        let mut step = DrawStep::new(StepShape::Square);
        step.padding = Padding {
            left: 1,
            top: 2,
            right: 3,
            bottom: 4,
        };
        let pos = step.position_in(Rect::from_xywh(10, 10, 20, 20));
        assert_eq!(pos, Rect::from_xywh(11, 12, 16, 14));
    }

    #[test]
    fn test_aligned_position() {
        let step = DrawStep {
            auto_width: false,
            auto_height: false,
            w: Some(6),
            h: Some(4),
            x_align: HAlign::Right,
            y_align: VAlign::Center,
            ..DrawStep::new(StepShape::Triangle)
        };
        let pos = step.position_in(Rect::from_xywh(0, 0, 20, 10));
        assert_eq!(pos, Rect::from_xywh(14, 3, 6, 4));
    }

    #[test]
    fn test_manual_negative_offsets_from_far_edge() {
        let step = DrawStep {
            auto_width: false,
            auto_height: false,
            x: -8,
            y: -5,
            w: Some(8),
            h: Some(5),
            ..DrawStep::new(StepShape::Square)
        };
        let pos = step.position_in(Rect::from_xywh(0, 0, 30, 20));
        assert_eq!(pos, Rect::from_xywh(22, 15, 8, 5));
    }

    #[test]
    fn test_missing_size_uses_other_side() {
        let step = DrawStep {
            auto_width: false,
            x_align: HAlign::Left,
            ..DrawStep::new(StepShape::Square)
        };
        let pos = step.position_in(Rect::from_xywh(0, 0, 40, 12));
        assert_eq!(pos.width(), 12);
        assert_eq!(pos.height(), 12);
    }

    #[test]
    fn test_radius_auto_and_scale() {
        let mut step = DrawStep::new(StepShape::RoundedSquare);
        step.radius = StepRadius::Auto;
        assert_eq!(step.radius_in(Rect::from_xywh(0, 0, 30, 10)), 5);
        step.radius = StepRadius::Fixed(8);
        step.scale = SCALE_ONE / 2;
        assert_eq!(step.radius_in(Rect::from_xywh(0, 0, 30, 10)), 4);
    }

    #[test]
    fn test_style_keeps_unset_colors() {
        let base = Style::new().with_fg(Color::RED).with_bg(Color::BLUE);
        let step = DrawStep {
            bg: Some(Color::WHITE),
            fill_mode: FillMode::Background,
            stroke: 2,
            ..DrawStep::new(StepShape::Square)
        };
        let style = step.style(&base);
        assert_eq!(style.fg, Color::RED);
        assert_eq!(style.bg, Color::WHITE);
        assert_eq!(style.fill_mode, FillMode::Background);
        assert_eq!(style.stroke_width, 2);
    }

    #[test]
    fn test_extent_includes_shadow_and_bevel() {
        let step = DrawStep {
            fill_mode: FillMode::Background,
            shadow: 3,
            bevel: 1,
            ..DrawStep::new(StepShape::Square)
        };
        let e = step.extent(Rect::from_xywh(10, 10, 10, 10));
        assert_eq!(e, Rect::new(9, 9, 24, 24));
    }
}
