//! Render style - the explicit per-call drawing state

use crate::color::Color;
use crate::gradient::Gradient;
use crate::primitives::Rect;

/// How a shape's interior is painted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FillMode {
    /// Border only
    #[default]
    Disabled,
    /// Solid foreground
    Foreground,
    /// Solid background interior beneath a foreground outline
    Background,
    /// Vertical gradient interior beneath a foreground outline
    Gradient,
}

/// How drop shadow layers fade
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShadowFillMode {
    None,
    #[default]
    Linear,
    Exponential,
}

/// Direction a triangle points to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TriangleOrientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
    /// Down for wide boxes, right for tall ones
    Auto,
}

/// Horizontal alignment of text and bitmaps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment of text and bitmaps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TextAlignVertical {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Whole-screen shading pass used to gray out inactive areas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShadingStyle {
    #[default]
    None,
    /// Halve every channel
    Dim,
    /// Replace every pixel with its luminance
    Luminance,
}

/// How an alpha bitmap is scaled into its destination area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AutoScale {
    /// Natural size, aligned inside the area
    #[default]
    None,
    /// Scale to the area, ignoring aspect ratio
    Stretch,
    /// Largest size keeping the aspect ratio, aligned inside the area
    Fit,
    /// Stretch the middle row/column, keep the corners (nine-patch markers)
    NinePatch,
}

/// Drawing state for one primitive call
///
/// A style is passed explicitly to every renderer call; nothing is
/// remembered between calls by the renderer itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bevel_color: Color,
    pub gradient: Gradient,
    pub fill_mode: FillMode,
    pub stroke_width: u32,
    pub shadow_offset: u32,
    pub shadow_fill_mode: ShadowFillMode,
    /// Bevel thickness in pixels (0 disables the bevel)
    pub bevel: u32,
    /// Caller clip; `None` clips to the surface only
    pub clip: Option<Rect>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::BLACK,
            bg: Color::WHITE,
            bevel_color: Color::WHITE,
            gradient: Gradient::default(),
            fill_mode: FillMode::Disabled,
            stroke_width: 1,
            shadow_offset: 0,
            shadow_fill_mode: ShadowFillMode::Linear,
            bevel: 0,
            clip: None,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    // === Builder ===

    pub fn with_fg(mut self, color: impl Into<Color>) -> Self {
        self.fg = color.into();
        self
    }

    pub fn with_bg(mut self, color: impl Into<Color>) -> Self {
        self.bg = color.into();
        self
    }

    pub fn with_bevel_color(mut self, color: impl Into<Color>) -> Self {
        self.bevel_color = color.into();
        self
    }

    pub fn with_gradient(mut self, start: impl Into<Color>, end: impl Into<Color>) -> Self {
        self.gradient = Gradient::new(start.into(), end.into()).with_factor(self.gradient.factor);
        self
    }

    pub fn with_gradient_factor(mut self, factor: u32) -> Self {
        self.gradient = self.gradient.with_factor(factor);
        self
    }

    pub fn with_fill(mut self, mode: FillMode) -> Self {
        self.fill_mode = mode;
        self
    }

    pub fn with_stroke(mut self, width: u32) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_shadow(mut self, offset: u32, mode: ShadowFillMode) -> Self {
        self.shadow_offset = offset;
        self.shadow_fill_mode = mode;
        self
    }

    pub fn with_bevel(mut self, bevel: u32) -> Self {
        self.bevel = bevel;
        self
    }

    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    // === Queries ===

    /// True when a fill mode is active and the shadow would be visible
    pub fn casts_shadow(&self) -> bool {
        self.fill_mode != FillMode::Disabled
            && self.shadow_offset > 0
            && self.shadow_fill_mode != ShadowFillMode::None
    }

    /// Effective clip for a surface of the given size
    pub fn clip_for(&self, width: i32, height: i32) -> Rect {
        match self.clip {
            Some(clip) => clip.clip_to_size(width, height),
            None => Rect::from_size(width, height),
        }
    }
}
