//! Scene file handling
//!
//! A scene is a TOML file with a `[surface]` table and an ordered list of
//! `[[step]]` tables, each one a [`DrawStep`] placed inside an area.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use stipple_paint::{Color, FillMode, Padding, Rect, ShadowFillMode, TriangleOrientation};
use stipple_raster::{
    DrawStep, FormatId, HAlign, RenderMode, RendererConfig, StepExtra, StepRadius, StepShape,
    TabBase, VAlign,
};

/// Top-level scene (scene.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default, rename = "step")]
    pub steps: Vec<StepConfig>,
}

/// Target surface
#[derive(Debug, Deserialize, Serialize)]
pub struct SurfaceConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Pixel format name, e.g. `rgb565` or `argb8888`
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub antialias: bool,
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_width() -> u32 {
    320
}

fn default_height() -> u32 {
    200
}

fn default_format() -> String {
    "rgb565".to_string()
}

fn default_background() -> String {
    "#000000".to_string()
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: default_format(),
            antialias: false,
            background: default_background(),
        }
    }
}

/// Shape names accepted in `[[step]]` tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeName {
    Void,
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

impl From<ShapeName> for StepShape {
    fn from(name: ShapeName) -> Self {
        match name {
            ShapeName::Void => StepShape::Void,
            ShapeName::Fill => StepShape::Fill,
            ShapeName::Line => StepShape::Line,
            ShapeName::Circle => StepShape::Circle,
            ShapeName::Square => StepShape::Square,
            ShapeName::RoundedSquare => StepShape::RoundedSquare,
            ShapeName::Triangle => StepShape::Triangle,
            ShapeName::Tab => StepShape::Tab,
            ShapeName::BeveledSquare => StepShape::BeveledSquare,
            ShapeName::Cross => StepShape::Cross,
        }
    }
}

/// `radius = 6` or `radius = "auto"`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RadiusConfig {
    Fixed(i32),
    Named(String),
}

impl Default for RadiusConfig {
    fn default() -> Self {
        RadiusConfig::Fixed(0)
    }
}

/// Horizontal or vertical placement name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignName {
    #[default]
    Manual,
    Start,
    End,
    Center,
}

/// One `[[step]]` table
#[derive(Debug, Deserialize, Serialize)]
pub struct StepConfig {
    pub shape: ShapeName,
    /// `[x, y, w, h]` of the widget area
    pub area: [i32; 4],
    #[serde(default)]
    pub clip: Option<[i32; 4]>,
    #[serde(default)]
    pub fg: Option<String>,
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub bevel_color: Option<String>,
    #[serde(default)]
    pub gradient: Option<[String; 2]>,
    #[serde(default = "default_one")]
    pub gradient_factor: u32,
    #[serde(default)]
    pub fill: FillMode,
    #[serde(default = "default_one")]
    pub stroke: u32,
    #[serde(default)]
    pub radius: RadiusConfig,
    #[serde(default)]
    pub shadow: u32,
    #[serde(default)]
    pub shadow_fill: ShadowFillMode,
    #[serde(default)]
    pub bevel: u32,
    #[serde(default = "default_orientation")]
    pub orientation: TriangleOrientation,
    /// Setting `align`, `x` or `w` turns off automatic width
    #[serde(default)]
    pub align: AlignName,
    /// Setting `valign`, `y` or `h` turns off automatic height
    #[serde(default)]
    pub valign: AlignName,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub w: Option<i32>,
    #[serde(default)]
    pub h: Option<i32>,
    #[serde(default)]
    pub padding: i32,
    /// `[left, right]` base extents for tabs
    #[serde(default)]
    pub tab_base: Option<[i32; 2]>,
}

fn default_one() -> u32 {
    1
}

fn default_orientation() -> TriangleOrientation {
    TriangleOrientation::Auto
}

impl SceneConfig {
    /// Load a scene from a file, or from `scene.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let scene_path = if path.is_dir() {
            path.join("scene.toml")
        } else {
            path.to_path_buf()
        };

        if !scene_path.exists() {
            anyhow::bail!("No scene found at {}", scene_path.display());
        }

        let content = fs::read_to_string(&scene_path)
            .with_context(|| format!("Failed to read {}", scene_path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", scene_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn renderer_config(&self) -> Result<RendererConfig> {
        let format: FormatId = self.surface.format.parse()?;
        let mode = if self.surface.antialias {
            RenderMode::Antialiased
        } else {
            RenderMode::Aliased
        };
        Ok(RendererConfig::new(format, mode))
    }

    pub fn background(&self) -> Result<Color> {
        parse_color(&self.surface.background)
    }
}

impl StepConfig {
    pub fn area(&self) -> Rect {
        let [x, y, w, h] = self.area;
        Rect::from_xywh(x, y, w, h)
    }

    pub fn clip(&self) -> Option<Rect> {
        self.clip.map(|[x, y, w, h]| Rect::from_xywh(x, y, w, h))
    }

    pub fn extra(&self) -> StepExtra {
        match self.tab_base {
            Some([left, right]) => StepExtra::TabBase(TabBase::new(left, right)),
            None => StepExtra::None,
        }
    }

    /// Build the draw step, resolving color names and placement
    pub fn to_step(&self) -> Result<DrawStep> {
        let radius = match &self.radius {
            RadiusConfig::Fixed(r) => StepRadius::Fixed(*r),
            RadiusConfig::Named(name) if name == "auto" => StepRadius::Auto,
            RadiusConfig::Named(name) => anyhow::bail!("Unknown radius `{}`", name),
        };
        let gradient = match &self.gradient {
            Some([start, end]) => Some((parse_color(start)?, parse_color(end)?)),
            None => None,
        };

        Ok(DrawStep {
            fg: self.fg.as_deref().map(parse_color).transpose()?,
            bg: self.bg.as_deref().map(parse_color).transpose()?,
            bevel_color: self.bevel_color.as_deref().map(parse_color).transpose()?,
            gradient,
            gradient_factor: self.gradient_factor,
            fill_mode: self.fill,
            stroke: self.stroke,
            radius,
            shadow: self.shadow,
            shadow_fill_mode: self.shadow_fill,
            bevel: self.bevel,
            orientation: self.orientation,
            x_align: match self.align {
                AlignName::Manual => HAlign::Manual,
                AlignName::Start => HAlign::Left,
                AlignName::End => HAlign::Right,
                AlignName::Center => HAlign::Center,
            },
            y_align: match self.valign {
                AlignName::Manual => VAlign::Manual,
                AlignName::Start => VAlign::Top,
                AlignName::End => VAlign::Bottom,
                AlignName::Center => VAlign::Center,
            },
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            auto_width: self.w.is_none() && self.x == 0 && self.align == AlignName::Manual,
            auto_height: self.h.is_none() && self.y == 0 && self.valign == AlignName::Manual,
            padding: Padding::uniform(self.padding),
            ..DrawStep::new(self.shape.into())
        })
    }
}

fn parse_color(text: &str) -> Result<Color> {
    Color::parse_hex(text).with_context(|| format!("Invalid color `{}`", text))
}
