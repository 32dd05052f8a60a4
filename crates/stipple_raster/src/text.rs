//! Text placement over an injected font
//!
//! The renderer does not shape or rasterize glyphs itself. A [`Font`]
//! supplies metrics and coverage bitmaps; [`draw_string`] measures, aligns,
//! ellipsizes and clips the string, then blends each glyph in the
//! foreground color.

use stipple_paint::{Rect, TextAlign, TextAlignVertical};

use crate::blit::align_in;
use crate::surface::Pixel;
use crate::target::Target;

const ELLIPSIS: &str = "...";

/// 8-bit coverage bitmap of one glyph
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// Offset of the bitmap from the pen position
    pub left: i32,
    /// Offset of the bitmap from the top of the line
    pub top: i32,
    /// Row-major coverage, `width * height` bytes
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// Font capability consumed by [`draw_string`]
pub trait Font {
    /// Line height in pixels
    fn height(&self) -> i32;

    /// Horizontal pen advance of `ch`
    fn advance(&self, ch: char) -> i32;

    /// Extra spacing between `left` and `right`
    fn kerning(&self, _left: char, _right: char) -> i32 {
        0
    }

    /// Coverage bitmap of `ch`, `None` for blank glyphs
    fn glyph(&self, ch: char) -> Option<GlyphBitmap>;
}

/// Placement options for [`draw_string`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextOptions {
    pub align: TextAlign,
    pub valign: TextAlignVertical,
    /// Horizontal scroll; the string is shifted left by this many pixels
    pub deltax: i32,
    /// Replace the tail with "..." when the string does not fit
    pub ellipsis: bool,
    /// Sub-area that may be painted, intersected with the text area
    pub drawable_area: Option<Rect>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            align: TextAlign::Left,
            valign: TextAlignVertical::Top,
            deltax: 0,
            ellipsis: true,
            drawable_area: None,
        }
    }
}

impl TextOptions {
    pub fn aligned(align: TextAlign, valign: TextAlignVertical) -> Self {
        Self {
            align,
            valign,
            ..Self::default()
        }
    }
}

/// Pen width of `text` including kerning
pub fn string_width(font: &dyn Font, text: &str) -> i32 {
    let mut width = 0;
    let mut prev = None;
    for ch in text.chars() {
        if let Some(p) = prev {
            width += font.kerning(p, ch);
        }
        width += font.advance(ch);
        prev = Some(ch);
    }
    width
}

/// `text` shortened with a trailing "..." to fit in `max_width`
pub fn ellipsize(font: &dyn Font, text: &str, max_width: i32) -> String {
    if string_width(font, text) <= max_width {
        return text.to_string();
    }
    let budget = max_width - string_width(font, ELLIPSIS);
    let mut out = String::new();
    let mut width = 0;
    let mut prev = None;
    for ch in text.chars() {
        width += prev.map_or(0, |p| font.kerning(p, ch)) + font.advance(ch);
        if width > budget {
            break;
        }
        out.push(ch);
        prev = Some(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

pub(crate) fn draw_string<P: Pixel>(
    t: &mut Target<'_, P>,
    font: &dyn Font,
    text: &str,
    area: Rect,
    options: &TextOptions,
    color: u32,
) {
    let visible = match options.drawable_area {
        Some(d) => area.intersect(&d),
        None => area,
    };
    if text.is_empty() || visible.is_empty() || !t.begin(visible) {
        return;
    }
    let visible = visible.intersect(&t.clip());

    let text = if options.ellipsis {
        ellipsize(font, text, area.width())
    } else {
        text.to_string()
    };
    let width = string_width(font, &text);
    let origin = align_in(area, width, font.height(), options.align, options.valign);

    let mut pen = origin.x - options.deltax;
    let mut prev = None;
    for ch in text.chars() {
        if let Some(p) = prev {
            pen += font.kerning(p, ch);
        }
        if let Some(glyph) = font.glyph(ch) {
            blend_glyph(t, &glyph, pen, origin.y, visible, color);
        }
        pen += font.advance(ch);
        prev = Some(ch);
    }
}

fn blend_glyph<P: Pixel>(
    t: &mut Target<'_, P>,
    glyph: &GlyphBitmap,
    pen: i32,
    top: i32,
    visible: Rect,
    color: u32,
) {
    let (gx, gy) = (pen + glyph.left, top + glyph.top);
    for y in 0..glyph.height {
        for x in 0..glyph.width {
            let (px, py) = (gx + x as i32, gy + y as i32);
            if visible.contains_point(px, py) {
                t.blend(px, py, color, glyph.coverage_at(x, y));
            }
        }
    }
}
