//! Circles

use stipple_paint::{FillMode, Rect};

use super::antialias::{aa_edges, aa_ring_pixels, aa_solid, ring_pixels};
use super::{half_width, shadow, ArcPixel, Brush, Window};
use crate::gradient::GradientCache;
use crate::surface::Pixel;
use crate::target::Target;

pub(crate) fn draw_circle<P: Pixel>(t: &mut Target<'_, P>, b: &Brush<'_>, cx: i32, cy: i32, r: i32) {
    if r <= 0 {
        tracing::trace!("skipping circle with radius {}", r);
        return;
    }
    let stroke = b.stroke();
    let shadow = if b.style.casts_shadow() {
        b.style.shadow_offset as i32
    } else {
        0
    };
    let Some(bbox) = circle_bbox(cx, cy, r, shadow) else {
        tracing::trace!("skipping circle of radius {} at ({}, {}) out of range", r, cx, cy);
        return;
    };
    if !t.begin(bbox) {
        return;
    }

    if shadow > 0 {
        shadow::circle_shadow(t, b, cx, cy, r);
    }

    match b.style.fill_mode {
        FillMode::Disabled => outline(t, b, cx, cy, r, stroke, b.fg),
        FillMode::Foreground => fill(t, b, cx, cy, r, Fill::Solid(b.fg), true),
        FillMode::Background => {
            if stroke > 1 {
                fill(t, b, cx, cy, r, Fill::Solid(b.fg), true);
                fill(t, b, cx, cy, r - stroke, Fill::Solid(b.bg), true);
            } else {
                fill(t, b, cx, cy, r, Fill::Solid(b.bg), stroke == 0);
                outline(t, b, cx, cy, r, stroke, b.fg);
            }
        }
        FillMode::Gradient => {
            let cache = b.gradient(2 * r + 1);
            fill(
                t,
                b,
                cx,
                cy,
                r,
                Fill::Gradient(&cache, cy - r),
                stroke == 0,
            );
            outline(t, b, cx, cy, r, stroke, b.fg);
        }
    }
}

/// Bounding box of a circle and its shadow, `None` when the shape does not
/// fit the coordinate range
fn circle_bbox(cx: i32, cy: i32, r: i32, shadow: i32) -> Option<Rect> {
    let (cx, cy, r, shadow) = (cx as i64, cy as i64, r as i64, shadow as i64);
    let edges = [
        cx - r,
        cy - r,
        cx + r + 1 + shadow,
        cy + r + 1 + shadow,
        2 * r + 1 + shadow,
    ];
    let mut fitted = [0i32; 5];
    for (out, edge) in fitted.iter_mut().zip(edges) {
        *out = i32::try_from(edge).ok()?;
    }
    Some(Rect::new(fitted[0], fitted[1], fitted[2], fitted[3]))
}

/// Interior paint of a filled shape
#[derive(Clone, Copy)]
pub(crate) enum Fill<'c> {
    Solid(u32),
    /// Gradient rows counted from the given top row
    Gradient(&'c GradientCache, i32),
}

impl Fill<'_> {
    pub fn span<P: Pixel>(&self, t: &mut Target<'_, P>, y: i32, x0: i32, x1: i32) {
        match *self {
            Fill::Solid(c) => t.fill_span(y, x0, x1, c),
            Fill::Gradient(cache, top) => t.gradient_span(y, x0, x1, &cache.row_fill(y - top)),
        }
    }

    /// Color of a lone edge pixel on row `y`
    pub fn color(&self, y: i32) -> u32 {
        match *self {
            Fill::Solid(c) => c,
            Fill::Gradient(cache, top) => cache.row_color(y - top),
        }
    }

    /// Dithered color of an interior pixel
    pub fn pixel(&self, x: i32, y: i32) -> u32 {
        match *self {
            Fill::Solid(c) => c,
            Fill::Gradient(cache, top) => cache.row_fill(y - top).pixel(x),
        }
    }
}

/// Filled disc; `soft_edge` adds anti-aliased boundary pixels in AA mode
fn fill<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    cx: i32,
    cy: i32,
    r: i32,
    paint: Fill<'_>,
    soft_edge: bool,
) {
    if r < 0 {
        return;
    }
    let window = Window::around(cx, cy, t.clip());
    let profile = |dy| if b.aa { aa_solid(r, dy) } else { half_width(r, dy) };
    for dy in window.dy.up_to(r) {
        let w = profile(dy);
        paint.span(t, cy - dy, cx - w, cx + w);
        if dy > 0 {
            paint.span(t, cy + dy, cx - w, cx + w);
        }
    }
    if b.aa && soft_edge {
        for e in &aa_edges(r, &window) {
            for (sx, sy) in [(1, 1), (-1, 1), (1, -1), (-1, -1)] {
                let (x, y) = (cx + sx * e.dx, cy + sy * e.dy);
                t.blend_dest_alpha(x, y, paint.color(y), e.coverage);
            }
        }
        // Axis ends sit outside the solid rows
        for (x, y) in [(cx, cy - r), (cx, cy + r)] {
            t.put(x, y, paint.color(y));
        }
    }
}

fn outline<P: Pixel>(t: &mut Target<'_, P>, b: &Brush<'_>, cx: i32, cy: i32, r: i32, stroke: i32, color: u32) {
    if stroke <= 0 {
        return;
    }
    let window = Window::around(cx, cy, t.clip());
    let pixels: Vec<ArcPixel> = if b.aa {
        aa_ring_pixels(r, stroke, &window)
    } else {
        ring_pixels(r, stroke, &window)
    };
    for p in &pixels {
        for (sx, sy) in [(1, 1), (-1, 1), (1, -1), (-1, -1)] {
            let (x, y) = (cx + sx * p.dx, cy + sy * p.dy);
            if p.outer {
                t.blend_dest_alpha(x, y, color, p.coverage);
            } else {
                t.blend(x, y, color, p.coverage);
            }
        }
    }
    for sw in 0..stroke.min(r + 1) {
        let rr = r - sw;
        for (x, y) in [(cx + rr, cy), (cx - rr, cy), (cx, cy + rr), (cx, cy - rr)] {
            t.put(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PixelFormat;
    use crate::surface::Surface;
    use stipple_paint::{Color, Style};

    fn render(style: &Style, aa: bool, r: i32) -> Surface {
        let mut s = Surface::new(32, 32, PixelFormat::rgb888()).unwrap();
        let b = Brush::new(s.format(), style, aa);
        let clip = s.bounds();
        let mut t = Target::<u32>::new(&mut s, clip).unwrap();
        draw_circle(&mut t, &b, 15, 15, r);
        s
    }

    #[test]
    fn test_outline_has_axis_points() {
        let style = Style::new().with_fg(Color::WHITE);
        let s = render(&style, false, 5);
        for (x, y) in [(20, 15), (10, 15), (15, 20), (15, 10)] {
            assert_eq!(s.color_at(x, y), Some(Color::WHITE));
        }
        assert_eq!(s.color_at(15, 15), Some(Color::BLACK));
    }

    #[test]
    fn test_background_fill_keeps_outline() {
        let style = Style::new()
            .with_fg(Color::RED)
            .with_bg(Color::BLUE)
            .with_fill(FillMode::Background);
        let s = render(&style, false, 6);
        assert_eq!(s.color_at(15, 15), Some(Color::BLUE));
        assert_eq!(s.color_at(21, 15), Some(Color::RED));
        assert_eq!(s.color_at(22, 15), Some(Color::BLACK));
    }

    #[test]
    fn test_thick_stroke_background() {
        let style = Style::new()
            .with_fg(Color::RED)
            .with_bg(Color::BLUE)
            .with_stroke(3)
            .with_fill(FillMode::Background);
        let s = render(&style, false, 8);
        for x in 21..=23 {
            assert_eq!(s.color_at(x, 15), Some(Color::RED));
        }
        assert_eq!(s.color_at(20, 15), Some(Color::BLUE));
    }

    #[test]
    fn test_zero_radius_noop() {
        let style = Style::new().with_fg(Color::WHITE).with_fill(FillMode::Foreground);
        let s = render(&style, false, 0);
        assert!(s.pixels::<u32>().unwrap().iter().all(|&p| p == s.map_color(Color::BLACK)));
    }

    #[test]
    fn test_out_of_range_circle_skipped() {
        let style = Style::new().with_fg(Color::WHITE).with_fill(FillMode::Foreground);
        let s = render(&style, true, i32::MAX - 4);
        assert!(s.pixels::<u32>().unwrap().iter().all(|&p| p == s.map_color(Color::BLACK)));
        assert!(circle_bbox(0, 0, 1 << 30, 0).is_none());
        assert_eq!(circle_bbox(5, 5, 2, 1), Some(Rect::new(3, 3, 9, 9)));
    }

    #[test]
    fn test_aa_fill_center_solid() {
        let style = Style::new().with_fg(Color::WHITE).with_fill(FillMode::Foreground).with_stroke(0);
        let s = render(&style, true, 10);
        assert_eq!(s.color_at(15, 15), Some(Color::WHITE));
        assert_eq!(s.color_at(25, 15), Some(Color::WHITE));
        assert_eq!(s.color_at(15, 5), Some(Color::WHITE));
        assert_eq!(s.color_at(26, 15), Some(Color::BLACK));
    }
}
