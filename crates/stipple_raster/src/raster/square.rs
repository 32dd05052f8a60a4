//! Squares, rounded squares and beveled squares
//!
//! A plain square is a rounded square of radius zero. Borders are built
//! from straight runs between the corner arcs plus the arc pixels of each
//! corner quadrant, so no pixel is written twice and per-edge alpha can be
//! interpolated around each arc.

use stipple_paint::{FillMode, Rect};

use super::antialias::{aa_edges, aa_ring_pixels, aa_solid, ring_pixels};
use super::circle::Fill;
use super::{half_width, shadow, Brush, Corner, RoundRect, Window};
use crate::surface::Pixel;
use crate::target::Target;

/// Per-edge border alpha: top, right, bottom, left
pub(crate) type EdgeAlpha = [u8; 4];

/// Foreground pass of a beveled border
pub(crate) const BEVEL_FG_ALPHA: EdgeAlpha = [0, 127, 255, 63];
/// Bevel-color pass of a beveled border
pub(crate) const BEVEL_HIGHLIGHT_ALPHA: EdgeAlpha = [255, 31, 0, 127];

pub(crate) fn draw_rounded_square<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    x: i32,
    y: i32,
    r: i32,
    w: i32,
    h: i32,
) {
    let Some(rr) = RoundRect::new(x, y, w, h, r) else {
        return;
    };
    let shadow = if b.style.casts_shadow() {
        b.style.shadow_offset as i32
    } else {
        0
    };
    let bbox = rr.bbox();
    let bbox = Rect::new(bbox.left, bbox.top, bbox.right + shadow, bbox.bottom + shadow);
    if !t.begin(bbox) {
        return;
    }
    if shadow > 0 {
        shadow::rounded_shadow(t, b, rr);
    }

    let stroke = b.stroke();
    match b.style.fill_mode {
        FillMode::Disabled => {}
        FillMode::Foreground => {
            interior(t, b, rr, true, Fill::Solid(b.fg), true);
            return;
        }
        FillMode::Background => interior(t, b, rr, true, Fill::Solid(b.bg), stroke == 0),
        FillMode::Gradient => {
            let cache = b.gradient(rr.h);
            interior(t, b, rr, true, Fill::Gradient(&cache, rr.y), stroke == 0);
        }
    }
    framed_border(t, b, rr, &Corner::ALL, true);
}

/// Border in the foreground color, or the two-pass bevel when a bevel is set
pub(crate) fn framed_border<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    rr: RoundRect,
    corners: &[Corner],
    bottom_edge: bool,
) {
    if b.style.bevel > 0 {
        border(t, b, rr, corners, bottom_edge, b.fg, Some(BEVEL_FG_ALPHA));
        border(t, b, rr, corners, bottom_edge, b.bevel, Some(BEVEL_HIGHLIGHT_ALPHA));
    } else {
        border(t, b, rr, corners, bottom_edge, b.fg, None);
    }
}

/// Fill the inside of `rr`, with anti-aliased corners when `soft`
pub(crate) fn interior<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    rr: RoundRect,
    rounded_bottom: bool,
    paint: Fill<'_>,
    soft: bool,
) {
    let clip = t.clip();
    if !b.aa || rr.r == 0 {
        rr.rows(clip, |dy| half_width(rr.r, dy), rounded_bottom, |row, x0, x1| {
            paint.span(t, row, x0, x1)
        });
        return;
    }
    rr.rows(clip, |dy| aa_solid(rr.r, dy), rounded_bottom, |row, x0, x1| {
        paint.span(t, row, x0, x1)
    });
    if !soft {
        return;
    }
    let corners: &[Corner] = if rounded_bottom {
        &Corner::ALL
    } else {
        &Corner::TOP
    };
    for &corner in corners {
        let (cx, cy) = rr.center(corner);
        let (sx, sy) = corner.signs();
        for e in &aa_edges(rr.r, &Window::around(cx, cy, clip)) {
            let (px, py) = (cx + sx * e.dx, cy + sy * e.dy);
            t.blend_dest_alpha(px, py, paint.color(py), e.coverage);
        }
    }
}

#[inline]
fn run<P: Pixel>(t: &mut Target<'_, P>, y: i32, x0: i32, x1: i32, color: u32, alpha: u8) {
    if alpha == 0xFF {
        t.fill_span(y, x0, x1, color);
    } else {
        t.blend_span(y, x0, x1, color, alpha);
    }
}

#[inline]
fn weighted(alpha: Option<EdgeAlpha>, side: usize, coverage: u8) -> u8 {
    match alpha {
        None => coverage,
        Some(a) => ((a[side] as u32 * coverage as u32 + 255) >> 8) as u8,
    }
}

/// Border of `rr`, `stroke` pixels thick
///
/// Only `corners` are rounded; `bottom_edge == false` leaves the bottom
/// open and runs the sides down to the last row (tabs).
pub(crate) fn border<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    rr: RoundRect,
    corners: &[Corner],
    bottom_edge: bool,
    color: u32,
    alpha: Option<EdgeAlpha>,
) {
    let mut stroke = b.stroke().min(rr.w.min(rr.h) / 2).max(0);
    if rr.r > 0 {
        stroke = stroke.min(rr.r);
    }
    if stroke == 0 {
        return;
    }
    const TOP: usize = 0;
    const RIGHT: usize = 1;
    const BOTTOM: usize = 2;
    const LEFT: usize = 3;

    let r = rr.r;
    let (left, right) = (rr.x, rr.right());
    let (top, bottom) = (rr.y, rr.bottom());
    let a = |side: usize| weighted(alpha, side, 0xFF);

    // Straight runs; with square corners the horizontal runs own the corners
    let (hx0, hx1) = (left + r, right - r);
    let vy0 = if r > 0 { top + r } else { top + stroke };
    let vy1 = match (bottom_edge, r > 0) {
        (false, _) => bottom,
        (true, true) => bottom - r,
        (true, false) => bottom - stroke,
    };
    for sw in 0..stroke {
        run(t, top + sw, hx0, hx1, color, a(TOP));
        if bottom_edge {
            run(t, bottom - sw, hx0, hx1, color, a(BOTTOM));
        }
        for yy in t.rows(vy0, vy1) {
            run(t, yy, left + sw, left + sw, color, a(LEFT));
            run(t, yy, right - sw, right - sw, color, a(RIGHT));
        }
    }

    if r == 0 {
        return;
    }
    for &corner in corners {
        let (cx, cy) = rr.center(corner);
        let (sx, sy) = corner.signs();
        let window = Window::around(cx, cy, t.clip());
        let arc = if b.aa {
            aa_ring_pixels(r, stroke, &window)
        } else {
            ring_pixels(r, stroke, &window)
        };
        let (vert, horiz) = match corner {
            Corner::TopLeft => (LEFT, TOP),
            Corner::TopRight => (RIGHT, TOP),
            Corner::BottomRight => (RIGHT, BOTTOM),
            Corner::BottomLeft => (LEFT, BOTTOM),
        };
        for p in &arc {
            let a = match alpha {
                None => p.coverage,
                Some(edges) => {
                    let mixed = (edges[vert] as i32 * p.dx + edges[horiz] as i32 * p.dy)
                        / (p.dx + p.dy);
                    ((mixed as u32 * p.coverage as u32 + 255) >> 8) as u8
                }
            };
            let (px, py) = (cx + sx * p.dx, cy + sy * p.dy);
            if p.outer {
                t.blend_dest_alpha(px, py, color, a);
            } else {
                t.blend(px, py, color, a);
            }
        }
    }
}

pub(crate) fn draw_square<P: Pixel>(t: &mut Target<'_, P>, b: &Brush<'_>, x: i32, y: i32, w: i32, h: i32) {
    draw_rounded_square(t, b, x, y, 0, w, h);
}

/// Beveled square: the area grows by the bevel on every side; highlight on
/// top and left, foreground on bottom and right, mitred at the corners
pub(crate) fn draw_beveled_square<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
) {
    if w <= 0 || h <= 0 {
        tracing::trace!("skipping degenerate beveled square {}x{}", w, h);
        return;
    }
    let bevel = b.style.bevel.min(i16::MAX as u32) as i32;
    let (x, y, w, h) = (x - bevel, y - bevel, w + 2 * bevel, h + 2 * bevel);
    if !t.begin(Rect::from_xywh(x, y, w, h)) {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);
    if b.style.fill_mode != FillMode::Disabled {
        for row in t.rows(y, bottom) {
            t.darken_span(row, x, right);
        }
    }
    if bevel == 0 {
        return;
    }
    let (hi, lo) = (b.bevel, b.fg);
    for row in t.rows(y, y + bevel - 1) {
        t.fill_span(row, x, right, hi);
    }
    for row in t.rows(y + bevel, bottom) {
        t.fill_span(row, x, x + bevel - 1, hi);
    }
    for row in t.rows(bottom - bevel + 1, bottom) {
        let i = row - (bottom - bevel + 1);
        t.fill_span(row, x + bevel - 1 - i, right, lo);
    }
    // The right edge narrows into the top-right mitre
    for row in t.rows(y, bottom - bevel) {
        let j = (bevel - 1 - (row - y)).max(0);
        t.fill_span(row, right - bevel + 1 + j, right, lo);
    }
}
