//! Lines and crosses
//!
//! Endpoints are clamped to the surface. Horizontal, vertical and 45 degree
//! lines are run fills; anything else walks the midpoint (Bresenham)
//! stepper. A stroke of `k` pixels is a perpendicular band
//! `-(k - 1) / 2 ..= k / 2` around every step.

use stipple_paint::Rect;

use super::antialias::wu_line;
use super::Brush;
use crate::surface::Pixel;
use crate::target::Target;

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_line<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    width: i32,
    height: i32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
) {
    let stroke = b.stroke();
    if stroke == 0 || width <= 0 || height <= 0 {
        return;
    }
    let clamp = |x: i32, y: i32| (x.clamp(0, width - 1), y.clamp(0, height - 1));
    let (mut x1, mut y1) = clamp(x1, y1);
    let (mut x2, mut y2) = clamp(x2, y2);
    if x1 == x2 && y1 == y2 {
        tracing::trace!("skipping zero-length line at ({}, {})", x1, y1);
        return;
    }
    if y2 < y1 {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let lo = -(stroke - 1) / 2;
    let hi = stroke / 2;
    let bbox = Rect::new(
        x1.min(x2) + lo,
        y1 + lo,
        x1.max(x2) + hi + 2,
        y2 + hi + 2,
    );
    if !t.begin(bbox) {
        return;
    }

    let color = b.fg;
    let dx = x2 - x1;
    let dy = y2 - y1;
    let xdir = if dx < 0 { -1 } else { 1 };
    let adx = dx.abs();

    if dy == 0 {
        for o in lo..=hi {
            t.fill_span(y1 + o, x1.min(x2), x1.max(x2), color);
        }
    } else if dx == 0 {
        for yy in y1..=y2 {
            t.fill_span(yy, x1 + lo, x1 + hi, color);
        }
    } else if adx == dy {
        for i in 0..=dy {
            let x = x1 + i * xdir;
            t.fill_span(y1 + i, x + lo, x + hi, color);
        }
    } else if b.aa {
        wu(t, color, (x1, y1), (x2, y2), lo, hi);
    } else {
        bresenham(t, color, (x1, y1), (x2, y2), lo, hi);
    }
}

/// Perpendicular band at one step
#[inline]
fn band<P: Pixel>(t: &mut Target<'_, P>, x_major: bool, x: i32, y: i32, lo: i32, hi: i32, color: u32) {
    if x_major {
        t.fill_vspan(x, y + lo, y + hi, color);
    } else {
        t.fill_span(y, x + lo, x + hi, color);
    }
}

fn bresenham<P: Pixel>(
    t: &mut Target<'_, P>,
    color: u32,
    (x1, y1): (i32, i32),
    (x2, y2): (i32, i32),
    lo: i32,
    hi: i32,
) {
    let dx = (x2 - x1).abs();
    let dy = y2 - y1;
    let xdir = if x2 < x1 { -1 } else { 1 };
    let x_major = dx > dy;
    let (mut x, mut y) = (x1, y1);

    if x_major {
        let mut err = 2 * dy - dx;
        for _ in 0..=dx {
            band(t, true, x, y, lo, hi, color);
            if err >= 0 {
                y += 1;
                err -= 2 * dx;
            }
            err += 2 * dy;
            x += xdir;
        }
    } else {
        let mut err = 2 * dx - dy;
        for _ in 0..=dy {
            band(t, false, x, y, lo, hi, color);
            if err >= 0 {
                x += xdir;
                err -= 2 * dy;
            }
            err += 2 * dx;
            y += 1;
        }
    }
}

fn wu<P: Pixel>(
    t: &mut Target<'_, P>,
    color: u32,
    (x1, y1): (i32, i32),
    (x2, y2): (i32, i32),
    lo: i32,
    hi: i32,
) {
    let dx = (x2 - x1).abs();
    let dy = y2 - y1;
    let xdir = if x2 < x1 { -1 } else { 1 };
    let x_major = dx > dy;

    // Endpoints are solid
    band(t, x_major, x1, y1, lo, hi, color);
    band(t, x_major, x2, y2, lo, hi, color);

    let steps = if x_major {
        wu_line(x1, y1, dx, dy, xdir, 1)
    } else {
        wu_line(y1, x1, dy, dx, 1, xdir)
    };
    for step in steps {
        let (m, n) = (step.major, step.minor);
        let mut plot = |offset: i32, alpha: u8| {
            if x_major {
                t.blend(m, n + offset, color, alpha);
            } else {
                t.blend(n + offset, m, color, alpha);
            }
        };
        plot(lo, !step.alpha);
        for o in lo + 1..=hi {
            plot(o, 0xFF);
        }
        plot(hi + 1, step.alpha);
    }
}

/// Two diagonals spanning `[x, x + w) x [y, y + h)`
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_cross<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    draw_line(t, b, width, height, x, y, x + w - 1, y + h - 1);
    draw_line(t, b, width, height, x + w - 1, y, x, y + h - 1);
}
