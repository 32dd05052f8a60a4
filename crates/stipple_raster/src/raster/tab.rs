//! Tabs: rounded top corners, straight sides and an open bottom

use stipple_paint::{FillMode, Rect};

use super::circle::Fill;
use super::square::{framed_border, interior};
use super::{shadow, Brush, Corner, RoundRect};
use crate::surface::Pixel;
use crate::target::Target;

/// Extent of the base lines drawn beside a tab's bottom edge, used to join
/// the active tab with the panel below it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TabBase {
    pub left: i32,
    pub right: i32,
}

impl TabBase {
    pub const NONE: TabBase = TabBase { left: 0, right: 0 };

    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_tab<P: Pixel>(
    t: &mut Target<'_, P>,
    b: &Brush<'_>,
    x: i32,
    y: i32,
    r: i32,
    w: i32,
    h: i32,
    base: TabBase,
) {
    let Some(rr) = RoundRect::new(x, y, w, h, r) else {
        return;
    };
    let base = TabBase::new(base.left.max(0), base.right.max(0));
    let shadow = if b.style.casts_shadow() {
        b.style.shadow_offset as i32
    } else {
        0
    };
    let bbox = Rect::new(
        x - base.left,
        y,
        x + w + base.right.max(shadow),
        y + h + shadow,
    );
    if !t.begin(bbox) {
        return;
    }

    if r == 0 && b.style.bevel > 0 {
        bevel_tab(t, b, rr, base);
        return;
    }

    let stroke = b.stroke();
    match b.style.fill_mode {
        FillMode::Disabled => framed_border(t, b, rr, &Corner::TOP, false),
        FillMode::Foreground => {
            if shadow > 0 {
                shadow::tab_shadow(t, b, rr);
            }
            interior(t, b, rr, false, Fill::Solid(b.fg), true);
        }
        FillMode::Background | FillMode::Gradient => {
            if shadow > 0 {
                shadow::tab_shadow(t, b, rr);
            }
            if b.style.fill_mode == FillMode::Gradient {
                let cache = b.gradient(rr.h);
                interior(t, b, rr, false, Fill::Gradient(&cache, rr.y), stroke == 0);
            } else {
                interior(t, b, rr, false, Fill::Solid(b.bg), stroke == 0);
            }
            framed_border(t, b, rr, &Corner::TOP, false);
        }
    }

    for row in t.rows((rr.bottom() - stroke + 1).max(rr.y), rr.bottom()) {
        if base.left > 0 {
            t.fill_span(row, x - base.left, x - 1, b.fg);
        }
        if base.right > 0 {
            t.fill_span(row, x + w, x + w - 1 + base.right, b.fg);
        }
    }
}

/// Flat tab with a bevel edge instead of rounded corners
fn bevel_tab<P: Pixel>(t: &mut Target<'_, P>, b: &Brush<'_>, rr: RoundRect, base: TabBase) {
    let bevel = (b.style.bevel.min(i16::MAX as u32) as i32).min(rr.w).min(rr.h);
    let (hi, lo) = (b.bevel, b.fg);
    let (x, y, right) = (rr.x, rr.y, rr.right());

    let foot = rr.bottom() - bevel + 1;

    for row in t.rows(y, y + bevel - 1) {
        t.fill_span(row, x, right, hi);
    }
    if base.left > 0 {
        for row in t.rows(y, foot - 1) {
            t.fill_span(row, x, x + bevel - 1, hi);
        }
    }
    for row in t.rows(y, foot - 1) {
        let j = (bevel - 1 - (row - y)).max(0);
        t.fill_span(row, right - bevel + 1 + j, right, lo);
    }
    for row in t.rows(foot, rr.bottom()) {
        t.fill_span(row, right - bevel + 1, right + base.right, lo);
        if base.left > 0 {
            t.fill_span(row, x - base.left, x + bevel - 1, hi);
        }
    }
}
