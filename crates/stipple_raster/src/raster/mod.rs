//! Primitive rasterization
//!
//! Each primitive is a free function over a [`Target`] and a [`Brush`].
//! The same code serves aliased and anti-aliased rendering; edge-sensitive
//! primitives branch on [`Brush::aa`] and use the Wu helpers in
//! [`antialias`].

pub(crate) mod antialias;
pub(crate) mod circle;
pub(crate) mod line;
pub(crate) mod shadow;
pub(crate) mod square;
pub(crate) mod tab;
pub(crate) mod triangle;

use stipple_paint::{Color, Style};

use crate::format::PixelFormat;
use crate::gradient::GradientCache;

/// Style colors packed for one call
pub(crate) struct Brush<'s> {
    pub style: &'s Style,
    pub format: PixelFormat,
    pub fg: u32,
    pub bg: u32,
    pub bevel: u32,
    pub black: u32,
    pub aa: bool,
}

impl<'s> Brush<'s> {
    pub fn new(format: PixelFormat, style: &'s Style, aa: bool) -> Self {
        let pack = |c: Color| format.rgb_to_color(c.r, c.g, c.b);
        Self {
            style,
            format,
            fg: pack(style.fg),
            bg: pack(style.bg),
            bevel: pack(style.bevel_color),
            black: pack(Color::BLACK),
            aa,
        }
    }

    /// Stroke width as a coordinate
    pub fn stroke(&self) -> i32 {
        self.style.stroke_width.min(i16::MAX as u32) as i32
    }

    pub fn gradient(&self, height: i32) -> GradientCache {
        GradientCache::new(&self.format, &self.style.gradient, height)
    }
}

/// Integer square root
pub(crate) fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root > 0 && root.saturating_mul(root) > n {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= n {
        root += 1;
    }
    root
}

/// Row `y` the midpoint circle of radius `r` plots in column `x`, for the
/// octant `x <= y` starting at `(0, r)`
///
/// The midpoint stepper keeps the largest `y` with
/// `x^2 + y^2 - y <= r^2 - 1`.
pub(crate) fn octant_y(r: i32, x: i32) -> Option<i32> {
    if r <= 0 || x < 0 {
        return (r == 0 && x == 0).then_some(0);
    }
    let k = (r as i64) * (r as i64) - 1 - (x as i64) * (x as i64);
    if k < 0 {
        return None;
    }
    let k = k as u64;
    let mut y = (1 + isqrt(4 * k + 1)) / 2;
    while y * (y - 1) > k {
        y -= 1;
    }
    let y = y as i32;
    (x <= y).then_some(y)
}

/// Half-width of the filled midpoint circle of radius `r` on row offset `dy`
pub(crate) fn half_width(r: i32, dy: i32) -> i32 {
    if r <= 0 || dy < 0 || dy > r {
        return 0;
    }
    // Octant point in column `dy`, mirrored onto row `dy`
    let mut best = octant_y(r, dy).unwrap_or(0);
    // Rightmost octant point on row `dy`
    let k = (r as i64) * (r as i64) - 1 - (dy as i64) * (dy as i64) + dy as i64;
    if k >= 0 {
        let x = isqrt(k as u64) as i32;
        if x <= dy && octant_y(r, x) == Some(dy) {
            best = best.max(x);
        }
    }
    best
}

/// Offsets `d >= 0` along one axis that keep a mirrored point inside a
/// range, as an inclusive span (empty when `first > last`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Offsets {
    pub first: i32,
    pub last: i32,
}

impl Offsets {
    /// Offsets with `c - d` or `c + d` inside `lo..hi`
    ///
    /// Both sides start at zero when `c` is inside the range, and only one
    /// side can reach it otherwise, so the result is a single span.
    pub fn around(c: i32, lo: i32, hi: i32) -> Self {
        let (c, lo, hi) = (c as i64, lo as i64, hi as i64);
        let (first, last) = if c < lo {
            (lo - c, hi - 1 - c)
        } else if c >= hi {
            (c - hi + 1, c - lo)
        } else {
            (0, (c - lo).max(hi - 1 - c))
        };
        if lo >= hi || first > i32::MAX as i64 {
            return Self { first: 1, last: 0 };
        }
        Self {
            first: first as i32,
            last: last.min(i32::MAX as i64) as i32,
        }
    }

    pub fn contains(&self, d: i32) -> bool {
        self.first <= d && d <= self.last
    }

    /// Ascending offsets, at most `limit`
    pub fn up_to(&self, limit: i32) -> std::ops::RangeInclusive<i32> {
        self.first..=self.last.min(limit)
    }
}

/// Quadrant offsets of a shape mirrored around a center that reach the clip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Window {
    pub dx: Offsets,
    pub dy: Offsets,
}

impl Window {
    pub fn around(cx: i32, cy: i32, clip: stipple_paint::Rect) -> Self {
        Self {
            dx: Offsets::around(cx, clip.left, clip.right),
            dy: Offsets::around(cy, clip.top, clip.bottom),
        }
    }

    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        self.dx.contains(dx) && self.dy.contains(dy)
    }

    /// Offsets up to `limit` visible on either axis, ascending and unique
    pub fn either_axis(&self, limit: i32) -> Vec<i32> {
        let mut all: Vec<i32> = self.dx.up_to(limit).chain(self.dy.up_to(limit)).collect();
        all.sort_unstable();
        all.dedup();
        all
    }
}

/// The eight mirror images of octant offset `(x, y)` around `(cx, cy)`
#[inline]
pub(crate) fn mirror8(cx: i32, cy: i32, x: i32, y: i32) -> [(i32, i32); 8] {
    [
        (cx + x, cy + y),
        (cx - x, cy + y),
        (cx + x, cy - y),
        (cx - x, cy - y),
        (cx + y, cy + x),
        (cx - y, cy + x),
        (cx + y, cy - x),
        (cx - y, cy - x),
    ]
}

/// One of the four corners of a rounded shape
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
    pub const TOP: [Corner; 2] = [Corner::TopLeft, Corner::TopRight];

    /// Outward direction of the corner
    pub fn signs(self) -> (i32, i32) {
        match self {
            Corner::TopLeft => (-1, -1),
            Corner::TopRight => (1, -1),
            Corner::BottomRight => (1, 1),
            Corner::BottomLeft => (-1, 1),
        }
    }
}

/// A quadrant pixel: outward offsets `dx, dy > 0` from a corner center
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ArcPixel {
    pub dx: i32,
    pub dy: i32,
    pub coverage: u8,
    /// Lies on the outer boundary (blended with the destination-alpha variant)
    pub outer: bool,
}

/// Sort by offset and keep the strongest coverage per pixel
pub(crate) fn dedup_arc(mut pixels: Vec<ArcPixel>) -> Vec<ArcPixel> {
    pixels.retain(|p| p.dx > 0 && p.dy > 0);
    pixels.sort_by(|a, b| (a.dy, a.dx, b.coverage).cmp(&(b.dy, b.dx, a.coverage)));
    pixels.dedup_by(|later, kept| later.dx == kept.dx && later.dy == kept.dy);
    pixels
}

/// Rectangle with clamped corner radius
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RoundRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub r: i32,
}

impl RoundRect {
    /// `None` for empty geometry; the radius is clamped to fit
    pub fn new(x: i32, y: i32, w: i32, h: i32, r: i32) -> Option<Self> {
        if w <= 0 || h <= 0 {
            tracing::trace!("skipping degenerate shape {}x{} at ({}, {})", w, h, x, y);
            return None;
        }
        let r = r.clamp(0, (w.min(h) - 1) / 2);
        Some(Self { x, y, w, h, r })
    }

    pub fn right(&self) -> i32 {
        self.x + self.w - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h - 1
    }

    pub fn bbox(&self) -> stipple_paint::Rect {
        stipple_paint::Rect::from_xywh(self.x, self.y, self.w, self.h)
    }

    /// Center of the arc of `corner`
    pub fn center(&self, corner: Corner) -> (i32, i32) {
        let left = self.x + self.r;
        let right = self.right() - self.r;
        let top = self.y + self.r;
        let bottom = self.bottom() - self.r;
        match corner {
            Corner::TopLeft => (left, top),
            Corner::TopRight => (right, top),
            Corner::BottomRight => (right, bottom),
            Corner::BottomLeft => (left, bottom),
        }
    }

    /// Horizontal extent of every row inside `clip`, given the corner
    /// profile (half-width per row offset from the corner centers)
    pub fn rows(
        &self,
        clip: stipple_paint::Rect,
        profile: impl Fn(i32) -> i32,
        rounded_bottom: bool,
        mut f: impl FnMut(i32, i32, i32),
    ) {
        let (left, top) = self.center(Corner::TopLeft);
        let (right, bottom) = self.center(Corner::BottomRight);
        for row in self.y.max(clip.top)..=self.bottom().min(clip.bottom - 1) {
            let dy = if row < top {
                top - row
            } else if rounded_bottom && row > bottom {
                row - bottom
            } else {
                f(row, self.x, self.right());
                continue;
            };
            let hw = profile(dy);
            f(row, left - hw, right + hw);
        }
    }
}
