//! Wu anti-aliasing helpers
//!
//! Circle edges come from a restoring fixed-point square root with 16
//! fractional bits. For every row offset `y` of an octant, the boundary lies
//! at `x + frac`; pixel `x` is blended with `frac` coverage and pixel `x - 1`
//! with its complement.

use super::{octant_y, ArcPixel, Window};

/// `floor(sqrt(value) * 65536)`
pub(crate) fn fp_sqrt(value: u64) -> u64 {
    // Integer square root of value << 32, two bits at a time.
    let mut rem: u128 = 0;
    let mut root: u128 = 0;
    let v = (value as u128) << 32;
    let mut shift: i32 = 126;
    while shift >= 0 {
        root <<= 1;
        rem = (rem << 2) | ((v >> shift) & 3);
        let trial = (root << 1) | 1;
        if rem >= trial {
            rem -= trial;
            root |= 1;
        }
        shift -= 2;
    }
    root as u64
}

/// One Wu step of a circle octant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WuSample {
    pub x: i32,
    pub y: i32,
    /// Coverage of pixel `x`
    pub outer: u8,
    /// Coverage of pixel `x - 1`
    pub inner: u8,
}

/// Wu step on row offset `y`, if it still lies in the octant (`x >= y`)
pub(crate) fn wu_sample(r: i32, y: i32) -> Option<WuSample> {
    if r <= 0 || y < 1 || y > r {
        return None;
    }
    let (r64, y64) = (r as u64, y as u64);
    let root = fp_sqrt(r64 * r64 - y64 * y64);
    let x = (root >> 16) as i32;
    if x < y {
        return None;
    }
    let inner = (((root & 0xFFFF) ^ 0xFFFF) >> 8) as u8;
    Some(WuSample {
        x,
        y,
        outer: !inner,
        inner,
    })
}

/// Half-width painted solid on row offset `dy` of an anti-aliased disc
///
/// Each sample fills its own row up to `x - 1` and row `x - 1` up to `y`.
pub(crate) fn aa_solid(r: i32, dy: i32) -> i32 {
    if r <= 0 || dy < 0 || dy > r {
        return 0;
    }
    if dy == 0 {
        return r;
    }
    let mut solid = wu_sample(r, dy).map_or(0, |s| s.x - 1);
    // Last sample whose column lands on `dy + 1`
    let (r64, next) = (r as i64, dy as i64 + 1);
    let rest = r64 * r64 - next * next;
    if rest >= 0 {
        let c = (super::isqrt(rest as u64) as i64).min(next) as i32;
        if wu_sample(r, c).is_some_and(|s| s.x as i64 == next) {
            solid = solid.max(c);
        }
    }
    solid.max(0)
}

/// Partially covered quadrant pixels outside the solid rows of an
/// anti-aliased disc, limited to `window`
pub(crate) fn aa_edges(r: i32, window: &Window) -> Vec<ArcPixel> {
    let mut edges = Vec::new();
    for y in window.either_axis(r) {
        let Some(s) = wu_sample(r, y) else {
            continue;
        };
        for (dx, dy) in [(s.x, s.y), (s.y, s.x)] {
            edges.push(ArcPixel {
                dx,
                dy,
                coverage: s.outer,
                outer: true,
            });
        }
    }
    let mut edges = super::dedup_arc(edges);
    edges.retain(|p| p.dx > aa_solid(r, p.dy) && window.contains(p.dx, p.dy));
    edges
}

/// Quadrant pixels of an anti-aliased border `stroke` rings thick, limited
/// to `window`
///
/// Only the outermost ring keeps its outer coverage and only the innermost
/// ring its inner coverage; everything between is opaque.
pub(crate) fn aa_ring_pixels(r: i32, stroke: i32, window: &Window) -> Vec<ArcPixel> {
    let rows = window.either_axis(r);
    let mut pixels = Vec::new();
    for sw in 0..stroke.min(r) {
        let outer_edge = sw == 0;
        let inner_edge = sw == stroke - 1;
        for s in rows.iter().filter_map(|&y| wu_sample(r - sw, y)) {
            let outer = if outer_edge { s.outer } else { 0xFF };
            let inner = if inner_edge { s.inner } else { 0xFF };
            for (dx, dy) in [(s.x, s.y), (s.y, s.x)] {
                pixels.push(ArcPixel {
                    dx,
                    dy,
                    coverage: outer,
                    outer: outer_edge,
                });
            }
            for (dx, dy) in [(s.x - 1, s.y), (s.y, s.x - 1)] {
                pixels.push(ArcPixel {
                    dx,
                    dy,
                    coverage: inner,
                    outer: false,
                });
            }
        }
    }
    pixels.retain(|p| window.contains(p.dx, p.dy));
    super::dedup_arc(pixels)
}

/// Quadrant pixels of an aliased border `stroke` rings thick, limited to
/// `window`
pub(crate) fn ring_pixels(r: i32, stroke: i32, window: &Window) -> Vec<ArcPixel> {
    // Octant columns whose pixels, or the ones just inside them, are visible
    let mut columns = window.either_axis(r + 1);
    let inner: Vec<i32> = columns.iter().map(|c| c + 1).collect();
    columns.extend(inner);
    columns.sort_unstable();
    columns.dedup();

    let solid = |dx, dy| ArcPixel {
        dx,
        dy,
        coverage: 0xFF,
        outer: false,
    };
    let mut pixels = Vec::new();
    for sw in 0..stroke.min(r) {
        for &x in &columns {
            let Some(y) = octant_y(r - sw, x) else {
                continue;
            };
            pixels.push(solid(x, y));
            pixels.push(solid(y, x));
            if stroke > 1 {
                pixels.push(solid(x - 1, y));
                pixels.push(solid(y, x - 1));
            }
        }
    }
    pixels.retain(|p| window.contains(p.dx, p.dy));
    super::dedup_arc(pixels)
}

/// Step of an anti-aliased line along its major axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WuLineStep {
    /// Position along the major axis
    pub major: i32,
    /// Minor-axis pixel holding most of the line
    pub minor: i32,
    /// Coverage of the neighbour at `minor + 1` (`minor` gets the complement)
    pub alpha: u8,
}

/// Walk a line with a 16-bit error accumulator
///
/// `major_len > 0` steps along the major axis with the minor axis moving by
/// `minor_len` (`0 <= minor_len <= major_len`) in direction `minor_dir`.
pub(crate) fn wu_line(
    major_start: i32,
    minor_start: i32,
    major_len: i32,
    minor_len: i32,
    major_dir: i32,
    minor_dir: i32,
) -> impl Iterator<Item = WuLineStep> {
    let adjust = if major_len == 0 {
        0
    } else {
        (((minor_len as u32) << 16) / major_len as u32) as u16
    };
    let mut acc: u16 = 0;
    let mut minor = minor_start;
    (1..major_len).map(move |i| {
        let (next, wrapped) = acc.overflowing_add(adjust);
        acc = next;
        if wrapped {
            minor += minor_dir;
        }
        let alpha = (acc >> 8) as u8;
        if minor_dir < 0 {
            // Neighbour on the negative side; report the pixel pair in
            // increasing minor order.
            WuLineStep {
                major: major_start + i * major_dir,
                minor: minor - 1,
                alpha: !alpha,
            }
        } else {
            WuLineStep {
                major: major_start + i * major_dir,
                minor,
                alpha,
            }
        }
    })
}
